//! Per-surface content walkers.
//!
//! Each walker is a single pass over a surface's container list. Nodes go
//! through `Fragment::classify`; the surface decides which containers to descend
//! into and which card shapes it accepts. Everything else is counted as a
//! skip. Walkers never fail: structural absence is the job of the root
//! extractors below, which report `MalformedResponse` (or `InvalidPlaylist`).

use serde_json::Value;
use tubex_core::Error;

use super::fragment::{Fragment, SkipReason};
use super::item::{Item, PlaylistMetadata};

const SEARCH_ROOT: &str = "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";
const HOME_ROOT: &str = "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/richGridRenderer/contents";
const PLAYLIST_ROOT: &str = "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/itemSectionRenderer/contents/0/playlistVideoListRenderer/contents";
const PLAYLIST_METADATA: &str = "/metadata/playlistMetadataRenderer";

/// Result of one walker pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Walk {
    /// Normalized items in document order.
    pub items: Vec<Item>,
    /// Token of the last top-level continuation marker, if any.
    pub continuation: Option<String>,
    /// Fragments that contributed no item.
    pub skipped: usize,
}

impl Walk {
    fn accept(mut self, result: Result<Item, SkipReason>) -> Self {
        match result {
            Ok(item) => {
                self.items.push(item);
                self
            }
            Err(reason) => self.skip(reason),
        }
    }

    fn skip(mut self, reason: SkipReason) -> Self {
        tracing::debug!("skipped fragment: {}", reason);
        self.skipped += 1;
        self
    }

    fn continue_with(mut self, token: String) -> Self {
        self.continuation = Some(token);
        self
    }
}

/// Which surface a list belongs to; drives container descent and card acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Search { include_playlists: bool },
    RichGrid,
    Shorts,
    Trending,
    Playlist,
    Suggestions,
}

impl Surface {
    fn walk(self, nodes: &[Value]) -> Walk {
        self.fold(Walk::default(), nodes, true)
    }

    fn fold(self, walk: Walk, nodes: &[Value], top_level: bool) -> Walk {
        nodes.iter().fold(walk, |walk, node| self.step(walk, node, top_level))
    }

    /// Only a marker in the surface's own list names the next page; markers
    /// inside shelves and sections page those shelves and are skipped.
    fn step(self, walk: Walk, node: &Value, top_level: bool) -> Walk {
        let fragment = match Fragment::classify(node) {
            Ok(fragment) => fragment,
            Err(reason) => return walk.skip(reason),
        };

        match (self, fragment) {
            (_, Fragment::Continuation(token)) if top_level => walk.continue_with(token),

            (Surface::Search { .. } | Surface::Trending | Surface::Suggestions, Fragment::ItemSection(nodes)) => {
                self.fold(walk, nodes, false)
            }
            (Surface::RichGrid | Surface::Shorts, Fragment::RichShelf(nodes)) => self.fold(walk, nodes, false),
            (Surface::Trending, Fragment::ExpandedShelf(nodes)) => self.fold(walk, nodes, false),

            // opted-out playlists are a filter, not a failure
            (Surface::Search { include_playlists: false }, Fragment::Playlist(_)) => walk,
            (Surface::Search { .. }, f @ (Fragment::Video(_) | Fragment::Channel(_) | Fragment::Playlist(_))) => {
                walk.accept(f.into_item())
            }
            (Surface::RichGrid, f @ (Fragment::Video(_) | Fragment::Reel(_))) => walk.accept(f.into_item()),
            (Surface::Shorts, f @ Fragment::Reel(_)) => walk.accept(f.into_item()),
            (Surface::Trending | Surface::Playlist, f @ Fragment::Video(_)) => walk.accept(f.into_item()),
            (Surface::Suggestions, f @ Fragment::CompactVideo(_)) => walk.accept(f.into_item()),

            (_, other) => walk.skip(SkipReason::Unexpected(other.shape())),
        }
    }
}

/// Search results and search continuation items.
pub fn walk_search(contents: &[Value], include_playlists: bool) -> Walk {
    Surface::Search { include_playlists }.walk(contents)
}

/// Home feed grid and home feed continuation items. Shelves are flattened.
pub fn walk_home(contents: &[Value]) -> Walk {
    Surface::RichGrid.walk(contents)
}

/// Short-form cards from the home feed shelves only.
pub fn walk_shorts(contents: &[Value]) -> Walk {
    let shelves: Vec<&[Value]> = contents
        .iter()
        .filter_map(|node| match Fragment::classify(node) {
            Ok(Fragment::RichShelf(nodes)) => Some(nodes),
            _ => None,
        })
        .collect();

    shelves.into_iter().fold(Walk::default(), |walk, nodes| Surface::Shorts.fold(walk, nodes, false))
}

pub fn walk_trending(contents: &[Value]) -> Walk {
    Surface::Trending.walk(contents)
}

pub fn walk_playlist_videos(contents: &[Value]) -> Walk {
    Surface::Playlist.walk(contents)
}

/// Watch-next secondary list, filtered to compact suggestion cards.
pub fn walk_suggestions(results: &[Value]) -> Walk {
    Surface::Suggestions.walk(results)
}

pub(crate) fn list_at<'a>(data: &'a Value, pointer: &str) -> Option<&'a [Value]> {
    data.pointer(pointer).and_then(Value::as_array).map(Vec::as_slice)
}

fn required_list<'a>(data: &'a Value, pointer: &str, surface: &str) -> Result<&'a [Value], Error> {
    list_at(data, pointer).ok_or_else(|| Error::MalformedResponse(format!("{surface}: no list at {pointer}")))
}

/// Section list of a search results page.
pub fn search_contents(data: &Value) -> Result<&[Value], Error> {
    required_list(data, SEARCH_ROOT, "search")
}

/// Rich grid of the home feed page.
pub fn home_contents(data: &Value) -> Result<&[Value], Error> {
    required_list(data, HOME_ROOT, "home feed")
}

/// Section list of the selected trending tab.
pub fn trending_contents(data: &Value, tab: usize) -> Result<&[Value], Error> {
    let pointer =
        format!("/contents/twoColumnBrowseResultsRenderer/tabs/{tab}/tabRenderer/content/sectionListRenderer/contents");
    required_list(data, &pointer, "trending")
}

/// Walk a playlist page and read its metadata.
///
/// A page without `contents` (unknown or private list) or without the video
/// list is an invalid playlist rather than a malformed response.
pub fn extract_playlist(data: &Value, playlist_id: &str) -> Result<(Walk, PlaylistMetadata), Error> {
    if data.get("contents").is_none() {
        return Err(Error::InvalidPlaylist(format!("{playlist_id}: page has no contents")));
    }
    let contents = list_at(data, PLAYLIST_ROOT)
        .ok_or_else(|| Error::InvalidPlaylist(format!("{playlist_id}: no video list")))?;

    let metadata = data
        .pointer(PLAYLIST_METADATA)
        .and_then(|m| serde_json::from_value(m.clone()).ok())
        .unwrap_or_default();

    Ok((walk_playlist_videos(contents), metadata))
}
