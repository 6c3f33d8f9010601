//! Shape classifier shared by every walker.
//!
//! A renderer fragment is a single-key object whose key names its shape
//! (`{"videoRenderer": {...}}`). `Fragment::classify` checks the known keys in a
//! fixed order and returns a tagged value; adding an upstream shape means
//! adding one arm here.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::item::Item;
use super::renderer::{
    ChannelRenderer, CompactVideoRenderer, PlaylistRenderer, ReelItemRenderer, VideoRenderer, normalize_channel,
    normalize_compact_video, normalize_playlist, normalize_short, normalize_video,
};

/// Why a fragment contributed no item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("unrecognized shape: {0}")]
    Unrecognized(String),

    #[error("{shape} without {field}")]
    MissingIdentity { shape: &'static str, field: &'static str },

    #[error("malformed {shape}: {reason}")]
    Malformed { shape: &'static str, reason: String },

    #[error("{0} not expected on this surface")]
    Unexpected(&'static str),
}

/// A recognized upstream fragment.
#[derive(Debug, Clone)]
pub enum Fragment<'a> {
    /// "More content is available" marker carrying the next token.
    Continuation(String),
    /// `itemSectionRenderer.contents`
    ItemSection(&'a [Value]),
    /// `richSectionRenderer.content.richShelfRenderer.contents`
    RichShelf(&'a [Value]),
    /// `shelfRenderer.content.expandedShelfContentsRenderer.items`
    ExpandedShelf(&'a [Value]),
    Video(VideoRenderer),
    CompactVideo(CompactVideoRenderer),
    Channel(ChannelRenderer),
    Playlist(PlaylistRenderer),
    Reel(ReelItemRenderer),
}

impl<'a> Fragment<'a> {
    /// Resolve a node to its shape. `richItemRenderer` wrappers are unwrapped
    /// transparently, so walkers see the inner card.
    pub fn classify(node: &'a Value) -> Result<Self, SkipReason> {
        let Some(object) = node.as_object() else {
            return Err(SkipReason::Unrecognized("<non-object>".into()));
        };

        if let Some(v) = object.get("continuationItemRenderer") {
            return v
                .pointer("/continuationEndpoint/continuationCommand/token")
                .and_then(Value::as_str)
                .map(|token| Fragment::Continuation(token.to_string()))
                .ok_or(SkipReason::MissingIdentity { shape: "continuationItemRenderer", field: "token" });
        }
        if let Some(v) = object.get("richItemRenderer") {
            return match v.get("content") {
                Some(content) => Self::classify(content),
                None => Err(SkipReason::Malformed { shape: "richItemRenderer", reason: "no content".into() }),
            };
        }
        if let Some(v) = object.get("itemSectionRenderer") {
            return list_at(v, "/contents", "itemSectionRenderer").map(Fragment::ItemSection);
        }
        if let Some(v) = object.get("richSectionRenderer") {
            return list_at(v, "/content/richShelfRenderer/contents", "richSectionRenderer").map(Fragment::RichShelf);
        }
        if let Some(v) = object.get("shelfRenderer") {
            return list_at(v, "/content/expandedShelfContentsRenderer/items", "shelfRenderer")
                .map(Fragment::ExpandedShelf);
        }
        if let Some(v) = object.get("videoRenderer") {
            return video(v, "videoRenderer");
        }
        if let Some(v) = object.get("playlistVideoRenderer") {
            return video(v, "playlistVideoRenderer");
        }
        if let Some(v) = object.get("compactVideoRenderer") {
            let r: CompactVideoRenderer = decode(v, "compactVideoRenderer")?;
            require(&r.video_id, "compactVideoRenderer", "videoId")?;
            return Ok(Fragment::CompactVideo(r));
        }
        if let Some(v) = object.get("channelRenderer") {
            let r: ChannelRenderer = decode(v, "channelRenderer")?;
            require(&r.channel_id, "channelRenderer", "channelId")?;
            return Ok(Fragment::Channel(r));
        }
        if let Some(v) = object.get("playlistRenderer") {
            let r: PlaylistRenderer = decode(v, "playlistRenderer")?;
            require(&r.playlist_id, "playlistRenderer", "playlistId")?;
            return Ok(Fragment::Playlist(r));
        }
        if let Some(v) = object.get("reelItemRenderer") {
            let r: ReelItemRenderer = decode(v, "reelItemRenderer")?;
            require(&r.video_id, "reelItemRenderer", "videoId")?;
            return Ok(Fragment::Reel(r));
        }

        Err(SkipReason::Unrecognized(object.keys().next().cloned().unwrap_or_default()))
    }

    /// Normalize a card fragment into its canonical item.
    ///
    /// Containers and continuation markers are not items; walkers handle them
    /// before reaching this point.
    pub fn into_item(self) -> Result<Item, SkipReason> {
        match self {
            Fragment::Video(r) => Ok(Item::Video(normalize_video(&r))),
            Fragment::CompactVideo(r) => Ok(Item::Video(normalize_compact_video(&r))),
            Fragment::Channel(r) => Ok(Item::Channel(normalize_channel(&r))),
            Fragment::Playlist(r) => Ok(Item::Playlist(normalize_playlist(&r))),
            Fragment::Reel(r) => Ok(Item::Short(normalize_short(&r))),
            other => Err(SkipReason::Unexpected(other.shape())),
        }
    }

    /// Upstream key this fragment was resolved from.
    pub fn shape(&self) -> &'static str {
        match self {
            Fragment::Continuation(_) => "continuationItemRenderer",
            Fragment::ItemSection(_) => "itemSectionRenderer",
            Fragment::RichShelf(_) => "richSectionRenderer",
            Fragment::ExpandedShelf(_) => "shelfRenderer",
            Fragment::Video(_) => "videoRenderer",
            Fragment::CompactVideo(_) => "compactVideoRenderer",
            Fragment::Channel(_) => "channelRenderer",
            Fragment::Playlist(_) => "playlistRenderer",
            Fragment::Reel(_) => "reelItemRenderer",
        }
    }
}

fn decode<T: DeserializeOwned>(value: &Value, shape: &'static str) -> Result<T, SkipReason> {
    T::deserialize(value).map_err(|e| SkipReason::Malformed { shape, reason: e.to_string() })
}

fn require(id: &str, shape: &'static str, field: &'static str) -> Result<(), SkipReason> {
    if id.is_empty() { Err(SkipReason::MissingIdentity { shape, field }) } else { Ok(()) }
}

fn video<'a>(value: &Value, shape: &'static str) -> Result<Fragment<'a>, SkipReason> {
    let r: VideoRenderer = decode(value, shape)?;
    require(&r.video_id, shape, "videoId")?;
    Ok(Fragment::Video(r))
}

fn list_at<'a>(value: &'a Value, pointer: &str, shape: &'static str) -> Result<&'a [Value], SkipReason> {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| SkipReason::Malformed { shape, reason: format!("no list at {pointer}") })
}
