//! Upstream renderer shapes and their normalizers.
//!
//! The raw types default every field. Display fields go through
//! `DefaultOnError`, so a mistyped title or duration reads as empty instead
//! of failing the card, and lists go through `VecSkipError` so one odd
//! thumbnail or badge is dropped on its own. Only the identity fields are
//! load-bearing, and the caller (see `fragment`) checks them.

use serde::Deserialize;
use serde_json::Value;
use serde_with::{DefaultOnError, VecSkipError, serde_as};

use super::item::{Channel, Playlist, Short, Thumbnail, Video};

const LIVE_BADGE_STYLE: &str = "BADGE_STYLE_TYPE_LIVE_NOW";
const LIVE_OVERLAY_STYLE: &str = "LIVE";
const SHORTS_OVERLAY_STYLE: &str = "SHORTS";

/// Formatted text: either `simpleText` or a list of `runs`.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Text {
    #[serde(rename = "simpleText")]
    #[serde_as(as = "DefaultOnError")]
    pub simple_text: Option<String>,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub runs: Vec<Run>,
}

impl Text {
    /// Full text: `simpleText`, else the concatenated runs.
    pub fn text(&self) -> String {
        match &self.simple_text {
            Some(text) => text.clone(),
            None => self.runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }

    /// Only the `simpleText` form, empty otherwise.
    pub fn simple(&self) -> String {
        self.simple_text.clone().unwrap_or_default()
    }

    /// Text of the first run, falling back to `simpleText`.
    pub fn first_run(&self) -> String {
        self.runs
            .first()
            .map(|r| r.text.clone())
            .or_else(|| self.simple_text.clone())
            .unwrap_or_default()
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Run {
    #[serde_as(as = "DefaultOnError")]
    pub text: String,
    #[serde(rename = "navigationEndpoint")]
    #[serde_as(as = "DefaultOnError")]
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl Run {
    fn browse_id(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .browse_endpoint
            .as_ref()
            .map(|b| b.browse_id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NavigationEndpoint {
    #[serde(rename = "browseEndpoint")]
    pub browse_endpoint: Option<BrowseEndpoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrowseEndpoint {
    #[serde(rename = "browseId")]
    pub browse_id: String,
}

/// A `{ "thumbnails": [...] }` wrapper.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub thumbnails: Vec<Thumbnail>,
}

impl Thumbnails {
    /// Highest resolution candidate (last entry).
    pub fn last_url(&self) -> String {
        self.thumbnails.last().map(|t| absolute_url(&t.url)).unwrap_or_default()
    }

    pub fn first_url(&self) -> String {
        self.thumbnails.first().map(|t| absolute_url(&t.url)).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Badge {
    #[serde(rename = "metadataBadgeRenderer")]
    pub metadata_badge_renderer: Option<StyleOnly>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Overlay {
    #[serde(rename = "thumbnailOverlayTimeStatusRenderer")]
    pub time_status: Option<StyleOnly>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleOnly {
    pub style: String,
}

/// Only the first badge is consulted for the live marker.
fn has_live_badge(badges: &[Badge]) -> bool {
    badges
        .first()
        .and_then(|b| b.metadata_badge_renderer.as_ref())
        .is_some_and(|b| b.style == LIVE_BADGE_STYLE)
}

fn has_overlay(overlays: &[Overlay], style: &str) -> bool {
    overlays
        .iter()
        .filter_map(|o| o.time_status.as_ref())
        .any(|s| s.style == style)
}

/// Keep ASCII digits and dots only: `"1,234 views"` -> `"1234"`.
pub fn view_count_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Upgrade protocol-relative thumbnail URLs (`//yt3.ggpht.com/...`).
fn absolute_url(url: &str) -> String {
    if url.starts_with("//") { format!("https:{url}") } else { url.to_string() }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelThumbnailSupported {
    #[serde(rename = "channelThumbnailWithLinkRenderer")]
    #[serde_as(as = "DefaultOnError")]
    pub with_link: Option<ChannelThumbnailWithLink>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelThumbnailWithLink {
    #[serde_as(as = "DefaultOnError")]
    pub thumbnail: Thumbnails,
}

/// `videoRenderer` and `playlistVideoRenderer` share this shape.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoRenderer {
    pub video_id: String,
    #[serde_as(as = "DefaultOnError")]
    pub title: Text,
    #[serde_as(as = "DefaultOnError")]
    pub thumbnail: Thumbnails,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub badges: Vec<Badge>,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub thumbnail_overlays: Vec<Overlay>,
    #[serde_as(as = "DefaultOnError")]
    pub short_byline_text: Text,
    #[serde_as(as = "DefaultOnError")]
    pub owner_text: Text,
    #[serde_as(as = "DefaultOnError")]
    pub channel_thumbnail_supported_renderers: Option<ChannelThumbnailSupported>,
    #[serde_as(as = "DefaultOnError")]
    pub length_text: Text,
    #[serde_as(as = "DefaultOnError")]
    pub view_count_text: Text,
    #[serde_as(as = "DefaultOnError")]
    pub published_time_text: Text,
}

/// Normalize a search/browse/playlist video card.
pub fn normalize_video(r: &VideoRenderer) -> Video {
    let is_live = has_live_badge(&r.badges) || has_overlay(&r.thumbnail_overlays, LIVE_OVERLAY_STYLE);
    let is_short = has_overlay(&r.thumbnail_overlays, SHORTS_OVERLAY_STYLE);

    let channel_id = r
        .short_byline_text
        .runs
        .first()
        .and_then(Run::browse_id)
        .unwrap_or_default()
        .to_string();

    let channel_thumbnail_url = r
        .channel_thumbnail_supported_renderers
        .as_ref()
        .and_then(|s| s.with_link.as_ref())
        .map(|l| l.thumbnail.first_url())
        .unwrap_or_default();

    Video {
        id: r.video_id.clone(),
        title: r.title.first_run(),
        thumbnail_url: r.thumbnail.last_url(),
        channel_title: r.owner_text.first_run(),
        channel_id,
        channel_thumbnail_url,
        duration_text: r.length_text.simple(),
        view_count_digits: view_count_digits(&r.view_count_text.text()),
        published_at_text: r.published_time_text.simple(),
        is_live,
        is_short,
    }
}

/// Watch-next suggestion card.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompactVideoRenderer {
    pub video_id: String,
    #[serde_as(as = "DefaultOnError")]
    pub title: Text,
    #[serde_as(as = "DefaultOnError")]
    pub thumbnail: Thumbnails,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub badges: Vec<Badge>,
    #[serde_as(as = "DefaultOnError")]
    pub short_byline_text: Text,
    #[serde_as(as = "DefaultOnError")]
    pub channel_thumbnail: Thumbnails,
    #[serde_as(as = "DefaultOnError")]
    pub length_text: Text,
    #[serde_as(as = "DefaultOnError")]
    pub view_count_text: Text,
    #[serde_as(as = "DefaultOnError")]
    pub published_time_text: Text,
}

/// Normalize a compact suggestion card; its thumbnail is the first entry.
pub fn normalize_compact_video(r: &CompactVideoRenderer) -> Video {
    let byline = r.short_byline_text.runs.first();

    Video {
        id: r.video_id.clone(),
        title: r.title.text(),
        thumbnail_url: r.thumbnail.first_url(),
        channel_title: byline.map(|run| run.text.clone()).unwrap_or_default(),
        channel_id: byline.and_then(Run::browse_id).unwrap_or_default().to_string(),
        channel_thumbnail_url: r.channel_thumbnail.first_url(),
        duration_text: r.length_text.simple(),
        view_count_digits: view_count_digits(&r.view_count_text.text()),
        published_at_text: r.published_time_text.simple(),
        is_live: has_live_badge(&r.badges),
        is_short: false,
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelRenderer {
    pub channel_id: String,
    #[serde_as(as = "DefaultOnError")]
    pub title: Text,
    #[serde_as(as = "DefaultOnError")]
    pub thumbnail: Thumbnails,
}

pub fn normalize_channel(r: &ChannelRenderer) -> Channel {
    Channel { id: r.channel_id.clone(), title: r.title.simple(), thumbnail_url: r.thumbnail.last_url() }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistRenderer {
    pub playlist_id: String,
    #[serde_as(as = "DefaultOnError")]
    pub title: Text,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub thumbnails: Vec<Thumbnails>,
    pub video_count: Option<Value>,
}

/// `videoCount` arrives as a string (`"12"`) or occasionally a number.
fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(Value::String(s)) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse().unwrap_or_default()
        }
        _ => 0,
    }
}

pub fn normalize_playlist(r: &PlaylistRenderer) -> Playlist {
    Playlist {
        id: r.playlist_id.clone(),
        title: r.title.simple(),
        thumbnail_set: r.thumbnails.iter().flat_map(|t| t.thumbnails.iter().cloned()).collect(),
        video_count: parse_count(r.video_count.as_ref()),
        is_live: false,
    }
}

/// Short-form (reel) card.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReelItemRenderer {
    pub video_id: String,
    #[serde_as(as = "DefaultOnError")]
    pub headline: Text,
    #[serde_as(as = "DefaultOnError")]
    pub thumbnail: Thumbnails,
    pub inline_playback_endpoint: Option<Value>,
}

pub fn normalize_short(r: &ReelItemRenderer) -> Short {
    Short {
        id: r.video_id.clone(),
        title: r.headline.simple(),
        thumbnail_url: r.thumbnail.first_url(),
        inline_playback_endpoint: r
            .inline_playback_endpoint
            .clone()
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| Value::Object(Default::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::innertube::item::Item;
    use serde_json::json;

    fn video(value: Value) -> Video {
        normalize_video(&serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_video_identity_only_has_total_defaults() {
        let v = video(json!({ "videoId": "abc" }));
        assert_eq!(v, Video { id: "abc".into(), ..Default::default() });
    }

    #[test]
    fn test_video_picks_last_thumbnail() {
        let v = video(json!({
            "videoId": "abc",
            "thumbnail": { "thumbnails": [
                { "url": "https://i.ytimg.com/s.jpg", "width": 120, "height": 90 },
                { "url": "https://i.ytimg.com/m.jpg", "width": 320, "height": 180 },
                { "url": "https://i.ytimg.com/l.jpg", "width": 480, "height": 360 }
            ]}
        }));
        assert_eq!(v.thumbnail_url, "https://i.ytimg.com/l.jpg");

        let v = video(json!({ "videoId": "abc", "thumbnail": { "thumbnails": [] } }));
        assert_eq!(v.thumbnail_url, "");
    }

    #[test]
    fn test_live_badge_without_overlay() {
        let v = video(json!({
            "videoId": "abc",
            "badges": [{ "metadataBadgeRenderer": { "style": "BADGE_STYLE_TYPE_LIVE_NOW" } }]
        }));
        assert!(v.is_live);
        assert!(!v.is_short);
    }

    #[test]
    fn test_shorts_overlay_without_badge() {
        let v = video(json!({
            "videoId": "abc",
            "thumbnailOverlays": [
                { "thumbnailOverlayNowPlayingRenderer": {} },
                { "thumbnailOverlayTimeStatusRenderer": { "style": "SHORTS" } }
            ]
        }));
        assert!(!v.is_live);
        assert!(v.is_short);
    }

    #[test]
    fn test_live_overlay() {
        let v = video(json!({
            "videoId": "abc",
            "thumbnailOverlays": [{ "thumbnailOverlayTimeStatusRenderer": { "style": "LIVE" } }]
        }));
        assert!(v.is_live);
        assert!(!v.is_short);
    }

    #[test]
    fn test_neither_live_nor_short() {
        let v = video(json!({
            "videoId": "abc",
            "badges": [{ "metadataBadgeRenderer": { "style": "BADGE_STYLE_TYPE_SIMPLE" } }],
            "thumbnailOverlays": [{ "thumbnailOverlayTimeStatusRenderer": { "style": "DEFAULT" } }]
        }));
        assert!(!v.is_live);
        assert!(!v.is_short);
    }

    #[test]
    fn test_view_count_digits() {
        assert_eq!(view_count_digits("1,234,567 views"), "1234567");
        assert_eq!(view_count_digits("1.2K views"), "1.2");
        assert_eq!(view_count_digits("No views"), "");
    }

    #[test]
    fn test_full_video_card() {
        let v = video(json!({
            "videoId": "dQw4w9WgXcQ",
            "title": { "runs": [{ "text": "Never Gonna Give You Up" }] },
            "ownerText": { "runs": [{ "text": "Rick Astley" }] },
            "shortBylineText": { "runs": [{
                "text": "Rick Astley",
                "navigationEndpoint": { "browseEndpoint": { "browseId": "UCuAXFkgsw1L7xaCfnd5JJOw" } }
            }]},
            "channelThumbnailSupportedRenderers": { "channelThumbnailWithLinkRenderer": {
                "thumbnail": { "thumbnails": [{ "url": "//yt3.ggpht.com/avatar.jpg" }] }
            }},
            "lengthText": { "simpleText": "3:33" },
            "viewCountText": { "simpleText": "1,500,000,000 views" },
            "publishedTimeText": { "simpleText": "14 years ago" }
        }));
        assert_eq!(v.title, "Never Gonna Give You Up");
        assert_eq!(v.channel_title, "Rick Astley");
        assert_eq!(v.channel_id, "UCuAXFkgsw1L7xaCfnd5JJOw");
        assert_eq!(v.channel_thumbnail_url, "https://yt3.ggpht.com/avatar.jpg");
        assert_eq!(v.duration_text, "3:33");
        assert_eq!(v.view_count_digits, "1500000000");
        assert_eq!(v.published_at_text, "14 years ago");
    }

    #[test]
    fn test_channel_id_missing_navigation_level() {
        let v = video(json!({
            "videoId": "abc",
            "shortBylineText": { "runs": [{ "text": "Somebody", "navigationEndpoint": {} }] }
        }));
        assert_eq!(v.channel_id, "");
    }

    #[test]
    fn test_malformed_thumbnail_entry_is_skipped() {
        let v = video(json!({
            "videoId": "abc",
            "thumbnail": { "thumbnails": [{ "url": "https://a/1.jpg" }, { "url": 7 }] }
        }));
        assert_eq!(v.thumbnail_url, "https://a/1.jpg");
    }

    #[test]
    fn test_mistyped_optional_field_keeps_card() {
        let v = video(json!({
            "videoId": "v1",
            "title": { "simpleText": "Kept" },
            "lengthText": "3:33",
            "badges": { "style": "BADGE_STYLE_TYPE_LIVE_NOW" },
            "shortBylineText": { "runs": "Somebody" }
        }));
        assert_eq!(v.id, "v1");
        assert_eq!(v.title, "Kept");
        assert_eq!(v.duration_text, "");
        assert_eq!(v.channel_title, "");
        assert!(!v.is_live);
    }

    #[test]
    fn test_fractional_thumbnail_size_keeps_url() {
        let v = video(json!({
            "videoId": "v1",
            "thumbnail": { "thumbnails": [{ "url": "https://a/1.jpg", "width": 120.0, "height": "90" }] }
        }));
        assert_eq!(v.thumbnail_url, "https://a/1.jpg");
    }

    #[test]
    fn test_compact_video() {
        let r: CompactVideoRenderer = serde_json::from_value(json!({
            "videoId": "xyz",
            "title": { "simpleText": "Suggested" },
            "thumbnail": { "thumbnails": [{ "url": "https://a/first.jpg" }, { "url": "https://a/second.jpg" }] },
            "shortBylineText": { "runs": [{
                "text": "Channel",
                "navigationEndpoint": { "browseEndpoint": { "browseId": "UC1" } }
            }]},
            "channelThumbnail": { "thumbnails": [{ "url": "https://a/avatar.jpg" }] },
            "viewCountText": { "simpleText": "12,345 views" },
            "badges": [{ "metadataBadgeRenderer": { "style": "BADGE_STYLE_TYPE_LIVE_NOW" } }]
        }))
        .unwrap();
        let v = normalize_compact_video(&r);
        assert_eq!(v.thumbnail_url, "https://a/first.jpg");
        assert_eq!(v.title, "Suggested");
        assert_eq!(v.channel_title, "Channel");
        assert_eq!(v.channel_id, "UC1");
        assert_eq!(v.view_count_digits, "12345");
        assert_eq!(v.duration_text, "");
        assert_eq!(v.published_at_text, "");
        assert!(v.is_live);
    }

    #[test]
    fn test_channel_card() {
        let r: ChannelRenderer = serde_json::from_value(json!({
            "channelId": "UC1",
            "title": { "simpleText": "Channel One" },
            "thumbnail": { "thumbnails": [{ "url": "//yt3.ggpht.com/a=s88" }, { "url": "//yt3.ggpht.com/a=s176" }] }
        }))
        .unwrap();
        let c = normalize_channel(&r);
        assert_eq!(c, Channel { id: "UC1".into(), title: "Channel One".into(), thumbnail_url: "https://yt3.ggpht.com/a=s176".into() });
    }

    #[test]
    fn test_channel_identity_only_has_total_defaults() {
        let c = normalize_channel(&serde_json::from_value(json!({ "channelId": "UC1" })).unwrap());
        assert_eq!(c, Channel { id: "UC1".into(), ..Default::default() });
        assert_eq!(
            serde_json::to_value(Item::Channel(c)).unwrap(),
            json!({ "type": "channel", "id": "UC1", "title": "", "thumbnailUrl": "" })
        );
    }

    #[test]
    fn test_playlist_card() {
        let r: PlaylistRenderer = serde_json::from_value(json!({
            "playlistId": "PL1",
            "title": { "simpleText": "Mix" },
            "thumbnails": [{ "thumbnails": [{ "url": "https://a/1.jpg", "width": 1, "height": 1 }] }],
            "videoCount": "1,204"
        }))
        .unwrap();
        let p = normalize_playlist(&r);
        assert_eq!(p.id, "PL1");
        assert_eq!(p.title, "Mix");
        assert_eq!(p.video_count, 1204);
        assert_eq!(p.thumbnail_set.len(), 1);
        assert!(!p.is_live);

        let bare = normalize_playlist(&serde_json::from_value(json!({ "playlistId": "PL2" })).unwrap());
        assert_eq!(bare, Playlist { id: "PL2".into(), ..Default::default() });
    }

    #[test]
    fn test_short_card() {
        let r: ReelItemRenderer = serde_json::from_value(json!({
            "videoId": "s1",
            "headline": { "simpleText": "A short" },
            "thumbnail": { "thumbnails": [{ "url": "https://a/first.jpg" }, { "url": "https://a/second.jpg" }] },
            "inlinePlaybackEndpoint": { "watchEndpoint": { "videoId": "s1" } }
        }))
        .unwrap();
        let s = normalize_short(&r);
        assert_eq!(s.title, "A short");
        assert_eq!(s.thumbnail_url, "https://a/first.jpg");
        assert_eq!(s.inline_playback_endpoint["watchEndpoint"]["videoId"], "s1");

        let bare = normalize_short(&serde_json::from_value(json!({ "videoId": "s2" })).unwrap());
        assert_eq!(bare, Short { id: "s2".into(), ..Default::default() });
    }
}
