//! Canonical output entities.
//!
//! Every field has a concrete empty default so callers always receive a
//! uniformly-shaped record per variant, whatever the upstream fragment held.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as};

/// One thumbnail candidate. Dimensions that are not whole numbers read as 0.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub width: u32,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub height: u32,
}

/// Normalized result item, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Video(Video),
    Channel(Channel),
    Playlist(Playlist),
    Short(Short),
}

impl Item {
    /// Identity of the underlying entity (video, channel or playlist id).
    pub fn id(&self) -> &str {
        match self {
            Item::Video(v) => &v.id,
            Item::Channel(c) => &c.id,
            Item::Playlist(p) => &p.id,
            Item::Short(s) => &s.id,
        }
    }

    pub fn as_video(&self) -> Option<&Video> {
        match self {
            Item::Video(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub channel_id: String,
    pub channel_thumbnail_url: String,
    pub duration_text: String,
    /// View count text reduced to ASCII digits and dots.
    pub view_count_digits: String,
    pub published_at_text: String,
    pub is_live: bool,
    pub is_short: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Channel {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub thumbnail_set: Vec<Thumbnail>,
    pub video_count: u64,
    /// Always false; playlists are never live.
    pub is_live: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Short {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub inline_playback_endpoint: Value,
}

impl Default for Short {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            thumbnail_url: String::new(),
            inline_playback_endpoint: Value::Object(Default::default()),
        }
    }
}

/// Title and description of a playlist page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistMetadata {
    pub title: String,
    pub description: String,
}

/// Summary of a channel page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel_id: String,
    pub title: String,
    pub avatar: String,
    pub url: String,
}

impl ChannelSummary {
    /// Placeholder returned when a channel page cannot be read.
    pub fn sentinel() -> Self {
        Self { channel_id: "-".into(), title: "-".into(), avatar: "-".into(), url: "-".into() }
    }

    pub fn is_sentinel(&self) -> bool {
        self == &Self::sentinel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_serializes_with_type_tag() {
        let item = Item::Video(Video { id: "abc".into(), is_live: true, ..Default::default() });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["id"], "abc");
        assert_eq!(json["isLive"], true);
        assert_eq!(json["viewCountDigits"], "");
    }

    #[test]
    fn test_short_default_endpoint_is_empty_object() {
        let short = Short::default();
        assert_eq!(short.inline_playback_endpoint, serde_json::json!({}));
        let json = serde_json::to_value(Item::Short(short)).unwrap();
        assert_eq!(json["type"], "short");
        assert_eq!(json["inlinePlaybackEndpoint"], serde_json::json!({}));
    }

    #[test]
    fn test_channel_summary_sentinel() {
        let sentinel = ChannelSummary::sentinel();
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.channel_id, "-");
        assert_eq!(sentinel.url, "-");
        let json = serde_json::to_value(&sentinel).unwrap();
        assert_eq!(json["channelId"], "-");
    }

    #[test]
    fn test_item_id() {
        let item = Item::Playlist(Playlist { id: "PL1".into(), ..Default::default() });
        assert_eq!(item.id(), "PL1");
        assert!(item.as_video().is_none());
    }
}
