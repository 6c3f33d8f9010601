//! Watch-next page and channel header extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tubex_core::Error;

use super::item::{ChannelSummary, Video};
use super::renderer::{Text, Thumbnails, view_count_digits};
use super::walk::{list_at, walk_suggestions};

const WATCH_CONTENTS: &str = "/contents/twoColumnWatchNextResults/results/results/contents";
const WATCH_SUGGESTIONS: &str = "/contents/twoColumnWatchNextResults/secondaryResults/secondaryResults/results";

/// A video's primary details plus its suggestion list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoDetail {
    pub id: String,
    pub title: String,
    pub is_live: bool,
    /// Not present on the watch page; always empty.
    pub thumbnail_url: String,
    pub description: String,
    pub channel: String,
    pub channel_thumbnail_url: String,
    /// Not present on the watch page; always empty.
    pub duration_text: String,
    pub view_count_digits: String,
    pub published_at_text: String,
    pub published_at_relative_text: String,
    pub suggestions: Vec<Video>,
    pub skipped: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PrimaryInfo {
    title: Text,
    view_count: ViewCount,
    date_text: Text,
    relative_date_text: Text,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ViewCount {
    video_view_count_renderer: ViewCountRenderer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ViewCountRenderer {
    view_count: Text,
    is_live: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SecondaryInfo {
    owner: Owner,
    description: Option<Text>,
    attributed_description: AttributedText,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Owner {
    video_owner_renderer: OwnerRenderer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwnerRenderer {
    title: Text,
    thumbnail: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AttributedText {
    content: String,
}

impl SecondaryInfo {
    /// Joined description runs, else the attributed description.
    fn description(&self) -> String {
        match &self.description {
            Some(text) if !text.runs.is_empty() => text.text(),
            _ => self.attributed_description.content.clone(),
        }
    }
}

fn block<T: serde::de::DeserializeOwned>(contents: &[Value], index: usize, key: &str) -> Result<T, Error> {
    let value = contents
        .get(index)
        .and_then(|c| c.get(key))
        .ok_or_else(|| Error::MalformedResponse(format!("watch page: no {key} at position {index}")))?;

    T::deserialize(value).map_err(|e| Error::MalformedResponse(format!("watch page: {key}: {e}")))
}

/// Read the primary/secondary info blocks and the suggestion list.
///
/// A missing info block fails the call; a missing suggestion list yields no
/// suggestions.
pub fn extract_watch_next(data: &Value, video_id: &str) -> Result<VideoDetail, Error> {
    let contents = list_at(data, WATCH_CONTENTS)
        .ok_or_else(|| Error::MalformedResponse("watch page: no twoColumnWatchNextResults".into()))?;

    let primary: PrimaryInfo = block(contents, 0, "videoPrimaryInfoRenderer")?;
    let secondary: SecondaryInfo = block(contents, 1, "videoSecondaryInfoRenderer")?;

    let walk = walk_suggestions(list_at(data, WATCH_SUGGESTIONS).unwrap_or_default());
    let suggestions = walk.items.iter().filter_map(|item| item.as_video().cloned()).collect();

    let views = &primary.view_count.video_view_count_renderer;
    let owner = &secondary.owner.video_owner_renderer;

    Ok(VideoDetail {
        id: video_id.to_string(),
        title: primary.title.first_run(),
        is_live: views.is_live,
        thumbnail_url: String::new(),
        description: secondary.description(),
        channel: owner.title.first_run(),
        channel_thumbnail_url: owner.thumbnail.first_url(),
        duration_text: String::new(),
        view_count_digits: view_count_digits(&views.view_count.text()),
        published_at_text: primary.date_text.simple(),
        published_at_relative_text: primary.relative_date_text.simple(),
        suggestions,
        skipped: walk.skipped,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChannelHeader {
    title: String,
    avatar: Thumbnails,
}

/// Channel title and avatar from the page header, falling back to the
/// channel metadata block.
pub fn extract_channel(data: &Value, channel_id: &str, url: &str) -> Result<ChannelSummary, Error> {
    let header = ["/header/c4TabbedHeaderRenderer", "/metadata/channelMetadataRenderer"]
        .iter()
        .filter_map(|pointer| data.pointer(pointer))
        .filter_map(|value| ChannelHeader::deserialize(value).ok())
        .find(|header| !header.title.is_empty())
        .ok_or_else(|| Error::MalformedResponse(format!("channel {channel_id}: no header")))?;

    Ok(ChannelSummary {
        channel_id: channel_id.to_string(),
        title: header.title,
        avatar: header.avatar.first_url(),
        url: url.to_string(),
    })
}
