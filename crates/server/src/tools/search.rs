//! video_search and search_next_page tool implementations.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tubex_client::{ContentType, SearchQuery, TubeClient};

use super::{decode_handle, json_result};

/// Input parameters for video_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoSearchParams {
    /// Search keyword (required).
    pub keyword: String,

    /// Interface language, e.g. "en" (default from config).
    #[serde(default)]
    pub lang: Option<String>,

    /// Country code, e.g. "US" (default from config).
    #[serde(default)]
    pub country: Option<String>,

    /// Keep playlist results.
    #[serde(default)]
    pub include_playlists: bool,

    /// Maximum number of items; 0 returns everything on the page.
    #[serde(default)]
    pub limit: usize,

    /// Result type filter: video, channel, playlist or movie.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Input parameters for search_next_page tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchNextPageParams {
    /// The `nextPage` object from the previous result, unchanged.
    pub next_page: Value,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub include_playlists: bool,

    #[serde(default)]
    pub limit: usize,
}

pub async fn video_search_impl(client: &TubeClient, params: VideoSearchParams) -> Result<CallToolResult, McpError> {
    let filter = params.content_type.as_deref().and_then(|name| {
        let parsed = ContentType::parse(name);
        if parsed.is_none() {
            tracing::warn!("ignoring unknown content_type filter: {}", name);
        }
        parsed
    });

    let query = SearchQuery {
        include_playlists: params.include_playlists,
        limit: params.limit,
        filter,
        ..SearchQuery::new(params.keyword)
    };
    let locale = client.locale(params.lang.as_deref(), params.country.as_deref());

    let page = client.search(&query, &locale).await?;
    Ok(json_result(&page))
}

pub async fn search_next_page_impl(
    client: &TubeClient, params: SearchNextPageParams,
) -> Result<CallToolResult, McpError> {
    let handle = decode_handle(params.next_page)?;
    let locale = client.locale(params.lang.as_deref(), params.country.as_deref());

    let page = client
        .next_search_page(&handle, &locale, params.include_playlists, params.limit)
        .await?;
    Ok(json_result(&page))
}
