//! home_feed, home_feed_next_page and shorts tool implementations.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tubex_client::TubeClient;

use super::{decode_handle, json_result};

/// Input parameters for home_feed tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HomeFeedParams {
    /// Interface language, e.g. "en" (default from config).
    #[serde(default)]
    pub lang: Option<String>,

    /// Country code, e.g. "US" (default from config).
    #[serde(default)]
    pub country: Option<String>,
}

/// Input parameters for home_feed_next_page tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HomeFeedNextPageParams {
    /// The `nextPage` object from the previous result, unchanged.
    pub next_page: Value,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub country: Option<String>,
}

/// Input parameters for shorts tool.
pub type ShortsParams = HomeFeedParams;

pub async fn home_feed_impl(client: &TubeClient, params: HomeFeedParams) -> Result<CallToolResult, McpError> {
    let locale = client.locale(params.lang.as_deref(), params.country.as_deref());
    let page = client.home_feed(&locale).await?;
    Ok(json_result(&page))
}

pub async fn home_feed_next_page_impl(
    client: &TubeClient, params: HomeFeedNextPageParams,
) -> Result<CallToolResult, McpError> {
    let handle = decode_handle(params.next_page)?;
    let locale = client.locale(params.lang.as_deref(), params.country.as_deref());

    let page = client.next_home_feed_page(&handle, &locale).await?;
    Ok(json_result(&page))
}

pub async fn shorts_impl(client: &TubeClient, params: ShortsParams) -> Result<CallToolResult, McpError> {
    let locale = client.locale(params.lang.as_deref(), params.country.as_deref());
    let shorts = client.shorts(&locale).await?;
    Ok(json_result(&shorts))
}
