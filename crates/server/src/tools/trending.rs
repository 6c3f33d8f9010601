//! trending tool implementation.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tubex_client::{TrendingTab, TubeClient};

use super::json_result;

/// Input parameters for trending tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TrendingParams {
    /// Tab: 0 = now, 1 = music, 2 = gaming, 3 = movies. Out-of-range values are clamped.
    #[serde(default)]
    pub tab: i64,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// Maximum number of items; 0 returns everything on the page.
    #[serde(default)]
    pub limit: usize,
}

impl TrendingParams {
    fn tab(&self) -> TrendingTab {
        TrendingTab::from_index(self.tab)
    }
}

pub async fn trending_impl(client: &TubeClient, params: TrendingParams) -> Result<CallToolResult, McpError> {
    let locale = client.locale(params.lang.as_deref(), params.country.as_deref());
    let page = client
        .trending(params.tab(), &locale, params.limit)
        .await?;
    Ok(json_result(&page))
}
