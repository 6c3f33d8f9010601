//! playlist tool implementation.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tubex_client::TubeClient;

use super::json_result;

/// Input parameters for playlist tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PlaylistParams {
    /// Playlist id, e.g. "PLxxxx" (required).
    pub playlist_id: String,

    /// Maximum number of items; 0 returns everything on the page.
    #[serde(default)]
    pub limit: usize,
}

pub async fn playlist_impl(client: &TubeClient, params: PlaylistParams) -> Result<CallToolResult, McpError> {
    let page = client.playlist(&params.playlist_id, params.limit).await?;
    Ok(json_result(&page))
}
