//! video_details tool implementation.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tubex_client::TubeClient;

use super::json_result;

/// Input parameters for video_details tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoDetailsParams {
    /// Video id, e.g. "dQw4w9WgXcQ" (required).
    pub video_id: String,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub country: Option<String>,
}

pub async fn video_details_impl(client: &TubeClient, params: VideoDetailsParams) -> Result<CallToolResult, McpError> {
    let locale = client.locale(params.lang.as_deref(), params.country.as_deref());
    let detail = client.video_with_suggestions(&params.video_id, &locale).await?;
    Ok(json_result(&detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubex_core::AppConfig;

    #[tokio::test]
    async fn test_empty_video_id() {
        let client = TubeClient::new(AppConfig::default()).unwrap();
        let err = video_details_impl(&client, VideoDetailsParams::default()).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}
