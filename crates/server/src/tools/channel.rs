//! channel tool implementation.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tubex_client::TubeClient;

use super::json_result;

/// Input parameters for channel tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChannelParams {
    /// Channel id, e.g. "UCxxxx".
    pub channel_id: String,
}

/// Always succeeds; failures surface as the placeholder summary.
pub async fn channel_impl(client: &TubeClient, params: ChannelParams) -> Result<CallToolResult, McpError> {
    let summary = client.channel_by_id(&params.channel_id).await;
    Ok(json_result(&summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubex_core::AppConfig;

    #[tokio::test]
    async fn test_empty_channel_id_is_placeholder() {
        let client = TubeClient::new(AppConfig::default()).unwrap();
        let result = channel_impl(&client, ChannelParams::default()).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));
    }
}
