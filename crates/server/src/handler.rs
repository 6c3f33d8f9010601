//! MCP server handler implementation.
//!
//! Routes tool calls to the implementations in `tools`. The handler owns one
//! shared `TubeClient`; tool calls never mutate it.

use std::sync::Arc;

use crate::tools::{
    channel::{ChannelParams, channel_impl},
    home::{HomeFeedNextPageParams, HomeFeedParams, ShortsParams, home_feed_impl, home_feed_next_page_impl, shorts_impl},
    playlist::{PlaylistParams, playlist_impl},
    search::{SearchNextPageParams, VideoSearchParams, search_next_page_impl, video_search_impl},
    trending::{TrendingParams, trending_impl},
    video::{VideoDetailsParams, video_details_impl},
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use tubex_client::TubeClient;

/// The main MCP server handler for mcp-tube.
#[derive(Clone)]
pub struct McpTubeServer {
    client: Arc<TubeClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpTubeServer {
    pub fn new(client: TubeClient) -> Self {
        Self { client: Arc::new(client), tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Search videos, channels and (optionally) playlists. Returns normalized items and a nextPage handle for search_next_page."
    )]
    async fn video_search(&self, params: Parameters<VideoSearchParams>) -> Result<CallToolResult, McpError> {
        video_search_impl(&self.client, params.0).await
    }

    /// Pass `nextPage` from the previous search result back unchanged.
    #[tool(description = "Fetch the next page of search results using the nextPage handle from a previous search.")]
    async fn search_next_page(&self, params: Parameters<SearchNextPageParams>) -> Result<CallToolResult, McpError> {
        search_next_page_impl(&self.client, params.0).await
    }

    #[tool(description = "Fetch the home feed. Returns videos and shorts plus a nextPage handle.")]
    async fn home_feed(&self, params: Parameters<HomeFeedParams>) -> Result<CallToolResult, McpError> {
        home_feed_impl(&self.client, params.0).await
    }

    #[tool(description = "Fetch the next page of the home feed using the nextPage handle from a previous call.")]
    async fn home_feed_next_page(&self, params: Parameters<HomeFeedNextPageParams>) -> Result<CallToolResult, McpError> {
        home_feed_next_page_impl(&self.client, params.0).await
    }

    #[tool(description = "Fetch trending videos. tab: 0 = now, 1 = music, 2 = gaming, 3 = movies.")]
    async fn trending(&self, params: Parameters<TrendingParams>) -> Result<CallToolResult, McpError> {
        trending_impl(&self.client, params.0).await
    }

    #[tool(description = "List the videos of a playlist together with its title and description.")]
    async fn playlist(&self, params: Parameters<PlaylistParams>) -> Result<CallToolResult, McpError> {
        playlist_impl(&self.client, params.0).await
    }

    #[tool(description = "Get a video's details (title, channel, views, description) and its suggested videos.")]
    async fn video_details(&self, params: Parameters<VideoDetailsParams>) -> Result<CallToolResult, McpError> {
        video_details_impl(&self.client, params.0).await
    }

    /// Never fails; unknown channels come back as a record of "-" fields.
    #[tool(description = "Get a channel's title and avatar by channel id.")]
    async fn channel(&self, params: Parameters<ChannelParams>) -> Result<CallToolResult, McpError> {
        channel_impl(&self.client, params.0).await
    }

    #[tool(description = "List short-form videos from the home feed's shorts shelves.")]
    async fn shorts(&self, params: Parameters<ShortsParams>) -> Result<CallToolResult, McpError> {
        shorts_impl(&self.client, params.0).await
    }
}

impl ServerHandler for McpTubeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-tube".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
