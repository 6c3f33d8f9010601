//! Unified error types for tubex.
//!
//! Every variant renders with a stable upper-snake code prefix so callers
//! (and the MCP layer) can match on the failure class without parsing prose.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the extraction engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty keyword).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL (bad base URL or unbuildable endpoint).
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// The page did not embed a parseable initial data blob.
    #[error("MISSING_INITIAL_DATA: {0}")]
    MissingInitialData(String),

    /// The playlist page lacked its video list.
    #[error("INVALID_PLAYLIST: {0}")]
    InvalidPlaylist(String),

    /// Transport failure or non-2xx response.
    #[error("UPSTREAM_REQUEST_FAILED: {0}")]
    UpstreamRequestFailed(String),

    /// Upstream response was too large to buffer.
    #[error("RESPONSE_TOO_LARGE: {0}")]
    ResponseTooLarge(String),

    /// A required navigation point in the upstream JSON was absent.
    #[error("MALFORMED_RESPONSE: {0}")]
    MalformedResponse(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::MissingInitialData(msg) => (-32020, msg.clone()),
            Error::InvalidPlaylist(msg) => (-32021, msg.clone()),
            Error::UpstreamRequestFailed(msg) => (-32008, msg.clone()),
            Error::ResponseTooLarge(msg) => (-32007, msg.clone()),
            Error::MalformedResponse(msg) => (-32022, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
