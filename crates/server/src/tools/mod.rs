//! MCP tool implementations.
//!
//! Each tool validates its parameters, calls one `TubeClient` method and
//! returns the result as pretty-printed JSON text.

pub mod channel;
pub mod home;
pub mod playlist;
pub mod search;
pub mod trending;
pub mod video;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;
use tubex_client::PaginationHandle;
use tubex_core::Error;

/// Wrap a serializable output as a successful tool result.
pub(crate) fn json_result<T: Serialize>(output: &T) -> CallToolResult {
    CallToolResult::success(vec![Content::text(serde_json::to_string_pretty(output).unwrap_or_default())])
}

/// Decode a `nextPage` value handed back by the caller.
pub(crate) fn decode_handle(value: Value) -> Result<PaginationHandle, Error> {
    if value.is_null() {
        return Err(Error::InvalidInput("next_page is required".into()));
    }
    serde_json::from_value(value).map_err(|e| Error::InvalidInput(format!("invalid next_page handle: {}", e)))
}
