//! Locate the embedded state blob, API token and request context in a page.
//!
//! Only the initial data blob is load-bearing. The token and the context are
//! scanned best-effort and come back as `None` when absent or unparseable.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

const INITIAL_DATA_MARKER: &str = "var ytInitialData =";
const SCRIPT_END: &str = "</script>";
const CONTEXT_MARKER: &str = "INNERTUBE_CONTEXT";

static API_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:innertubeApiKey|INNERTUBE_API_KEY)"\s*:\s*"([^"]+)""#).expect("Should be able to parse the API key regex")
});

/// Error type for initial data location.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocateError {
    #[error("initial data marker not found")]
    MarkerNotFound,

    #[error("initial data is not valid JSON: {0}")]
    InvalidJson(String),
}

impl From<LocateError> for tubex_core::Error {
    fn from(err: LocateError) -> Self {
        tubex_core::Error::MissingInitialData(err.to_string())
    }
}

/// Everything a page embeds that the walkers and paginator need.
#[derive(Debug, Clone, PartialEq)]
pub struct InitContext {
    pub initial_data: Value,
    pub api_token: Option<String>,
    pub request_context: Option<Value>,
}

/// Scan a raw HTML document.
///
/// Fails only when the initial data blob is missing or unparseable; in that
/// case no partially populated context is returned.
pub fn locate(html: &str) -> Result<InitContext, LocateError> {
    let initial_data = locate_initial_data(html)?;

    let api_token = locate_api_token(html);
    if api_token.is_none() {
        tracing::debug!("page carries no API token");
    }

    let request_context = locate_request_context(html);
    if request_context.is_none() {
        tracing::debug!("page carries no request context");
    }

    Ok(InitContext { initial_data, api_token, request_context })
}

fn locate_initial_data(html: &str) -> Result<Value, LocateError> {
    let (_, rest) = html.split_once(INITIAL_DATA_MARKER).ok_or(LocateError::MarkerNotFound)?;
    let blob = rest.split(SCRIPT_END).next().unwrap_or(rest).trim_end();
    // the statement's terminating semicolon sits right before the closing tag
    let blob = blob.strip_suffix(';').unwrap_or(blob);

    serde_json::from_str(blob).map_err(|e| LocateError::InvalidJson(e.to_string()))
}

fn locate_api_token(html: &str) -> Option<String> {
    API_KEY_REGEX.captures(html).map(|c| c[1].to_string())
}

/// The context value sits between `INNERTUBE_CONTEXT":` and the next key that
/// shares the marker prefix (`,"INNERTUBE_CONTEXT_CLIENT_NAME"`).
fn locate_request_context(html: &str) -> Option<Value> {
    let (_, rest) = html.split_once(CONTEXT_MARKER)?;
    let segment = rest.split(CONTEXT_MARKER).next().unwrap_or(rest).trim();
    let inner = strip_chars(segment, 2, 2)?;

    match serde_json::from_str::<Value>(inner) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("request context is not valid JSON: {}", e);
            None
        }
    }
}

/// Drop `front` leading and `back` trailing characters, char-boundary safe.
fn strip_chars(s: &str, front: usize, back: usize) -> Option<&str> {
    let count = s.chars().count();
    if count < front + back {
        return None;
    }
    let start = s.char_indices().nth(front).map(|(i, _)| i).unwrap_or(s.len());
    let end = s.char_indices().nth(count - back).map(|(i, _)| i).unwrap_or(s.len());
    s.get(start..end)
}
