//! In-memory `PageFetcher` and page fixtures for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};
use tubex_core::Error;

use crate::fetch::PageFetcher;

pub const API_KEY: &str = "AIzaFixtureKey";

/// A request seen by the fetcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get(String),
    Post { url: String, body: Value },
}

/// Serves GET pages by URL path and POST responses in queue order,
/// recording every request.
#[derive(Debug, Default)]
pub struct RecordingFetcher {
    pages: HashMap<String, String>,
    responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<Request>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: &str, html: String) -> Self {
        self.pages.insert(path.to_string(), html);
        self
    }

    pub fn with_response(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for RecordingFetcher {
    async fn get_text(&self, url: &::url::Url) -> Result<String, Error> {
        self.requests.lock().unwrap().push(Request::Get(url.to_string()));
        self.pages
            .get(url.path())
            .cloned()
            .ok_or_else(|| Error::UpstreamRequestFailed("status 404".into()))
    }

    async fn post_json(&self, url: &::url::Url, body: &Value) -> Result<Value, Error> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::Post { url: url.to_string(), body: body.clone() });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::UpstreamRequestFailed("status 500".into()))
    }
}

/// Request context embedded by `page_html`.
pub fn fixture_context() -> Value {
    json!({ "client": { "hl": "en", "gl": "US", "clientName": "WEB", "clientVersion": "2.20241001.00.00" } })
}

/// A page shaped like the real thing: config script first, then the data blob.
pub fn page_html(data: &Value) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><script nonce="a">ytcfg.set({{"INNERTUBE_API_KEY":"{API_KEY}","INNERTUBE_CONTEXT":{},"INNERTUBE_CONTEXT_CLIENT_NAME":1}});</script></head><body><script nonce="b">var ytInitialData = {};</script></body></html>"#,
        fixture_context(),
        data
    )
}

/// A page with the data blob only.
pub fn bare_page_html(data: &Value) -> String {
    format!("<html><body><script>var ytInitialData = {};</script></body></html>", data)
}

pub fn video(id: &str) -> Value {
    json!({ "videoRenderer": { "videoId": id, "title": { "runs": [{ "text": format!("Video {id}") }] } } })
}

pub fn continuation(token: &str) -> Value {
    json!({ "continuationItemRenderer": { "continuationEndpoint": { "continuationCommand": { "token": token } } } })
}
