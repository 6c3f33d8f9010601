//! Pagination handle and the continuation request.
//!
//! A handle is an immutable value: every page returns a fresh one. A handle
//! whose `continuation` is `None` is exhausted, and asking it for the next
//! page returns an empty page without touching the network.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tubex_core::Error;

use super::item::Item;
use super::locate::InitContext;
use super::walk::{Walk, list_at, walk_home, walk_search};
use crate::fetch::{Endpoints, Locale, PageFetcher};

const DEFAULT_CLIENT_NAME: &str = "WEB";
const DEFAULT_CLIENT_VERSION: &str = "2.20240808.00.00";

/// The POST body of a continuation request, passed back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextPageContext {
    pub context: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

/// Opaque state a caller hands back to fetch the next page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationHandle {
    pub api_token: String,
    pub context: NextPageContext,
}

impl PaginationHandle {
    /// Build the handle for a freshly fetched page.
    ///
    /// Pages that embed no request context get a minimal web client context
    /// carrying the caller's locale.
    pub fn first_page(init: &InitContext, continuation: Option<String>, locale: &Locale) -> Self {
        let context = init.request_context.clone().unwrap_or_else(|| default_request_context(locale));
        Self {
            api_token: init.api_token.clone().unwrap_or_default(),
            context: NextPageContext { context, continuation },
        }
    }

    /// Same token and request context, new continuation.
    pub fn advance(&self, continuation: Option<String>) -> Self {
        Self {
            api_token: self.api_token.clone(),
            context: NextPageContext { context: self.context.context.clone(), continuation },
        }
    }

    pub fn has_more(&self) -> bool {
        self.context.continuation.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        !self.has_more()
    }
}

fn default_request_context(locale: &Locale) -> Value {
    json!({
        "client": {
            "hl": locale.lang,
            "gl": locale.country,
            "clientName": DEFAULT_CLIENT_NAME,
            "clientVersion": DEFAULT_CLIENT_VERSION,
        }
    })
}

/// One page of normalized items plus the handle for the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Item>,
    pub next_page: PaginationHandle,
    pub skipped: usize,
}

impl Page {
    pub fn from_walk(walk: Walk, next_page: PaginationHandle) -> Self {
        Self { items: walk.items, next_page, skipped: walk.skipped }
    }

    /// Keep the first `limit` items; zero keeps everything. The handle is untouched.
    pub fn truncate(mut self, limit: usize) -> Self {
        if limit > 0 {
            self.items.truncate(limit);
        }
        self
    }
}

/// Surfaces that support continuation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationSurface {
    Search { include_playlists: bool },
    HomeFeed,
}

impl ContinuationSurface {
    fn endpoint(self, endpoints: &Endpoints, api_token: &str, locale: &Locale) -> ::url::Url {
        match self {
            ContinuationSurface::Search { .. } => endpoints.search_continuation(api_token, locale),
            ContinuationSurface::HomeFeed => endpoints.browse_continuation(api_token, locale),
        }
    }

    /// Response keys holding the appended items, preferred key first.
    fn action_keys(self) -> [&'static str; 2] {
        match self {
            ContinuationSurface::Search { .. } => ["onResponseReceivedCommands", "onResponseReceivedActions"],
            ContinuationSurface::HomeFeed => ["onResponseReceivedActions", "onResponseReceivedCommands"],
        }
    }

    fn walk(self, items: &[Value]) -> Walk {
        match self {
            ContinuationSurface::Search { include_playlists } => walk_search(items, include_playlists),
            ContinuationSurface::HomeFeed => walk_home(items),
        }
    }
}

/// Locate `appendContinuationItemsAction.continuationItems` in a continuation response.
pub fn continuation_items(response: &Value, surface: ContinuationSurface) -> Result<&[Value], Error> {
    surface
        .action_keys()
        .iter()
        .find_map(|key| list_at(response, &format!("/{key}/0/appendContinuationItemsAction/continuationItems")))
        .ok_or_else(|| Error::MalformedResponse("continuation response has no appendContinuationItemsAction".into()))
}

/// Fetch and walk the page after `handle`.
pub async fn next_page<F: PageFetcher + ?Sized>(
    fetcher: &F, endpoints: &Endpoints, handle: &PaginationHandle, surface: ContinuationSurface, locale: &Locale,
) -> Result<Page, Error> {
    if handle.is_exhausted() {
        tracing::debug!("pagination handle is exhausted; not requesting");
        return Ok(Page { items: Vec::new(), next_page: handle.clone(), skipped: 0 });
    }

    let url = surface.endpoint(endpoints, &handle.api_token, locale);
    let body = serde_json::to_value(&handle.context)
        .map_err(|e| Error::InvalidInput(format!("unserializable pagination context: {}", e)))?;

    let response = fetcher.post_json(&url, &body).await?;
    let walk = surface.walk(continuation_items(&response, surface)?);
    let next = handle.advance(walk.continuation.clone());

    Ok(Page::from_walk(walk, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingFetcher, Request, continuation, video};

    fn endpoints() -> Endpoints {
        Endpoints::new("https://www.youtube.com").unwrap()
    }

    fn locale() -> Locale {
        Locale::new("en", "us")
    }

    fn handle(token: Option<&str>) -> PaginationHandle {
        PaginationHandle {
            api_token: "KEY".into(),
            context: NextPageContext {
                context: json!({ "client": { "clientVersion": "2.1", "clientName": "WEB" } }),
                continuation: token.map(String::from),
            },
        }
    }

    fn search_response(items: Vec<Value>) -> Value {
        json!({ "onResponseReceivedCommands": [{ "appendContinuationItemsAction": { "continuationItems": [
            { "itemSectionRenderer": { "contents": items } },
            continuation("SEARCH3")
        ]}}]})
    }

    #[test]
    fn test_handle_serializes_camel_case() {
        let json = serde_json::to_value(handle(Some("T"))).unwrap();
        assert_eq!(json["apiToken"], "KEY");
        assert_eq!(json["context"]["continuation"], "T");
        assert_eq!(json["context"]["context"]["client"]["clientName"], "WEB");

        let exhausted = serde_json::to_value(handle(None)).unwrap();
        assert!(exhausted["context"].get("continuation").is_none());
    }

    #[test]
    fn test_handle_context_keeps_key_order() {
        let text = r#"{"apiToken":"K","context":{"context":{"z":1,"a":2},"continuation":"T"}}"#;
        let parsed: PaginationHandle = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), text);
    }

    #[test]
    fn test_first_page_defaults_context() {
        let init = InitContext { initial_data: json!({}), api_token: None, request_context: None };
        let handle = PaginationHandle::first_page(&init, Some("T".into()), &Locale::new("vi", "vn"));
        assert_eq!(handle.api_token, "");
        assert_eq!(handle.context.context["client"]["gl"], "VN");
        assert_eq!(handle.context.context["client"]["clientName"], "WEB");
        assert!(handle.has_more());
    }

    #[test]
    fn test_truncate_keeps_handle() {
        let walk = walk_search(&[json!({ "itemSectionRenderer": { "contents": [video("a"), video("b"), video("c")] } })], false);
        let page = Page::from_walk(walk, handle(Some("T"))).truncate(2);
        assert_eq!(page.items.iter().map(Item::id).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(page.next_page, handle(Some("T")));

        let walk = walk_search(&[json!({ "itemSectionRenderer": { "contents": [video("a")] } })], false);
        assert_eq!(Page::from_walk(walk, handle(None)).truncate(0).items.len(), 1);
    }

    #[test]
    fn test_continuation_items_fallback_key() {
        let response = json!({ "onResponseReceivedActions": [{ "appendContinuationItemsAction": { "continuationItems": [{}] } }] });
        let items = continuation_items(&response, ContinuationSurface::Search { include_playlists: false }).unwrap();
        assert_eq!(items.len(), 1);

        let err = continuation_items(&json!({}), ContinuationSurface::HomeFeed).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_next_page_round_trips_handle() {
        let fetcher = RecordingFetcher::new().with_response(search_response(vec![video("v1"), video("v2")]));
        let current = handle(Some("SEARCH2"));

        let page = next_page(&fetcher, &endpoints(), &current, ContinuationSurface::Search { include_playlists: false }, &locale())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_page.api_token, "KEY");
        assert_eq!(page.next_page.context.continuation.as_deref(), Some("SEARCH3"));
        assert_eq!(page.next_page.context.context, current.context.context);

        let requests = fetcher.requests();
        assert_eq!(
            requests,
            vec![Request::Post {
                url: "https://www.youtube.com/youtubei/v1/search?key=KEY&hl=en&gl=US".into(),
                body: serde_json::to_value(&current.context).unwrap(),
            }]
        );
    }

    #[tokio::test]
    async fn test_next_page_without_marker_is_exhausted() {
        let response = json!({ "onResponseReceivedActions": [{ "appendContinuationItemsAction": { "continuationItems": [
            { "richItemRenderer": { "content": video("h9") } }
        ]}}]});
        let fetcher = RecordingFetcher::new().with_response(response);

        let page = next_page(&fetcher, &endpoints(), &handle(Some("HOME2")), ContinuationSurface::HomeFeed, &locale())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.next_page.is_exhausted());

        let after = next_page(&fetcher, &endpoints(), &page.next_page, ContinuationSurface::HomeFeed, &locale())
            .await
            .unwrap();
        assert!(after.items.is_empty());
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_next_page_transport_failure() {
        let fetcher = RecordingFetcher::new();
        let result = next_page(&fetcher, &endpoints(), &handle(Some("T")), ContinuationSurface::HomeFeed, &locale()).await;
        assert!(matches!(result, Err(Error::UpstreamRequestFailed(_))));
    }
}
