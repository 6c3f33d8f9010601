//! Endpoint construction for every surface.
//!
//! Query values are appended through `url`'s form encoder, so filter codes
//! are kept here in their decoded form (`EgIQAQ==`) and leave as `EgIQAQ%3D%3D`.

use serde::{Deserialize, Serialize};

/// Error type for endpoint construction failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty base URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("base URL cannot carry a path: {0}")]
    CannotBeABase(String),
}

impl From<UrlError> for tubex_core::Error {
    fn from(err: UrlError) -> Self {
        tubex_core::Error::InvalidUrl(err.to_string())
    }
}

/// Search result type filter, sent as the `sp` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Channel,
    Playlist,
    Movie,
}

impl ContentType {
    /// Opaque filter code understood by the results page.
    pub fn filter_code(self) -> &'static str {
        match self {
            ContentType::Video => "EgIQAQ==",
            ContentType::Channel => "EgIQAg==",
            ContentType::Playlist => "EgIQAw==",
            ContentType::Movie => "EgIQBA==",
        }
    }

    /// Parse a filter name case-insensitively; unknown names mean "no filter".
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "video" => Some(ContentType::Video),
            "channel" => Some(ContentType::Channel),
            "playlist" => Some(ContentType::Playlist),
            "movie" => Some(ContentType::Movie),
            _ => None,
        }
    }
}

/// Trending tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingTab {
    Now,
    Music,
    Gaming,
    Movies,
}

impl TrendingTab {
    /// Map a numeric tab to a variant, clamping into `0..=3`.
    pub fn from_index(index: i64) -> Self {
        match index.clamp(0, 3) {
            0 => TrendingTab::Now,
            1 => TrendingTab::Music,
            2 => TrendingTab::Gaming,
            _ => TrendingTab::Movies,
        }
    }

    /// Position of this tab in the page's tab list.
    pub fn index(self) -> usize {
        match self {
            TrendingTab::Now => 0,
            TrendingTab::Music => 1,
            TrendingTab::Gaming => 2,
            TrendingTab::Movies => 3,
        }
    }

    fn browse_params(self) -> &'static str {
        match self {
            TrendingTab::Now => "6gQJRkVleHBsb3Jl",
            TrendingTab::Music => "4gINGgt5dG1hX2NoYXJ0cw==",
            TrendingTab::Gaming => "4gIcGhpnYW1pbmdfY29ycHVzX21vc3RfcG9wdWxhcg==",
            TrendingTab::Movies => "4gIKGgh0cmFpbGVycw==",
        }
    }
}

/// Language and country hints forwarded as `hl`/`gl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub lang: String,
    pub country: String,
}

impl Locale {
    /// Build a locale; the country is always upper-cased.
    pub fn new(lang: &str, country: &str) -> Self {
        Self { lang: lang.trim().to_string(), country: country.trim().to_uppercase() }
    }
}

/// URL builder rooted at the platform origin.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: url::Url,
}

impl Endpoints {
    /// Parse and validate the platform origin.
    pub fn new(base_url: &str) -> Result<Self, UrlError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(UrlError::Empty);
        }

        let base = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
        match base.scheme() {
            "http" | "https" => {}
            scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
        }
        if base.cannot_be_a_base() {
            return Err(UrlError::CannotBeABase(trimmed.to_string()));
        }

        Ok(Self { base })
    }

    fn at(&self, path: &str) -> url::Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    fn with_locale(mut url: url::Url, locale: &Locale) -> url::Url {
        url.query_pairs_mut()
            .append_pair("hl", &locale.lang)
            .append_pair("gl", &locale.country);
        url
    }

    /// `/results?search_query=...[&sp=...]&hl=..&gl=..`
    pub fn search(&self, keyword: &str, filter: Option<ContentType>, locale: &Locale) -> url::Url {
        let mut url = self.at("/results");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("search_query", keyword);
            if let Some(filter) = filter {
                pairs.append_pair("sp", filter.filter_code());
            }
        }
        Self::with_locale(url, locale)
    }

    /// `/?hl=..&gl=..`
    pub fn home(&self, locale: &Locale) -> url::Url {
        Self::with_locale(self.at("/"), locale)
    }

    /// `/feed/trending?bp=...&hl=..&gl=..`
    pub fn trending(&self, tab: TrendingTab, locale: &Locale) -> url::Url {
        let mut url = self.at("/feed/trending");
        url.query_pairs_mut().append_pair("bp", tab.browse_params());
        Self::with_locale(url, locale)
    }

    /// `/playlist?list=...`
    pub fn playlist(&self, playlist_id: &str) -> url::Url {
        let mut url = self.at("/playlist");
        url.query_pairs_mut().append_pair("list", playlist_id);
        url
    }

    /// `/watch?v=...&hl=..&gl=..`
    pub fn watch(&self, video_id: &str, locale: &Locale) -> url::Url {
        let mut url = self.at("/watch");
        url.query_pairs_mut().append_pair("v", video_id);
        Self::with_locale(url, locale)
    }

    /// `/channel/{id}`
    pub fn channel(&self, channel_id: &str) -> url::Url {
        let mut url = self.at("/");
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push("channel").push(channel_id);
        }
        url
    }

    /// `/youtubei/v1/search?key=...&hl=..&gl=..`
    pub fn search_continuation(&self, api_token: &str, locale: &Locale) -> url::Url {
        self.api("/youtubei/v1/search", api_token, locale)
    }

    /// `/youtubei/v1/browse?key=...&hl=..&gl=..`
    pub fn browse_continuation(&self, api_token: &str, locale: &Locale) -> url::Url {
        self.api("/youtubei/v1/browse", api_token, locale)
    }

    /// An empty token leaves `key` off entirely.
    fn api(&self, path: &str, api_token: &str, locale: &Locale) -> url::Url {
        let mut url = self.at(path);
        if !api_token.is_empty() {
            url.query_pairs_mut().append_pair("key", api_token);
        }
        Self::with_locale(url, locale)
    }
}
