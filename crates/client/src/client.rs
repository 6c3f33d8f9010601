//! Public client: one method per surface.
//!
//! Every call is a single GET (or a single POST for continuation pages)
//! followed by synchronous extraction. The client holds no mutable state;
//! pagination state lives entirely in the `PaginationHandle` values it returns.

use serde::{Deserialize, Serialize};
use tubex_core::{AppConfig, Error};

use crate::fetch::{ContentType, Endpoints, FetchClient, FetchConfig, Locale, PageFetcher, TrendingTab};
use crate::innertube::walk::{
    extract_playlist, home_contents, search_contents, trending_contents, walk_home, walk_search, walk_shorts,
    walk_trending,
};
use crate::innertube::watch::{extract_channel, extract_watch_next};
use crate::innertube::{
    ChannelSummary, ContinuationSurface, InitContext, Item, Page, PaginationHandle, PlaylistMetadata, Short,
    VideoDetail, locate, next_page,
};

/// Search request parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub keyword: String,
    /// Keep playlist cards in the results.
    pub include_playlists: bool,
    /// Truncate to this many items; zero keeps all.
    pub limit: usize,
    pub filter: Option<ContentType>,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self { keyword: keyword.into(), ..Default::default() }
    }

    fn validate(&self) -> Result<&str, Error> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(Error::InvalidInput("keyword cannot be empty".into()));
        }
        Ok(keyword)
    }
}

/// Playlist videos plus the playlist's own metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPage {
    pub items: Vec<Item>,
    pub metadata: PlaylistMetadata,
    /// The page carried a continuation marker.
    pub has_more: bool,
    pub skipped: usize,
}

/// Extraction client over a `PageFetcher`.
#[derive(Debug, Clone)]
pub struct TubeClient<F = FetchClient> {
    fetcher: F,
    endpoints: Endpoints,
    config: AppConfig,
}

impl TubeClient<FetchClient> {
    /// Build a client with the reqwest transport.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(&config))?;
        Self::with_fetcher(fetcher, config)
    }
}

impl<F: PageFetcher> TubeClient<F> {
    pub fn with_fetcher(fetcher: F, config: AppConfig) -> Result<Self, Error> {
        let endpoints = Endpoints::new(&config.base_url)?;
        Ok(Self { fetcher, endpoints, config })
    }

    /// Build a locale, filling absent or blank parts from the configured defaults.
    pub fn locale(&self, lang: Option<&str>, country: Option<&str>) -> Locale {
        let pick = |value: Option<&str>, fallback: &str| match value.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => fallback.to_string(),
        };
        Locale::new(
            &pick(lang, &self.config.default_lang),
            &pick(country, &self.config.default_country),
        )
    }

    async fn load(&self, url: &::url::Url) -> Result<InitContext, Error> {
        let html = self.fetcher.get_text(url).await?;
        Ok(locate(&html)?)
    }

    pub async fn search(&self, query: &SearchQuery, locale: &Locale) -> Result<Page, Error> {
        let keyword = query.validate()?;
        let init = self.load(&self.endpoints.search(keyword, query.filter, locale)).await?;

        let walk = walk_search(search_contents(&init.initial_data)?, query.include_playlists);
        let handle = PaginationHandle::first_page(&init, walk.continuation.clone(), locale);

        Ok(Page::from_walk(walk, handle).truncate(query.limit))
    }

    pub async fn next_search_page(
        &self, handle: &PaginationHandle, locale: &Locale, include_playlists: bool, limit: usize,
    ) -> Result<Page, Error> {
        let surface = ContinuationSurface::Search { include_playlists };
        let page = next_page(&self.fetcher, &self.endpoints, handle, surface, locale).await?;
        Ok(page.truncate(limit))
    }

    pub async fn home_feed(&self, locale: &Locale) -> Result<Page, Error> {
        let init = self.load(&self.endpoints.home(locale)).await?;

        let walk = walk_home(home_contents(&init.initial_data)?);
        let handle = PaginationHandle::first_page(&init, walk.continuation.clone(), locale);

        Ok(Page::from_walk(walk, handle))
    }

    pub async fn next_home_feed_page(&self, handle: &PaginationHandle, locale: &Locale) -> Result<Page, Error> {
        next_page(&self.fetcher, &self.endpoints, handle, ContinuationSurface::HomeFeed, locale).await
    }

    pub async fn trending(&self, tab: TrendingTab, locale: &Locale, limit: usize) -> Result<Page, Error> {
        let init = self.load(&self.endpoints.trending(tab, locale)).await?;

        let walk = walk_trending(trending_contents(&init.initial_data, tab.index())?);
        let handle = PaginationHandle::first_page(&init, walk.continuation.clone(), locale);

        Ok(Page::from_walk(walk, handle).truncate(limit))
    }

    pub async fn playlist(&self, playlist_id: &str, limit: usize) -> Result<PlaylistPage, Error> {
        let playlist_id = playlist_id.trim();
        if playlist_id.is_empty() {
            return Err(Error::InvalidInput("playlist id cannot be empty".into()));
        }

        let init = self.load(&self.endpoints.playlist(playlist_id)).await?;
        let (mut walk, metadata) = extract_playlist(&init.initial_data, playlist_id)?;
        if limit > 0 {
            walk.items.truncate(limit);
        }

        Ok(PlaylistPage {
            items: walk.items,
            metadata,
            has_more: walk.continuation.is_some(),
            skipped: walk.skipped,
        })
    }

    pub async fn video_with_suggestions(&self, video_id: &str, locale: &Locale) -> Result<VideoDetail, Error> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(Error::InvalidInput("video id cannot be empty".into()));
        }

        let init = self.load(&self.endpoints.watch(video_id, locale)).await?;
        extract_watch_next(&init.initial_data, video_id)
    }

    /// Channel title and avatar. Never fails: any failure yields the `"-"` sentinel.
    pub async fn channel_by_id(&self, channel_id: &str) -> ChannelSummary {
        match self.try_channel(channel_id.trim()).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("channel {} unavailable, returning placeholder: {}", channel_id, e);
                ChannelSummary::sentinel()
            }
        }
    }

    async fn try_channel(&self, channel_id: &str) -> Result<ChannelSummary, Error> {
        if channel_id.is_empty() {
            return Err(Error::InvalidInput("channel id cannot be empty".into()));
        }

        let url = self.endpoints.channel(channel_id);
        let init = self.load(&url).await?;
        extract_channel(&init.initial_data, channel_id, url.as_str())
    }

    /// Short-form cards from the home feed's shelves.
    pub async fn shorts(&self, locale: &Locale) -> Result<Vec<Short>, Error> {
        let init = self.load(&self.endpoints.home(locale)).await?;
        let walk = walk_shorts(home_contents(&init.initial_data)?);

        Ok(walk
            .items
            .into_iter()
            .filter_map(|item| match item {
                Item::Short(short) => Some(short),
                _ => None,
            })
            .collect())
    }

    /// Fetch a search page only to read its API token.
    pub async fn api_token(&self, query: &SearchQuery, locale: &Locale) -> Result<String, Error> {
        let keyword = query.validate()?;
        let init = self.load(&self.endpoints.search(keyword, query.filter, locale)).await?;
        init.api_token
            .ok_or_else(|| Error::MalformedResponse("search page carries no API token".into()))
    }
}
