//! Client code for tubex.
//!
//! This crate provides the page transport, the extraction engine for pages
//! that embed their state as inline JSON, and the `TubeClient` facade used by
//! the server.

pub mod client;
pub mod fetch;
pub mod innertube;

#[cfg(test)]
mod testing;

pub use client::{PlaylistPage, SearchQuery, TubeClient};
pub use fetch::{ContentType, Endpoints, FetchClient, FetchConfig, Locale, PageFetcher, TrendingTab};
pub use innertube::{ChannelSummary, Item, Page, PaginationHandle, Short, VideoDetail, Video};
