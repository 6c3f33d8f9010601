//! Extraction engine for pages that embed their state as inline JSON.
//!
//! ### Pipeline
//! 1. `locate` pulls the initial data blob, API token and request context
//!    out of the raw HTML.
//! 2. A per-surface walker folds over the surface's container list, probing
//!    each node with `Fragment::classify`.
//! 3. Recognized cards are normalized into canonical `Item`s; everything else
//!    is counted as skipped.
//! 4. The continuation token (if any) becomes part of a `PaginationHandle`
//!    that the caller passes back for the next page.

pub mod fragment;
pub mod item;
pub mod locate;
pub mod pagination;
pub mod renderer;
pub mod walk;
pub mod watch;

pub use fragment::{Fragment, SkipReason};
pub use item::{Channel, ChannelSummary, Item, Playlist, PlaylistMetadata, Short, Thumbnail, Video};
pub use locate::{InitContext, LocateError, locate};
pub use pagination::{ContinuationSurface, NextPageContext, Page, PaginationHandle, next_page};
pub use walk::Walk;
pub use watch::VideoDetail;
