//! # followfeed
//!
//! Async client and cursor paginator for a minimal follow-based social feed.
//!
//! ## Features
//!
//! - **Cursor Pagination**: forward-only paging with reset/continue, guarded
//!   against overlapping loads and stale responses
//! - **Typed REST API**: feed, create post, follow, unfollow
//! - **Transient Notices**: failures flash a message that clears once every
//!   overlapping failure has timed out
//! - **Safe Rendering**: escaped HTML or plain text output
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use followfeed::{ClientConfig, FeedSession, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::from_file("followfeed.yaml")?;
//!     let session = FeedSession::from_config(&config)?;
//!
//!     session.refresh().await?;
//!     while session.view(|v| v.has_more()) {
//!         session.load_more().await?;
//!     }
//!
//!     session.follow("someone").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      FeedSession                          │
//! │  refresh()  load_more()  create_post()  follow/unfollow() │
//! └──────────────────────────────────────────────────────────┘
//!          │                     │                    │
//! ┌────────┴───────┐   ┌─────────┴────────┐   ┌───────┴──────┐
//! │ FeedPaginator  │   │     FeedApi      │   │ NoticeBoard  │
//! │ cursor / end   │──▶│ GET/PUT/POST/DEL │   │ counted      │
//! │ generation     │   │ over HttpClient  │   │ debounce     │
//! └────────┬───────┘   └──────────────────┘   └──────────────┘
//!          ▼
//! ┌────────────────┐
//! │ FeedRenderer   │
//! │ (FeedView)     │
//! └────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Domain and wire types
pub mod types;

/// Client configuration
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// Feed backend endpoints
pub mod api;

/// Cursor pagination
pub mod pagination;

/// Render collaborator and HTML escaping
pub mod render;

/// Transient error notices
pub mod notice;

/// Session controller
pub mod session;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use api::FeedApi;
pub use config::ClientConfig;
pub use notice::NoticeBoard;
pub use pagination::{FeedPaginator, FeedSource, LoadOutcome, SkipReason};
pub use render::{FeedRenderer, FeedView};
pub use session::FeedSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
