//! Pagination module
//!
//! # Overview
//!
//! The feed is paged forward with a cursor: the id of the last post shown.
//! [`FeedPaginator::load_page`] either starts over ([`LoadMode::Reset`],
//! no cursor sent) or asks for the page after the cursor
//! ([`LoadMode::Continue`], sent as `?offset=<cursor>`).
//!
//! Guarantees:
//! - the cursor only moves after a successful fetch, to the last post of
//!   the page just applied
//! - once the feed reports its end, no continue is sent until a reset
//! - at most one fetch per generation is pending; extra continues are skipped
//! - a reset supersedes anything pending; late responses are dropped
//!
//! [`LoadMode::Reset`]: crate::types::LoadMode::Reset
//! [`LoadMode::Continue`]: crate::types::LoadMode::Continue

mod paginator;
mod types;

pub use paginator::FeedPaginator;
pub use types::{CursorState, FeedSource, LoadOutcome, LoadedPage, SkipReason};
