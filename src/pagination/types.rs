//! Pagination types and traits
//!
//! Defines the cursor state owned by the paginator, the outcome of a load,
//! and the remote fetch seam.

use crate::error::Result;
use crate::types::{LoadMode, Page, Post, PostId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Remote collaborator that serves the "following" feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the page after `cursor`, or the first page when `cursor` is `None`
    async fn fetch_following(&self, cursor: Option<PostId>) -> Result<Page>;
}

#[async_trait]
impl<S: FeedSource + ?Sized> FeedSource for Arc<S> {
    async fn fetch_following(&self, cursor: Option<PostId>) -> Result<Page> {
        (**self).fetch_following(cursor).await
    }
}

/// Why a load was answered without touching the network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The feed already reported its end
    Exhausted,
    /// A fetch for the current generation is still pending
    InFlight,
    /// Nothing has been loaded yet, so there is no position to continue from
    NotStarted,
}

/// A page that was applied to the paginator's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    pub mode: LoadMode,
    /// Posts in the order the server returned them
    pub posts: Vec<Post>,
    /// Whether "load more" should be offered
    pub has_more: bool,
    /// Cursor after applying the page
    pub cursor: Option<PostId>,
}

/// Result of a single `load_page` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and applied
    Loaded(LoadedPage),
    /// No fetch was issued
    Skipped(SkipReason),
    /// The response arrived after a newer reset and was discarded
    Stale,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }

    /// The applied page, if any
    pub fn page(&self) -> Option<&LoadedPage> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }
}

/// Cursor state of one paginator
///
/// `cursor` and `end` only change when a page from the current generation
/// is applied. `generation` is bumped on every reset; `in_flight` guards
/// the current generation only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    /// Id of the last post applied, `None` means top of feed
    pub cursor: Option<PostId>,
    /// The feed has no pages beyond the cursor
    pub end: bool,
    /// At least one page has been applied
    pub loaded: bool,
    /// Bumped on every reset
    pub generation: u64,
    /// A fetch for `generation` is pending
    pub in_flight: bool,
}

impl CursorState {
    /// Create a fresh state: no cursor, not at end
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a reset; returns the generation ticket for the fetch
    pub fn begin_reset(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = true;
        self.generation
    }

    /// Start a continue; returns the ticket and the cursor to send
    pub fn begin_continue(&mut self) -> std::result::Result<(u64, PostId), SkipReason> {
        if self.in_flight {
            return Err(SkipReason::InFlight);
        }
        if self.end {
            return Err(SkipReason::Exhausted);
        }
        let cursor = match (self.loaded, self.cursor) {
            (true, Some(cursor)) => cursor,
            _ => return Err(SkipReason::NotStarted),
        };
        self.in_flight = true;
        Ok((self.generation, cursor))
    }

    /// Whether a response with this ticket may still be applied
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }

    /// Release the in-flight guard after a failed fetch
    ///
    /// Cursor and end are left exactly as they were.
    pub fn fail(&mut self, ticket: u64) {
        if self.is_current(ticket) {
            self.in_flight = false;
        }
    }

    /// Apply a fetched page
    ///
    /// Returns `false` (and changes nothing) if the ticket is stale.
    pub fn apply(&mut self, ticket: u64, mode: LoadMode, page: &Page) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        match mode {
            // Replace, never merge, with the previous session position
            LoadMode::Reset => self.cursor = page.last_id(),
            LoadMode::Continue => {
                if let Some(id) = page.last_id() {
                    self.cursor = Some(id);
                }
            }
        }

        self.end = page.end;
        if page.is_empty() && !page.end {
            // No post id to advance to; asking again would return the same page
            warn!(
                "Feed returned an empty page without end flag (mode={:?}), treating as end of feed",
                mode
            );
            self.end = true;
        }

        self.loaded = true;
        self.in_flight = false;
        true
    }
}
