//! Feed paginator
//!
//! Forward-only, cursor-based pagination over the "following" feed.

use super::types::{CursorState, FeedSource, LoadOutcome, LoadedPage, SkipReason};
use crate::error::Result;
use crate::render::{FeedRenderer, FeedView};
use crate::types::{LoadMode, Page, PostId};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

struct Inner<R> {
    state: CursorState,
    renderer: R,
}

/// Cursor paginator over a [`FeedSource`], writing into a [`FeedRenderer`]
///
/// State lives behind a mutex that is never held across an await, so a
/// paginator can be shared (e.g. in an `Arc`) between tasks that race each
/// other. Overlapping continues are rejected, and responses that outlive a
/// newer reset are dropped.
pub struct FeedPaginator<S, R = FeedView> {
    source: S,
    inner: Mutex<Inner<R>>,
}

impl<S: FeedSource> FeedPaginator<S, FeedView> {
    /// Create a paginator rendering into a fresh [`FeedView`]
    pub fn new(source: S) -> Self {
        Self::with_renderer(source, FeedView::new())
    }
}

impl<S: FeedSource, R: FeedRenderer> FeedPaginator<S, R> {
    /// Create a paginator with a custom renderer
    pub fn with_renderer(source: S, renderer: R) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: CursorState::new(),
                renderer,
            }),
        }
    }

    /// Load the first page (`Reset`) or the page after the cursor (`Continue`)
    ///
    /// A failed fetch returns `Error::FeedLoad` and leaves cursor and end
    /// flag untouched.
    ///
    /// A reset does not clear the renderer before fetching; the fresh page
    /// replaces it only once the fetch succeeds, so a failed reset keeps
    /// the rendered posts in step with the unchanged cursor.
    pub async fn load_page(&self, mode: LoadMode) -> Result<LoadOutcome> {
        let (ticket, cursor) = {
            let mut inner = self.lock();
            match mode {
                LoadMode::Reset => (inner.state.begin_reset(), None),
                LoadMode::Continue => match inner.state.begin_continue() {
                    Ok((ticket, cursor)) => (ticket, Some(cursor)),
                    Err(reason) => {
                        debug!("Skipping continue: {:?}", reason);
                        return Ok(LoadOutcome::Skipped(reason));
                    }
                },
            }
        };

        debug!(
            "Fetching feed page: mode={:?}, cursor={:?}, generation={}",
            mode, cursor, ticket
        );
        let fetched = self.source.fetch_following(cursor).await;

        let mut inner = self.lock();
        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                if !inner.state.is_current(ticket) {
                    debug!("Dropping failure from superseded generation {}", ticket);
                    return Ok(LoadOutcome::Stale);
                }
                inner.state.fail(ticket);
                warn!("Feed load failed (mode={:?}): {}", mode, e);
                return Err(e.into_feed_load());
            }
        };

        if !inner.state.apply(ticket, mode, &page) {
            debug!(
                "Dropping stale page from generation {} (current {})",
                ticket, inner.state.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        let has_more = !inner.state.end;
        let Page { posts, .. } = page;
        match mode {
            LoadMode::Reset => inner.renderer.replace(&posts, has_more),
            LoadMode::Continue => inner.renderer.append(&posts, has_more),
        }

        info!(
            "Loaded {} posts (mode={:?}, cursor={:?}, has_more={})",
            posts.len(),
            mode,
            inner.state.cursor,
            has_more
        );

        Ok(LoadOutcome::Loaded(LoadedPage {
            mode,
            posts,
            has_more,
            cursor: inner.state.cursor,
        }))
    }

    /// Shorthand for `load_page(LoadMode::Reset)`
    pub async fn reset(&self) -> Result<LoadOutcome> {
        self.load_page(LoadMode::Reset).await
    }

    /// Shorthand for `load_page(LoadMode::Continue)`
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        self.load_page(LoadMode::Continue).await
    }

    /// Snapshot of the cursor state
    pub fn state(&self) -> CursorState {
        self.lock().state.clone()
    }

    pub fn cursor(&self) -> Option<PostId> {
        self.lock().state.cursor
    }

    pub fn is_end(&self) -> bool {
        self.lock().state.end
    }

    pub fn has_loaded(&self) -> bool {
        self.lock().state.loaded
    }

    pub fn generation(&self) -> u64 {
        self.lock().state.generation
    }

    /// Why a continue would be skipped right now, if it would
    pub fn continue_blocked(&self) -> Option<SkipReason> {
        let state = &self.lock().state;
        if state.in_flight {
            Some(SkipReason::InFlight)
        } else if state.end {
            Some(SkipReason::Exhausted)
        } else if !state.loaded || state.cursor.is_none() {
            Some(SkipReason::NotStarted)
        } else {
            None
        }
    }

    /// Read the renderer
    pub fn view<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.lock().renderer)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        // State is only mutated through CursorState methods that cannot panic midway
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, R> std::fmt::Debug for FeedPaginator<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("FeedPaginator");
        if let Ok(inner) = self.inner.try_lock() {
            dbg.field("state", &inner.state);
        }
        dbg.finish_non_exhaustive()
    }
}
