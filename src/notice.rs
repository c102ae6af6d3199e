//! Transient error notices
//!
//! A failed request shows a short message that clears itself after a delay.
//! When failures overlap, the message stays up until the timer of the last
//! one has fired: every raise bumps a counter, every expiry bumps another,
//! and the message clears only when the two meet.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Shown when a post, follow or unfollow request fails
pub const ACTION_FAILED_MESSAGE: &str = "Something went wrong! Try again in a few moments...";

/// Shown when loading the feed fails
pub const FEED_FAILED_MESSAGE: &str =
    "Something went wrong loading the posts! Try again in a few moments...";

#[derive(Debug, Default)]
struct NoticeState {
    message: Option<String>,
    raised: u64,
    expired: u64,
}

/// Counted-debounce notice slot
///
/// Cloning yields another handle to the same slot.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    inner: Arc<Mutex<NoticeState>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` now and schedule its expiry after `ttl`
    ///
    /// Must be called from within a tokio runtime.
    pub fn raise(&self, message: impl Into<String>, ttl: Duration) -> JoinHandle<()> {
        let message = message.into();
        {
            let mut state = self.lock();
            state.raised += 1;
            debug!("Raising notice #{}: {}", state.raised, message);
            state.message = Some(message);
        }

        let board = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            board.expire_one();
        })
    }

    /// The message currently shown, if any
    pub fn current(&self) -> Option<String> {
        self.lock().message.clone()
    }

    /// Number of notices whose timers have not fired yet
    pub fn pending(&self) -> u64 {
        let state = self.lock();
        state.raised - state.expired
    }

    fn expire_one(&self) {
        let mut state = self.lock();
        state.expired += 1;
        if state.expired == state.raised {
            debug!("All {} notices expired, clearing", state.raised);
            state.message = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, NoticeState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
