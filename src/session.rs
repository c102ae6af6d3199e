//! Feed session controller
//!
//! Ties the API client, the paginator and the notice board together the
//! way the home page does: every successful mutation refreshes the feed,
//! every failure puts up a transient notice, and nothing is retried.

use crate::api::FeedApi;
use crate::config::{ClientConfig, NoticeConfig};
use crate::error::{Error, Result};
use crate::notice::{NoticeBoard, ACTION_FAILED_MESSAGE, FEED_FAILED_MESSAGE};
use crate::pagination::{FeedPaginator, LoadOutcome};
use crate::render::FeedView;
use std::sync::Arc;
use tracing::warn;

/// One user's view of the feed
#[derive(Debug)]
pub struct FeedSession {
    api: Arc<FeedApi>,
    paginator: FeedPaginator<Arc<FeedApi>>,
    notices: NoticeBoard,
    timings: NoticeConfig,
}

impl FeedSession {
    /// Create a session over an API client
    pub fn new(api: FeedApi, timings: NoticeConfig) -> Self {
        let api = Arc::new(api);
        Self {
            paginator: FeedPaginator::new(api.clone()),
            api,
            notices: NoticeBoard::new(),
            timings,
        }
    }

    /// Create a session from a config file's contents
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(FeedApi::from_config(config)?, config.notices))
    }

    /// Reload the feed from the top
    pub async fn refresh(&self) -> Result<LoadOutcome> {
        self.paginator
            .reset()
            .await
            .inspect_err(|_| self.feed_failed())
    }

    /// Load the page after the last post shown
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        self.paginator
            .load_more()
            .await
            .inspect_err(|_| self.feed_failed())
    }

    /// Publish a post, then refresh
    ///
    /// Returns the refresh outcome, or `None` if the post went through but
    /// the refresh failed (that failure has its own notice).
    pub async fn create_post(&self, content: &str) -> Result<Option<LoadOutcome>> {
        let result = self.api.create_post(content).await;
        self.after_action(result).await
    }

    /// Follow a user, then refresh
    pub async fn follow(&self, username: &str) -> Result<Option<LoadOutcome>> {
        let result = self.api.follow(username).await;
        self.after_action(result).await
    }

    /// Unfollow a user, then refresh
    pub async fn unfollow(&self, username: &str) -> Result<Option<LoadOutcome>> {
        let result = self.api.unfollow(username).await;
        self.after_action(result).await
    }

    /// Read the rendered feed
    pub fn view<T>(&self, f: impl FnOnce(&FeedView) -> T) -> T {
        self.paginator.view(f)
    }

    pub fn paginator(&self) -> &FeedPaginator<Arc<FeedApi>> {
        &self.paginator
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    async fn after_action(&self, result: Result<()>) -> Result<Option<LoadOutcome>> {
        match result {
            Ok(()) => Ok(self.refresh().await.ok()),
            // Nothing was sent; the input box just stays as it is
            Err(e @ Error::InvalidInput { .. }) => Err(e),
            Err(e) => {
                warn!("{}", e);
                self.notices
                    .raise(ACTION_FAILED_MESSAGE, self.timings.action_ttl());
                Err(e)
            }
        }
    }

    fn feed_failed(&self) {
        self.notices
            .raise(FEED_FAILED_MESSAGE, self.timings.feed_ttl());
    }
}
