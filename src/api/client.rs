//! Feed API client

use super::input::{prepare_content, validate_username};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::FeedSource;
use crate::types::{
    ActionResponse, CreatePostRequest, FeedResponse, FollowRequest, Page, PostId,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};

pub const FOLLOWING_PATH: &str = "/api/post/following";
pub const CREATE_POST_PATH: &str = "/api/post/create";
pub const FOLLOWER_ADD_PATH: &str = "/api/user/follower/add";
pub const FOLLOWER_REMOVE_PATH: &str = "/api/user/follower/remove";

/// Query parameter carrying the cursor
pub const OFFSET_PARAM: &str = "offset";

const CREATE_POST: &str = "create post";
const FOLLOW_USER: &str = "follow user";
const UNFOLLOW_USER: &str = "unfollow user";

/// Client for the feed backend
#[derive(Debug)]
pub struct FeedApi {
    http: HttpClient,
}

impl FeedApi {
    /// Wrap an existing HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build a client from a validated config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(HttpClient::with_config(config.http_config())?))
    }

    /// Fetch one page of the "following" feed
    ///
    /// `None` asks for the top of the feed; otherwise the page strictly
    /// after `cursor` in the server's feed order.
    pub async fn following(&self, cursor: Option<PostId>) -> Result<Page> {
        let mut request = RequestConfig::new();
        if let Some(cursor) = cursor {
            request = request.query(OFFSET_PARAM, cursor.to_string());
        }

        let resp: FeedResponse = self
            .http
            .request_json(Method::GET, FOLLOWING_PATH, request)
            .await
            .map_err(|e| Error::feed_load(describe_failure(&e)))?;

        if !resp.success {
            return Err(Error::feed_load(
                resp.reason
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }

        debug!(
            "Fetched {} posts (cursor={:?}, end={})",
            resp.posts.len(),
            cursor,
            resp.end
        );
        Ok(resp.into())
    }

    /// Publish a new post
    pub async fn create_post(&self, content: &str) -> Result<()> {
        let content = prepare_content(content)?;
        self.mutate(
            CREATE_POST,
            Method::PUT,
            CREATE_POST_PATH,
            &CreatePostRequest { content: &content },
        )
        .await
    }

    /// Start following `username`
    pub async fn follow(&self, username: &str) -> Result<()> {
        let username = validate_username(username)?;
        self.mutate(
            FOLLOW_USER,
            Method::POST,
            FOLLOWER_ADD_PATH,
            &FollowRequest { username },
        )
        .await
    }

    /// Stop following `username`
    pub async fn unfollow(&self, username: &str) -> Result<()> {
        let username = validate_username(username)?;
        self.mutate(
            UNFOLLOW_USER,
            Method::DELETE,
            FOLLOWER_REMOVE_PATH,
            &FollowRequest { username },
        )
        .await
    }

    async fn mutate<B: Serialize>(
        &self,
        action: &str,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let body = serde_json::to_value(body)?;
        let resp: ActionResponse = self
            .http
            .request_json(method, path, RequestConfig::new().json(body))
            .await
            .map_err(|e| Error::action(action, describe_failure(&e)))?;

        if !resp.success {
            return Err(Error::action(
                action,
                resp.reason
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }

        info!("{} succeeded", action);
        Ok(())
    }
}

#[async_trait]
impl FeedSource for FeedApi {
    async fn fetch_following(&self, cursor: Option<PostId>) -> Result<Page> {
        self.following(cursor).await
    }
}

/// Human-readable failure text, preferring the backend's own `reason`
fn describe_failure(err: &Error) -> String {
    if let Error::HttpStatus { status, body } = err {
        if let Ok(ActionResponse {
            reason: Some(reason),
            ..
        }) = serde_json::from_str::<ActionResponse>(body)
        {
            return format!("HTTP {status}: {reason}");
        }
    }
    err.to_string()
}
