//! Common types used throughout followfeed
//!
//! This module contains the feed's domain types (posts, pages, cursors)
//! and the JSON envelopes exchanged with the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum post length, in characters
pub const MAX_POST_LENGTH: usize = 280;

// ============================================================================
// Posts
// ============================================================================

/// Opaque, unique identifier of a post
///
/// The backend orders its feed by this key; the client never does
/// arithmetic on it, it only echoes the last one it saw as the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single post as returned by the feed endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub creator_username: String,
    /// Creation time, unix seconds on the wire
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

// ============================================================================
// Pages
// ============================================================================

/// One batch of feed results plus the end-of-feed flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub posts: Vec<Post>,
    /// No further pages exist beyond this one
    pub end: bool,
}

impl Page {
    /// Create a page
    pub fn new(posts: Vec<Post>, end: bool) -> Self {
        Self { posts, end }
    }

    /// The id of the last post, which becomes the next cursor
    pub fn last_id(&self) -> Option<PostId> {
        self.posts.last().map(|p| p.post_id)
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }
}

/// Pagination mode for a single load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Start over from the top of the feed
    #[default]
    Reset,
    /// Advance past the current cursor
    Continue,
}

// ============================================================================
// Wire Envelopes
// ============================================================================

/// Response body of `GET /api/post/following`
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub success: bool,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub end: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<FeedResponse> for Page {
    fn from(resp: FeedResponse) -> Self {
        Self {
            posts: resp.posts,
            end: resp.end,
        }
    }
}

/// Response body of the mutation endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body of `PUT /api/post/create`
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest<'a> {
    pub content: &'a str,
}

/// Request body of the follower endpoints
#[derive(Debug, Clone, Serialize)]
pub struct FollowRequest<'a> {
    pub username: &'a str,
}
