//! Local checks applied before a mutation is sent

use crate::error::{Error, Result};
use crate::types::MAX_POST_LENGTH;
use std::borrow::Cow;
use tracing::debug;

/// Prepare post content for submission
///
/// Empty content is rejected. Content longer than [`MAX_POST_LENGTH`]
/// characters is cut to that many characters, never inside a character.
pub fn prepare_content(content: &str) -> Result<Cow<'_, str>> {
    if content.is_empty() {
        return Err(Error::invalid_input("post content is empty"));
    }

    match content.char_indices().nth(MAX_POST_LENGTH) {
        Some((cut, _)) => {
            debug!(
                "Truncating post content to {} characters",
                MAX_POST_LENGTH
            );
            Ok(Cow::Owned(content[..cut].to_string()))
        }
        None => Ok(Cow::Borrowed(content)),
    }
}

/// Check a username typed into the follow box
pub fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::invalid_input("username is empty"));
    }
    Ok(username)
}
