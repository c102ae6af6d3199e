//! Feed backend API
//!
//! Typed wrappers for the four REST endpoints the feed page talks to:
//!
//! | Endpoint                           | Method   | Body           |
//! |------------------------------------|----------|----------------|
//! | `/api/post/following[?offset=ID]`  | `GET`    |                |
//! | `/api/post/create`                 | `PUT`    | `{content}`    |
//! | `/api/user/follower/add`           | `POST`   | `{username}`   |
//! | `/api/user/follower/remove`        | `DELETE` | `{username}`   |
//!
//! Every response carries a `success` flag; `false` is treated the same as
//! a transport failure.

mod client;
mod input;

pub use client::{
    FeedApi, CREATE_POST_PATH, FOLLOWER_ADD_PATH, FOLLOWER_REMOVE_PATH, FOLLOWING_PATH,
    OFFSET_PARAM,
};
pub use input::{prepare_content, validate_username};

#[cfg(test)]
mod tests;
