//! CLI module
//!
//! Command-line interface over a feed session.
//!
//! # Commands
//!
//! - `feed` - Show the feed, optionally several pages deep
//! - `post` - Publish a post and show the refreshed feed
//! - `follow` / `unfollow` - Change who you follow and show the refreshed feed

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{render_output, Runner};
