//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// followfeed CLI
#[derive(Parser, Debug)]
#[command(name = "followfeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides the config file)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Extra request header, e.g. "Cookie: token=..." (repeatable)
    #[arg(short = 'H', long = "header", global = true)]
    pub headers: Vec<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the feed of followed users
    Feed {
        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Publish a post (truncated to 280 characters), then show the feed
    Post {
        /// Post content
        content: String,
    },

    /// Follow a user, then show the feed
    Follow {
        /// Username to follow
        username: String,
    },

    /// Unfollow a user, then show the feed
    Unfollow {
        /// Username to unfollow
        username: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON document with posts, cursor and end flag
    Json,
    /// Human-readable text
    Pretty,
    /// Escaped HTML fragment
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed_with_globals() {
        let cli = Cli::try_parse_from([
            "followfeed",
            "feed",
            "--pages",
            "3",
            "--base-url",
            "http://localhost:1",
            "-H",
            "Cookie: token=x",
            "-f",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Feed { pages: 3 }));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:1"));
        assert_eq!(cli.headers, vec!["Cookie: token=x".to_string()]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_mutations() {
        let cli = Cli::try_parse_from(["followfeed", "post", "a & b"]).unwrap();
        assert!(matches!(cli.command, Commands::Post { ref content } if content == "a & b"));
        assert_eq!(cli.format, OutputFormat::Pretty);

        let cli = Cli::try_parse_from(["followfeed", "unfollow", "bob"]).unwrap();
        assert!(matches!(cli.command, Commands::Unfollow { ref username } if username == "bob"));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["followfeed"]).is_err());
    }
}
