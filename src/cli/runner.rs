//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{parse_header, ClientConfig};
use crate::error::Result;
use crate::pagination::LoadOutcome;
use crate::render::FeedView;
use crate::session::FeedSession;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.client_config()?;
        let session = FeedSession::from_config(&config)?;

        let result = self.execute(&session).await;

        // Surface the notice a browser would have flashed
        if let Some(notice) = session.notices().current() {
            eprintln!("{notice}");
        }
        result?;

        print!("{}", render_output(&session, self.cli.format)?);
        Ok(())
    }

    async fn execute(&self, session: &FeedSession) -> Result<()> {
        match &self.cli.command {
            Commands::Feed { pages } => self.feed(session, *pages).await,
            Commands::Post { content } => session.create_post(content).await.map(|_| ()),
            Commands::Follow { username } => session.follow(username).await.map(|_| ()),
            Commands::Unfollow { username } => session.unfollow(username).await.map(|_| ()),
        }
    }

    /// Load the first page, then keep going until `pages` or the end of the feed
    async fn feed(&self, session: &FeedSession, pages: usize) -> Result<()> {
        session.refresh().await?;

        for page in 1..pages {
            match session.load_more().await? {
                LoadOutcome::Loaded(_) => debug!("Loaded page {}", page + 1),
                LoadOutcome::Skipped(reason) => {
                    info!("Stopped after {} pages: {:?}", page, reason);
                    break;
                }
                LoadOutcome::Stale => break,
            }
        }
        Ok(())
    }

    /// Config file (or defaults) with command-line overrides applied
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config = config.with_base_url(base_url);
        }
        for raw in &self.cli.headers {
            let (key, value) = parse_header(raw)?;
            config = config.with_header(key, value);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Render the session's feed in the requested format
pub fn render_output(session: &FeedSession, format: OutputFormat) -> Result<String> {
    let now = Utc::now();
    let cursor = session.paginator().cursor();
    session.view(|view: &FeedView| match format {
        OutputFormat::Pretty => Ok(view.render_text(now)),
        OutputFormat::Html => Ok(view.render_html(now)),
        OutputFormat::Json => {
            let doc = json!({
                "posts": view.posts(),
                "has_more": view.has_more(),
                "cursor": cursor,
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
    })
}
