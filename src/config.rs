//! Client configuration
//!
//! `ClientConfig` is loaded from a YAML file and then overridden by CLI
//! flags. Every field has a default so an empty file is a valid config.
//!
//! ```yaml
//! base_url: https://feed.example.com
//! timeout_secs: 10
//! headers:
//!   Cookie: token=abc123
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! notices:
//!   action_ttl_ms: 3000
//!   feed_ttl_ms: 5000
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the feed backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Client-side rate limit; omitted means unlimited
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,

    /// Notice timings
    #[serde(default)]
    pub notices: NoticeConfig,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: HashMap::new(),
            rate_limit: None,
            notices: NoticeConfig::default(),
        }
    }
}

/// Rate limit section
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_burst() -> u32 {
    1
}

/// How long transient notices stay visible
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_action_ttl_ms")]
    pub action_ttl_ms: u64,
    #[serde(default = "default_feed_ttl_ms")]
    pub feed_ttl_ms: u64,
}

fn default_action_ttl_ms() -> u64 {
    3_000
}

fn default_feed_ttl_ms() -> u64 {
    5_000
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            action_ttl_ms: default_action_ttl_ms(),
            feed_ttl_ms: default_feed_ttl_ms(),
        }
    }
}

impl NoticeConfig {
    pub fn action_ttl(&self) -> Duration {
        Duration::from_millis(self.action_ttl_ms)
    }

    pub fn feed_ttl(&self) -> Duration {
        Duration::from_millis(self.feed_ttl_ms)
    }
}

// ============================================================================
// Loading
// ============================================================================

impl ClientConfig {
    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Check that the config is usable
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::config(
                    "rate_limit.requests_per_second must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Add or replace a default header
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Build the HTTP client config this file describes
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));

        builder = match self.rate_limit {
            Some(limit) => builder.rate_limit(RateLimiterConfig::new(
                limit.requests_per_second,
                limit.burst_size,
            )),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}

/// Parse a `Key: Value` header argument
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once(':')
        .ok_or_else(|| Error::config(format!("Header must look like 'Key: Value', got '{raw}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::config(format!("Header name is empty in '{raw}'")));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = ClientConfig::from_yaml_str("").unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.rate_limit.is_none());
        assert_eq!(config.notices.action_ttl(), Duration::from_secs(3));
        assert_eq!(config.notices.feed_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
base_url: https://feed.example.com
timeout_secs: 10
user_agent: tester/1.0
headers:
  Cookie: token=abc
rate_limit:
  requests_per_second: 5
notices:
  action_ttl_ms: 100
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.base_url, "https://feed.example.com");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.user_agent.as_deref(), Some("tester/1.0"));
        assert_eq!(config.headers.get("Cookie").map(String::as_str), Some("token=abc"));
        assert_eq!(config.rate_limit.unwrap().burst_size, 1);
        assert_eq!(config.notices.action_ttl_ms, 100);
        assert_eq!(config.notices.feed_ttl_ms, 5_000);

        let http = config.http_config();
        assert_eq!(http.base_url.as_deref(), Some("https://feed.example.com"));
        assert_eq!(http.timeout, Duration::from_secs(10));
        assert_eq!(http.user_agent, "tester/1.0");
        assert!(http.rate_limit.is_some());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_yaml_str("base_url: not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::from_yaml_str("base_url: ftp://example.com"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            ClientConfig::from_yaml_str("timeout_secs: 0"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            ClientConfig::from_yaml_str("rate_limit:\n  requests_per_second: 0"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://localhost:9999").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to read config file /definitely/not/here.yaml"));
        assert!(message.contains("IO error"));
    }

    #[test]
    fn test_from_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs: [not, a, number]").unwrap();

        let err = ClientConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default()
            .with_base_url("http://other:1")
            .with_header("X-Test", "1");
        assert_eq!(config.base_url, "http://other:1");
        assert_eq!(config.http_config().default_headers.get("X-Test").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Cookie: token=a:b").unwrap(),
            ("Cookie".to_string(), "token=a:b".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }
}
