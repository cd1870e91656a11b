//! Crawl configuration
//!
//! A [`CrawlConfig`] is constructed once before a crawl starts and never
//! mutated afterwards. Construction validates the start URL before any
//! network activity happens.

use crate::{CrawlError, Result};
use std::time::Duration;
use url::Url;

/// Default maximum crawl depth
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default per-page link limit
pub const DEFAULT_LINK_LIMIT: usize = 10;

/// Default cap on frontier size; exceeding it aborts the crawl
pub const DEFAULT_MAX_FRONTIER: usize = 10_000;

/// Immutable configuration for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The validated seed URL
    pub start_url: Url,

    /// Maximum depth to follow links to (the seed is depth 1)
    pub max_depth: u32,

    /// Maximum number of anchors considered per page
    pub link_limit: usize,

    /// Host substrings that exclude a URL from crawling
    pub excluded_domains: Vec<String>,

    /// User-agent sent with every request and used for robots evaluation
    pub user_agent: String,

    /// Maximum number of concurrent page fetches (1 = sequential)
    pub max_concurrency: usize,

    /// Maximum number of frontier entries before the crawl aborts
    pub max_frontier: usize,

    /// Total per-request timeout
    pub request_timeout: Duration,

    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl CrawlConfig {
    /// Builds a configuration from a raw start URL, applying defaults for
    /// everything else.
    ///
    /// Returns [`CrawlError::InvalidStartUrl`] if the string is not an
    /// absolute http(s) URL with a host.
    pub fn new(start_url: &str) -> Result<Self> {
        let url = crate::url::parse_start_url(start_url)
            .map_err(|e| CrawlError::InvalidStartUrl {
                url: start_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            start_url: url,
            max_depth: DEFAULT_MAX_DEPTH,
            link_limit: DEFAULT_LINK_LIMIT,
            excluded_domains: Vec::new(),
            user_agent: default_user_agent(),
            max_concurrency: 1,
            max_frontier: DEFAULT_MAX_FRONTIER,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        })
    }

    /// Sets the maximum crawl depth. Must be at least 1.
    pub fn with_max_depth(mut self, depth: u32) -> Result<Self> {
        if depth < 1 {
            return Err(CrawlError::Config(format!(
                "max_depth must be >= 1, got {depth}"
            )));
        }
        self.max_depth = depth;
        Ok(self)
    }

    /// Sets the per-page link limit.
    pub fn with_link_limit(mut self, limit: usize) -> Self {
        self.link_limit = limit;
        self
    }

    /// Sets the excluded domain substrings.
    pub fn with_excluded_domains(mut self, domains: Vec<String>) -> Self {
        self.excluded_domains = domains;
        self
    }

    /// Sets the user-agent string. Must be non-empty.
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self> {
        if user_agent.trim().is_empty() {
            return Err(CrawlError::Config(
                "user_agent cannot be empty".to_string(),
            ));
        }
        self.user_agent = user_agent.to_string();
        Ok(self)
    }

    /// Sets the number of concurrent page fetches. Must be at least 1.
    pub fn with_max_concurrency(mut self, n: usize) -> Result<Self> {
        if n < 1 {
            return Err(CrawlError::Config(format!(
                "max_concurrency must be >= 1, got {n}"
            )));
        }
        self.max_concurrency = n;
        Ok(self)
    }

    /// Sets the frontier size cap. Must be at least 1.
    pub fn with_max_frontier(mut self, cap: usize) -> Result<Self> {
        if cap < 1 {
            return Err(CrawlError::Config(format!(
                "max_frontier must be >= 1, got {cap}"
            )));
        }
        self.max_frontier = cap;
        Ok(self)
    }
}

/// The user-agent used when the caller does not supply one
fn default_user_agent() -> String {
    format!("hopcrawl/{}", env!("CARGO_PKG_VERSION"))
}
