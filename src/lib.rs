//! Hopcrawl: a bounded-depth polite web crawler
//!
//! Starting from a seed URL, hopcrawl discovers anchor links on HTML pages and
//! follows them breadth-first up to a configured depth, honoring robots.txt
//! per origin and a caller-supplied domain exclusion list. Each processed page
//! produces a structured event delivered to an [`output::EventSink`].

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Errors that are fatal for a whole crawl run
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid start URL '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("Frontier exceeded the configured cap of {limit} entries")]
    FrontierOverflow { limit: usize },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors for a single page fetch; never fatal for the crawl
///
/// Serializable so page events carrying a failure can be encoded as-is.
#[derive(Debug, Clone, Error, serde::Serialize)]
pub enum FetchError {
    #[error("Response is not HTML (content-type: {content_type})")]
    NonHtml { content_type: String },

    #[error("HTTP status {status}")]
    Http { status: u16 },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timed out")]
    Timeout,
}

/// Errors while fetching robots.txt; recovered by the fail-open policy
#[derive(Debug, Clone, Error, serde::Serialize)]
pub enum RobotsFetchError {
    #[error("robots.txt returned HTTP status {status}")]
    Http { status: u16 },

    #[error("Network error fetching robots.txt: {message}")]
    Network { message: String },

    #[error("robots.txt request timed out")]
    Timeout,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Result type alias for crawl-level operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{crawl, CrawlHandle, CrawlSummary, Crawler};
pub use output::{CollectSink, EventSink, LogSink, PageEvent, PageOutcome};
pub use robots::{RobotsDecision, RobotsGate};
