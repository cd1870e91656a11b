//! Crawler module: fetching, extraction, and traversal
//!
//! - HTTP fetching with typed failure classification
//! - Link extraction from HTML
//! - Frontier and visited-set management
//! - Breadth-first crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::{CrawlHandle, CrawlSummary, Crawler};
pub use extractor::extract_links;
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use frontier::{Frontier, FrontierEntry};

use crate::config::CrawlConfig;
use crate::output::{CollectSink, PageEvent};
use crate::Result;

/// Runs a complete crawl and returns the collected event stream.
///
/// Convenience over [`Crawler::run`] for callers that want the events as a
/// list rather than delivered incrementally to a sink.
pub async fn crawl(config: CrawlConfig) -> Result<Vec<PageEvent>> {
    let crawler = Crawler::new(config)?;
    let mut sink = CollectSink::default();
    crawler.run(&mut sink).await?;
    Ok(sink.events)
}
