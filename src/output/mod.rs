//! Crawl result events and sinks
//!
//! The core emits one [`PageEvent`] per dequeued-and-processed page and hands
//! it to an [`EventSink`]; formatting and persistence live entirely on the
//! sink side. Events are `Serialize` so downstream consumers can encode them
//! however they like.

use crate::FetchError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// What happened when a page was processed
#[derive(Debug, Clone, Serialize)]
pub enum PageOutcome {
    /// Fetched and parsed; carries the discovered links
    Crawled { links: Vec<Url> },

    /// The fetch failed; the page contributes zero links
    FetchFailed { error: FetchError },

    /// robots.txt denied the fetch; a policy skip, not an error
    RobotsDenied,
}

/// One entry in the crawl result stream
#[derive(Debug, Clone, Serialize)]
pub struct PageEvent {
    pub url: Url,
    pub depth: u32,
    pub timestamp: DateTime<Utc>,
    pub outcome: PageOutcome,
}

impl PageEvent {
    pub(crate) fn new(url: Url, depth: u32, outcome: PageOutcome) -> Self {
        Self {
            url,
            depth,
            timestamp: Utc::now(),
            outcome,
        }
    }

    /// Number of links discovered on this page (zero unless crawled).
    pub fn link_count(&self) -> usize {
        match &self.outcome {
            PageOutcome::Crawled { links } => links.len(),
            _ => 0,
        }
    }
}

/// Receiver for the crawl result stream
///
/// Called from the coordinator loop in emission order.
pub trait EventSink: Send {
    fn emit(&mut self, event: PageEvent);
}

/// Sink that logs each event through tracing
///
/// Mirrors the per-page report of the reference crawler: one line per page
/// with depth and link count, one line per discovered link.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: PageEvent) {
        match &event.outcome {
            PageOutcome::Crawled { links } => {
                tracing::info!(
                    "Depth: {}, URL: {}, Links: {}",
                    event.depth,
                    event.url,
                    links.len()
                );
                for link in links {
                    tracing::info!("{link}");
                }
            }
            PageOutcome::FetchFailed { error } => {
                tracing::warn!(
                    "Depth: {}, URL: {}, fetch failed: {}",
                    event.depth,
                    event.url,
                    error
                );
            }
            PageOutcome::RobotsDenied => {
                tracing::info!("Respecting robots.txt for {}", event.url);
            }
        }
    }
}

/// Sink that buffers every event, used by [`crate::crawl`] and in tests
#[derive(Debug, Default)]
pub struct CollectSink {
    pub events: Vec<PageEvent>,
}

impl EventSink for CollectSink {
    fn emit(&mut self, event: PageEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_link_count_crawled() {
        let event = PageEvent::new(
            url("https://a.test/"),
            1,
            PageOutcome::Crawled {
                links: vec![url("https://a.test/x"), url("https://a.test/y")],
            },
        );
        assert_eq!(event.link_count(), 2);
    }

    #[test]
    fn test_link_count_failed_is_zero() {
        let event = PageEvent::new(
            url("https://a.test/"),
            1,
            PageOutcome::FetchFailed {
                error: FetchError::Http { status: 404 },
            },
        );
        assert_eq!(event.link_count(), 0);
    }

    #[test]
    fn test_collect_sink_preserves_order() {
        let mut sink = CollectSink::default();
        for depth in 1..=3 {
            sink.emit(PageEvent::new(
                url("https://a.test/"),
                depth,
                PageOutcome::RobotsDenied,
            ));
        }
        let depths: Vec<u32> = sink.events.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![1, 2, 3]);
    }
}
