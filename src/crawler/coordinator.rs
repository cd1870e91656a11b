//! Crawl coordination: the breadth-first traversal loop
//!
//! The [`Crawler`] owns the frontier, the visited set, the politeness gate,
//! and the HTTP client for one run. Dequeue, dedup, exclusion, and robots
//! checks all happen sequentially in the coordinator loop, so the visited-set
//! check-and-mark is naturally atomic and no lock is ever held across a
//! network call. Fetch and extraction run in spawned tasks, bounded by the
//! configured concurrency; with a concurrency of 1 the traversal reproduces
//! the strictly sequential reference order.

use crate::config::CrawlConfig;
use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::output::{EventSink, PageEvent, PageOutcome};
use crate::robots::{RobotsDecision, RobotsGate};
use crate::url::is_excluded;
use crate::{FetchError, Result};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// Counters for a finished crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    /// Pages fetched and parsed successfully
    pub pages_crawled: u64,

    /// Pages whose fetch failed
    pub pages_failed: u64,

    /// Dequeues skipped because robots.txt denied the URL
    pub robots_denied: u64,

    /// Total links discovered across all crawled pages
    pub links_discovered: u64,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// Handle for signaling early termination from outside the crawl loop
///
/// Stopping prevents further dequeues; in-flight fetches finish and their
/// events are still delivered, leaving the frontier and visited set intact.
#[derive(Debug, Clone)]
pub struct CrawlHandle {
    stop: Arc<AtomicBool>,
}

impl CrawlHandle {
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// One crawl run: frontier, politeness gate, and HTTP client
pub struct Crawler {
    config: CrawlConfig,
    client: Client,
    gate: RobotsGate,
    frontier: Frontier,
    stop: Arc<AtomicBool>,
}

impl Crawler {
    /// Prepares a crawl run, seeding the frontier with the start URL.
    ///
    /// The start URL was already validated at configuration time; this only
    /// builds the HTTP client and wires up run-scoped state.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let client = build_http_client(&config)?;
        let gate = RobotsGate::new(client.clone(), &config.user_agent);

        let mut frontier = Frontier::new(config.max_frontier);
        frontier.push(config.start_url.clone(), 1)?;

        Ok(Self {
            config,
            client,
            gate,
            frontier,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns a handle that can stop the crawl from another task.
    pub fn handle(&self) -> CrawlHandle {
        CrawlHandle {
            stop: self.stop.clone(),
        }
    }

    /// Runs the crawl to completion, delivering one event per processed page.
    pub async fn run<S: EventSink>(mut self, sink: &mut S) -> Result<CrawlSummary> {
        tracing::info!(
            start_url = %self.config.start_url,
            max_depth = self.config.max_depth,
            link_limit = self.config.link_limit,
            "Starting crawl"
        );

        let started = Instant::now();
        let mut summary = CrawlSummary::default();
        let mut tasks: JoinSet<(Url, u32, std::result::Result<Vec<Url>, FetchError>)> =
            JoinSet::new();

        loop {
            // Fill available fetch slots from the frontier.
            while tasks.len() < self.config.max_concurrency && !self.stop.load(Ordering::Relaxed)
            {
                let Some(entry) = self.next_fetchable(sink, &mut summary).await else {
                    break;
                };

                let client = self.client.clone();
                let limit = self.config.link_limit;
                tasks.spawn(async move {
                    // Relative hrefs resolve against the post-redirect URL,
                    // so a page reached via redirect links to its real
                    // neighbors. The event still reports the requested URL.
                    let result = match fetch_page(&client, &entry.url).await {
                        Ok(page) => Ok(extract_links(&page.final_url, &page.body, limit)),
                        Err(e) => Err(e),
                    };
                    (entry.url, entry.depth, result)
                });
            }

            // Nothing in flight and nothing fetchable left: crawl is done.
            let Some(joined) = tasks.join_next().await else {
                break;
            };

            match joined {
                Ok((url, depth, Ok(links))) => {
                    summary.pages_crawled += 1;
                    summary.links_discovered += links.len() as u64;

                    // Links found at the depth bound are reported but never
                    // followed.
                    if depth < self.config.max_depth {
                        for link in &links {
                            self.frontier.push(link.clone(), depth + 1)?;
                        }
                    }

                    sink.emit(PageEvent::new(url, depth, PageOutcome::Crawled { links }));
                }
                Ok((url, depth, Err(error))) => {
                    summary.pages_failed += 1;
                    tracing::debug!(url = %url, error = %error, "Page fetch failed");
                    sink.emit(PageEvent::new(url, depth, PageOutcome::FetchFailed { error }));
                }
                Err(e) => {
                    tracing::error!("Fetch task aborted: {e}");
                }
            }
        }

        summary.duration = started.elapsed();
        tracing::info!(
            pages = summary.pages_crawled,
            failed = summary.pages_failed,
            denied = summary.robots_denied,
            links = summary.links_discovered,
            "Crawl finished in {:?}",
            summary.duration
        );

        Ok(summary)
    }

    /// Pops frontier entries until one survives the skip checks.
    ///
    /// Skips silently on depth bound, already-visited, and domain exclusion;
    /// a robots denial is emitted as a policy-skip event. The survivor is
    /// marked visited here, before its fetch begins, so a URL enqueued many
    /// times is still fetched at most once.
    async fn next_fetchable<S: EventSink>(
        &mut self,
        sink: &mut S,
        summary: &mut CrawlSummary,
    ) -> Option<FrontierEntry> {
        while let Some(entry) = self.frontier.pop() {
            if entry.depth > self.config.max_depth {
                continue;
            }

            if self.frontier.is_visited(&entry.url) {
                tracing::trace!(url = %entry.url, "Already processed, skipping");
                continue;
            }

            if is_excluded(&entry.url, &self.config.excluded_domains) {
                tracing::debug!(url = %entry.url, "Domain excluded, skipping");
                continue;
            }

            match self.gate.check(&entry.url).await {
                RobotsDecision::Denied => {
                    summary.robots_denied += 1;
                    sink.emit(PageEvent::new(
                        entry.url.clone(),
                        entry.depth,
                        PageOutcome::RobotsDenied,
                    ));
                    continue;
                }
                // Fail-open is already logged by the gate; proceed as allowed.
                RobotsDecision::FailOpen(_) | RobotsDecision::Allowed => {}
            }

            self.frontier.claim(&entry.url);
            return Some(entry);
        }

        None
    }
}
