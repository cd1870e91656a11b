//! Crawl frontier: FIFO queue plus visited set
//!
//! Dedup is lazy, matching the dequeue-time policy of the crawl loop: a URL
//! may sit in the queue several times, but [`Frontier::claim`] marks it
//! processed exactly once. The queue carries a hard size cap as the guard
//! against unbounded growth.

use crate::CrawlError;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL awaiting processing, tagged with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// FIFO frontier with a visited set and a size cap
///
/// Accessed only by the single coordinator loop, so the check-and-mark in
/// [`claim`](Self::claim) needs no further synchronization.
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    cap: usize,
}

impl Frontier {
    /// Creates an empty frontier holding at most `cap` queued entries.
    pub fn new(cap: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            cap,
        }
    }

    /// Enqueues a URL at the given depth.
    ///
    /// No visited check happens here; duplicates are resolved at dequeue
    /// time. Fails with [`CrawlError::FrontierOverflow`] when the cap is hit.
    pub fn push(&mut self, url: Url, depth: u32) -> Result<(), CrawlError> {
        if self.queue.len() >= self.cap {
            return Err(CrawlError::FrontierOverflow { limit: self.cap });
        }
        self.queue.push_back(FrontierEntry { url, depth });
        Ok(())
    }

    /// Dequeues the oldest entry.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Returns true if the URL has already been claimed for processing.
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Marks a URL as processed; returns true only the first time.
    pub fn claim(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Number of entries currently queued.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs claimed so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(10);
        frontier.push(url("https://a.test/1"), 1).unwrap();
        frontier.push(url("https://a.test/2"), 1).unwrap();
        frontier.push(url("https://a.test/3"), 2).unwrap();

        assert_eq!(frontier.pop().unwrap().url.as_str(), "https://a.test/1");
        assert_eq!(frontier.pop().unwrap().url.as_str(), "https://a.test/2");
        let last = frontier.pop().unwrap();
        assert_eq!(last.depth, 2);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_push_does_not_dedup() {
        let mut frontier = Frontier::new(10);
        frontier.push(url("https://a.test/"), 1).unwrap();
        frontier.push(url("https://a.test/"), 2).unwrap();
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_claim_once() {
        let mut frontier = Frontier::new(10);
        let u = url("https://a.test/page");
        assert!(!frontier.is_visited(&u));
        assert!(frontier.claim(&u));
        assert!(frontier.is_visited(&u));
        assert!(!frontier.claim(&u));
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_cap_enforced() {
        let mut frontier = Frontier::new(2);
        frontier.push(url("https://a.test/1"), 1).unwrap();
        frontier.push(url("https://a.test/2"), 1).unwrap();
        let overflow = frontier.push(url("https://a.test/3"), 1);
        assert!(matches!(
            overflow,
            Err(CrawlError::FrontierOverflow { limit: 2 })
        ));
    }

    #[test]
    fn test_cap_frees_up_after_pop() {
        let mut frontier = Frontier::new(1);
        frontier.push(url("https://a.test/1"), 1).unwrap();
        frontier.pop().unwrap();
        assert!(frontier.push(url("https://a.test/2"), 1).is_ok());
    }
}
