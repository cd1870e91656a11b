//! Politeness gate: robots.txt fetching, caching, and decisions
//!
//! The [`RobotsGate`] owns a per-origin cache of parsed robots.txt rules for
//! the lifetime of one crawl run. The first check for an origin fetches
//! `<origin>/robots.txt`; every later check for that origin reuses the cached
//! entry. Any fetch failure is recorded and the gate fails open: the crawl
//! proceeds, with the failure observable both in the returned decision and in
//! the logs.

mod parser;

pub use parser::ParsedRobots;

use crate::url::origin_key;
use crate::RobotsFetchError;
use reqwest::Client;
use std::collections::HashMap;
use url::Url;

/// Outcome of a politeness check for one URL
#[derive(Debug, Clone)]
pub enum RobotsDecision {
    /// robots.txt permits fetching this URL
    Allowed,

    /// robots.txt forbids fetching this URL
    Denied,

    /// robots.txt could not be fetched for this origin; the gate fails open
    FailOpen(RobotsFetchError),
}

impl RobotsDecision {
    /// Returns true unless the decision is an explicit denial.
    pub fn permits(&self) -> bool {
        !matches!(self, RobotsDecision::Denied)
    }
}

/// Cached per-origin state, populated lazily on first check
#[derive(Debug, Clone)]
enum RobotsEntry {
    Rules(ParsedRobots),
    FailOpen(RobotsFetchError),
}

/// Per-origin robots.txt gate, scoped to a single crawl run
///
/// The gate is owned by the crawler, never shared process-wide, so concurrent
/// crawl runs each carry their own cache. All checks within a run use the same
/// fixed user-agent for both the robots.txt fetch and the directive
/// evaluation, keeping decisions deterministic.
pub struct RobotsGate {
    client: Client,
    user_agent: String,
    cache: HashMap<String, RobotsEntry>,
}

impl RobotsGate {
    /// Creates a gate backed by the given HTTP client.
    ///
    /// The client is expected to already carry `user_agent` as its default
    /// user-agent header; the same string is used for directive evaluation.
    pub fn new(client: Client, user_agent: &str) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
            cache: HashMap::new(),
        }
    }

    /// Decides whether the crawler may fetch the given URL.
    ///
    /// Fetches and caches robots.txt for the URL's origin if this is the
    /// first check for that origin in this run.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to evaluate
    ///
    /// # Returns
    ///
    /// * `RobotsDecision::Allowed` - The origin's directives permit the fetch
    /// * `RobotsDecision::Denied` - The directives forbid it
    /// * `RobotsDecision::FailOpen` - robots.txt was unavailable; proceed,
    ///   with the failure cause attached
    pub async fn check(&mut self, url: &Url) -> RobotsDecision {
        let origin = origin_key(url);

        if !self.cache.contains_key(&origin) {
            let entry = match self.fetch_rules(&origin).await {
                Ok(rules) => RobotsEntry::Rules(rules),
                Err(e) => {
                    tracing::warn!(
                        origin = %origin,
                        error = %e,
                        "robots.txt unavailable, failing open"
                    );
                    RobotsEntry::FailOpen(e)
                }
            };
            self.cache.insert(origin.clone(), entry);
        }

        match &self.cache[&origin] {
            RobotsEntry::Rules(rules) => {
                if rules.is_allowed(url.as_str(), &self.user_agent) {
                    RobotsDecision::Allowed
                } else {
                    RobotsDecision::Denied
                }
            }
            RobotsEntry::FailOpen(e) => RobotsDecision::FailOpen(e.clone()),
        }
    }

    /// Number of origins with a cached entry.
    pub fn cached_origins(&self) -> usize {
        self.cache.len()
    }

    /// Fetches and parses robots.txt for an origin.
    async fn fetch_rules(&self, origin: &str) -> Result<ParsedRobots, RobotsFetchError> {
        let robots_url = format!("{origin}/robots.txt");
        tracing::debug!(url = %robots_url, "Fetching robots.txt");

        let response = self
            .client
            .get(&robots_url)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RobotsFetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(classify_transport_error)?;
        Ok(ParsedRobots::from_content(&body))
    }
}

fn classify_transport_error(e: reqwest::Error) -> RobotsFetchError {
    if e.is_timeout() {
        RobotsFetchError::Timeout
    } else {
        RobotsFetchError::Network {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        Client::builder().user_agent("TestBot/1.0").build().unwrap()
    }

    #[test]
    fn test_decision_permits() {
        assert!(RobotsDecision::Allowed.permits());
        assert!(!RobotsDecision::Denied.permits());
        assert!(RobotsDecision::FailOpen(RobotsFetchError::Timeout).permits());
    }

    #[tokio::test]
    async fn test_allowed_and_denied_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
            )
            .mount(&server)
            .await;

        let mut gate = RobotsGate::new(test_client(), "TestBot/1.0");

        let open = Url::parse(&format!("{}/page", server.uri())).unwrap();
        assert!(matches!(gate.check(&open).await, RobotsDecision::Allowed));

        let private = Url::parse(&format!("{}/private/x", server.uri())).unwrap();
        assert!(matches!(gate.check(&private).await, RobotsDecision::Denied));
    }

    #[tokio::test]
    async fn test_robots_fetched_once_per_origin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
            .expect(1)
            .mount(&server)
            .await;

        let mut gate = RobotsGate::new(test_client(), "TestBot/1.0");
        for p in ["/a", "/b", "/c"] {
            let url = Url::parse(&format!("{}{p}", server.uri())).unwrap();
            assert!(gate.check(&url).await.permits());
        }

        assert_eq!(gate.cached_origins(), 1);
        // MockServer verifies the expect(1) on drop.
    }

    #[tokio::test]
    async fn test_missing_robots_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut gate = RobotsGate::new(test_client(), "TestBot/1.0");
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();

        match gate.check(&url).await {
            RobotsDecision::FailOpen(RobotsFetchError::Http { status }) => {
                assert_eq!(status, 404)
            }
            other => panic!("expected fail-open, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_cached_too() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut gate = RobotsGate::new(test_client(), "TestBot/1.0");
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();

        for _ in 0..3 {
            assert!(gate.check(&url).await.permits());
        }
    }
}
