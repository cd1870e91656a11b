//! HTTP fetcher
//!
//! One GET per call, no retries. A fetch succeeds only when the response
//! status is exactly 200 and the content-type indicates HTML; everything else
//! comes back as a typed [`FetchError`] the coordinator reports on the page's
//! event and moves on from.

use crate::config::CrawlConfig;
use crate::FetchError;
use reqwest::Client;
use url::Url;

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct FetchedPage {
    /// URL after any redirects; relative links on the page resolve
    /// against this, not the URL that was requested
    pub final_url: Url,

    /// Content-Type header value
    pub content_type: String,

    /// Response body
    pub body: String,
}

/// Builds the HTTP client shared by page fetches and robots.txt fetches.
///
/// One client per crawl run: it carries the run's fixed user-agent so page
/// requests and robots evaluations always agree on who is asking.
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page, requiring HTTP 200 and an HTML content-type.
///
/// Redirects are followed by the client; the status and content-type checks
/// apply to the final response.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL to fetch
///
/// # Returns
///
/// * `Ok(FetchedPage)` - Status was exactly 200 and the body is HTML
/// * `Err(FetchError)` - Any other status, content-type, or transport failure
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_transport_error)?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(FetchError::Http {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(FetchError::NonHtml { content_type });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(classify_transport_error)?;

    Ok(FetchedPage {
        final_url,
        content_type,
        body,
    })
}

fn classify_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network {
            message: e.to_string(),
        }
    }
}
