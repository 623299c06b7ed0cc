//! HTTP fetch adapter
//!
//! The crawl core never fetches pages itself. This adapter turns an HTTP
//! response into the [`PageResponse`] the core consumes, so the command-line
//! tool can run a crawl step against a live page.

use crate::config::FetchConfig;
use crate::SieveError;
use reqwest::Client;

/// A fetched page as seen by the crawl core
///
/// Carries the status code and the raw body. The core only reads it and
/// never keeps it past one crawl step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    /// HTTP status code
    pub status: u16,

    /// Raw body bytes, if the fetcher received any
    pub content: Option<Vec<u8>>,
}

impl PageResponse {
    pub fn new(status: u16, content: Option<Vec<u8>>) -> Self {
        Self { status, content }
    }

    /// A 200 response with the given body
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, Some(body.into()))
    }

    /// Returns the body when links can be extracted from it
    ///
    /// That requires status 200 and a non-empty body; anything else is a
    /// normal "nothing to extract" outcome rather than an error.
    pub fn html_body(&self) -> Option<&[u8]> {
        if self.status != 200 {
            return None;
        }
        self.content.as_deref().filter(|body| !body.is_empty())
    }
}

/// Builds an HTTP client with the configured user agent and timeout
///
/// # Example
///
/// ```no_run
/// use link_sieve::config::FetchConfig;
/// use link_sieve::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .connect_timeout(config.timeout().min(std::time::Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and wraps the result as a [`PageResponse`]
///
/// Every HTTP status is returned as a response; only transport failures
/// (DNS, connection, timeout, body read) are errors. An empty body is
/// reported as absent content.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<PageResponse, SieveError> {
    tracing::debug!("Fetching {}", url);

    let response = client.get(url).send().await.map_err(|e| SieveError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(|e| SieveError::Http {
        url: url.to_string(),
        source: e,
    })?;

    tracing::debug!("Fetched {} (status {}, {} bytes)", url, status, body.len());

    let content = if body.is_empty() {
        None
    } else {
        Some(body.to_vec())
    };

    Ok(PageResponse::new(status, content))
}
