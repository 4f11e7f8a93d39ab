//! Rendering sessions
//!
//! A session is the stateful page loader behind every fetch: `navigate`
//! replaces its current page, `current_html` reads it back. Because
//! navigation mutates the session, it takes `&mut self`, and a session is
//! only ever driven by one fetch at a time.
//!
//! [`HttpSession`] is the built-in implementation. It loads pages over HTTP
//! and returns the HTML as served; it does not execute JavaScript.

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors reported by a rendering session
///
/// The fetch layer treats every variant the same way: as a retryable
/// failure of the current attempt.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("No page has been loaded in this session")]
    NoPage,

    #[error("Render error: {0}")]
    Render(String),
}

/// A stateful page loader that fetches are issued through
#[async_trait]
pub trait RenderSession: Send {
    /// Loads `url`, replacing the current page
    async fn navigate(&mut self, url: &Url) -> Result<(), SessionError>;

    /// HTML of the current page
    fn current_html(&self) -> Result<String, SessionError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use product_scraper::config::UserAgentConfig;
/// use product_scraper::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "ProductScraper".to_string(),
///     crawler_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Statuses that fail the navigation: server errors and rate limiting
///
/// Any other status, 4xx included, loads its body as the current page.
fn is_failure_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// The page currently held by an [`HttpSession`]
#[derive(Debug)]
struct LoadedPage {
    url: Url,
    html: String,
}

/// Session that loads pages with a plain HTTP GET
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    current: Option<LoadedPage>,
}

impl HttpSession {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    /// Creates a session with a client built from the user agent config
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    /// URL of the current page after redirects
    pub fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|page| &page.url)
    }
}

#[async_trait]
impl RenderSession for HttpSession {
    async fn navigate(&mut self, url: &Url) -> Result<(), SessionError> {
        // A failed navigation leaves no current page behind
        self.current = None;

        let http_error = |source| SessionError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(http_error)?;

        let status = response.status();
        if is_failure_status(status) {
            return Err(SessionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            // Client errors still render a page, like a browser shows it
            tracing::warn!("{} answered {}, keeping the error page", url, status);
        }

        let final_url = response.url().clone();
        let html = response.text().await.map_err(http_error)?;
        tracing::trace!("Loaded {} ({} bytes)", final_url, html.len());

        self.current = Some(LoadedPage {
            url: final_url,
            html,
        });
        Ok(())
    }

    fn current_html(&self) -> Result<String, SessionError> {
        self.current
            .as_ref()
            .map(|page| page.html.clone())
            .ok_or(SessionError::NoPage)
    }
}
