//! Page fetcher
//!
//! Every page the scraper reads, listing or product, goes through
//! [`PageFetcher::fetch`]. The fetcher owns the rendering session, so
//! navigation is serialized by construction: `fetch` needs `&mut self`.
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Any session error, attempt < max | Wait the fixed delay, try again |
//! | Any session error, attempt = max | Fail with `FetchError` |
//! | Page loaded | Parse and return the `Document` |

use crate::crawler::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::crawler::session::{RenderSession, SessionError};
use crate::document::Document;
use crate::FetchError;
use url::Url;

/// Loads pages through a session and retries failures on a fixed delay
pub struct PageFetcher<S, T = TokioSleeper> {
    session: S,
    policy: RetryPolicy,
    sleeper: T,
}

impl<S: RenderSession> PageFetcher<S> {
    /// Creates a fetcher that sleeps on the tokio timer between attempts
    pub fn new(session: S, policy: RetryPolicy) -> Self {
        Self::with_sleeper(session, policy, TokioSleeper)
    }
}

impl<S: RenderSession, T: Sleeper> PageFetcher<S, T> {
    pub fn with_sleeper(session: S, policy: RetryPolicy, sleeper: T) -> Self {
        Self {
            session,
            policy,
            sleeper,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn sleeper(&self) -> &T {
        &self.sleeper
    }

    /// Fetches `url` and parses it into a [`Document`]
    ///
    /// Makes up to `max_attempts` attempts, sleeping the policy delay after
    /// every failed attempt except the last.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The page loaded on some attempt
    /// * `Err(FetchError)` - Every attempt failed; carries the last error
    pub async fn fetch(&mut self, url: &Url) -> Result<Document, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.load(url).await {
                Ok(document) => {
                    if attempt > 1 {
                        tracing::info!("Fetched {} on attempt {}", url, attempt);
                    }
                    return Ok(document);
                }
                Err(error) => match self.policy.delay_after(attempt) {
                    Some(delay) => {
                        tracing::warn!(
                            "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                            attempt,
                            self.policy.max_attempts(),
                            url,
                            error,
                            delay
                        );
                        self.sleeper.sleep(delay).await;
                    }
                    None => {
                        tracing::error!(
                            "Giving up on {} after {} attempts: {}",
                            url,
                            attempt,
                            error
                        );
                        return Err(FetchError::Exhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            source: error,
                        });
                    }
                },
            }
        }
    }

    /// One navigation plus snapshot of the resulting HTML
    async fn load(&mut self, url: &Url) -> Result<Document, SessionError> {
        tracing::debug!("Navigating to {}", url);
        self.session.navigate(url).await?;
        let html = self.session.current_html()?;
        Ok(Document::parse(url.clone(), &html))
    }
}
