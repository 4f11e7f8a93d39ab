//! Product-Scraper: a paginated product listing scraper
//!
//! This crate walks a retail site's paginated product listing, follows every
//! product link it finds, and extracts a fixed set of fields per product into
//! a dataset of records ready for tabular output.

pub mod config;
pub mod crawler;
pub mod document;
pub mod extract;
pub mod output;
pub mod record;
pub mod url;

#[cfg(test)]
mod test_utils;

use thiserror::Error;

/// Main error type for Product-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Terminal page fetch failure, raised once every retry attempt is spent
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out: {url} failed {attempts} times, last error: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        source: crawler::SessionError,
    },
}

impl FetchError {
    /// The URL that could not be fetched
    pub fn url(&self) -> &str {
        match self {
            Self::Exhausted { url, .. } => url,
        }
    }

    /// How many attempts were made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Product-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use document::Document;
pub use extract::{Field, FieldValue};
pub use record::{Dataset, ProductRecord, ProductUrl, Specifications};
