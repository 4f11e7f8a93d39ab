use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Main configuration structure for Product-Scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Listing crawl configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// First listing page to crawl
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Origin that relative product and pagination links are resolved against.
    /// Defaults to the origin of `start-url`.
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,

    /// Upper bound on listing pages to walk (unset = follow every "next" link)
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,

    /// Log a progress line every this many assembled products
    #[serde(rename = "progress-interval", default = "default_progress_interval")]
    pub progress_interval: usize,
}

/// Fixed-delay retry configuration for page fetches
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per URL, including the first one
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds to wait between a failed attempt and the next one
    #[serde(rename = "delay-secs", default = "default_delay_secs")]
    pub delay_secs: u64,
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_secs: default_delay_secs(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the finished dataset is written to
    #[serde(rename = "dataset-path")]
    pub dataset_path: String,

    /// Dataset file format
    #[serde(default)]
    pub format: OutputFormat,

    /// Optional path for a markdown run summary
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

/// Supported dataset formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

fn default_progress_interval() -> usize {
    10
}

fn default_max_attempts() -> u32 {
    5
}

fn default_delay_secs() -> u64 {
    60
}
