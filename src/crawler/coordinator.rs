//! Scrape coordinator - main run orchestration logic
//!
//! A run has two sequential phases sharing one page fetcher:
//! 1. Walk the paginated listing and collect product URLs
//! 2. Fetch every product page and assemble the dataset
//!
//! [`run_scrape`] wraps a run with the dataset writer and the optional
//! markdown summary.

use crate::config::{validate, Config};
use crate::crawler::assembler::RecordAssembler;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::listing::ListingCrawler;
use crate::crawler::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::crawler::session::{HttpSession, RenderSession};
use crate::output::{generate_markdown_summary, handler_for, RunStats};
use crate::record::Dataset;
use crate::url::crawl_entry;
use crate::ScrapeError;
use std::path::Path;
use url::Url;

/// A finished run: the dataset and what was observed building it
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub dataset: Dataset,
    pub stats: RunStats,
}

/// Main scrape coordinator structure
pub struct Coordinator<S, T = TokioSleeper> {
    fetcher: PageFetcher<S, T>,
    listing: ListingCrawler,
    assembler: RecordAssembler,
    start_url: Url,
}

impl Coordinator<HttpSession> {
    /// Creates a coordinator loading pages over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Bad entry URLs or the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let session = HttpSession::from_config(&config.user_agent)?;
        let fetcher = PageFetcher::new(session, RetryPolicy::from_config(&config.retry));
        Self::with_fetcher(config, fetcher)
    }
}

impl<S: RenderSession, T: Sleeper> Coordinator<S, T> {
    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(config: &Config, fetcher: PageFetcher<S, T>) -> Result<Self, ScrapeError> {
        let (start_url, base) = crawl_entry(&config.scraper)?;

        Ok(Self {
            fetcher,
            listing: ListingCrawler::new(base).with_max_pages(config.scraper.max_pages),
            assembler: RecordAssembler::new(config.scraper.progress_interval),
            start_url,
        })
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    pub fn fetcher(&self) -> &PageFetcher<S, T> {
        &self.fetcher
    }

    /// Runs the listing crawl, then assembles a record per product
    ///
    /// Any page that exhausts its retries aborts the run; nothing collected
    /// before the failure is returned.
    pub async fn run(&mut self) -> Result<ScrapeOutcome, ScrapeError> {
        let mut stats = RunStats::start(self.start_url.as_str());
        tracing::info!("Starting scrape at {}", self.start_url);

        let crawl = self.listing.crawl(&mut self.fetcher, &self.start_url).await?;
        stats.record_listing(&crawl);

        let dataset = self
            .assembler
            .assemble(&mut self.fetcher, crawl.product_urls)
            .await?;
        stats.record_dataset(&dataset);
        stats.finish();

        Ok(ScrapeOutcome { dataset, stats })
    }
}

/// Runs a complete scrape and writes its output
///
/// The configuration is validated first. The dataset goes to the configured
/// destination in the configured format;
/// the markdown summary is written only when a summary path is set.
///
/// # Returns
///
/// * `Ok(RunStats)` - Scrape completed and output written
/// * `Err(ScrapeError)` - A page could not be fetched or output failed
pub async fn run_scrape(config: Config, config_hash: Option<String>) -> Result<RunStats, ScrapeError> {
    // Configs built in code skip the loader's validation
    validate(&config)?;
    let mut coordinator = Coordinator::new(&config)?;

    let ScrapeOutcome { dataset, mut stats } = match coordinator.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Scrape aborted: {}", e);
            return Err(e);
        }
    };
    stats.config_hash = config_hash;

    let handler = handler_for(&config.output);
    handler.write_dataset(&dataset)?;
    tracing::info!(
        "Wrote {} records as {} to {}",
        dataset.len(),
        config.output.format,
        handler.destination().display()
    );
    stats.dataset_path = Some(handler.destination().display().to_string());

    if let Some(summary_path) = &config.output.summary_path {
        generate_markdown_summary(&stats, Path::new(summary_path))?;
        tracing::info!("Summary written to {}", summary_path);
    }

    Ok(stats)
}
