//! Run statistics
//!
//! Collected while a scrape runs and reported once it finishes, both on
//! stdout and, when configured, in the markdown summary.

use crate::crawler::ListingCrawl;
use crate::extract::Field;
use crate::record::Dataset;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Observations from one scrape run
#[derive(Debug, Clone)]
pub struct RunStats {
    /// First listing page of the run
    pub start_url: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// SHA-256 of the configuration file, when loaded from disk
    pub config_hash: Option<String>,

    /// Product links found on each listing page, in page order
    pub links_per_page: Vec<usize>,

    /// Product links collected across the whole listing
    pub total_links: usize,

    /// Records in the dataset
    pub records: usize,

    /// Records per field that fell back to the sentinel
    pub unavailable: IndexMap<Field, usize>,

    /// Where the dataset was written
    pub dataset_path: Option<String>,
}

impl RunStats {
    /// Starts the clock for a run beginning at `start_url`
    pub fn start(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            started_at: Utc::now(),
            finished_at: None,
            config_hash: None,
            links_per_page: Vec::new(),
            total_links: 0,
            records: 0,
            unavailable: IndexMap::new(),
            dataset_path: None,
        }
    }

    pub fn record_listing(&mut self, crawl: &ListingCrawl) {
        self.links_per_page = crawl.links_per_page.clone();
        self.total_links = crawl.total_links();
    }

    pub fn record_dataset(&mut self, dataset: &Dataset) {
        self.records = dataset.len();
        self.unavailable = dataset.unavailable_counts();
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn pages_crawled(&self) -> usize {
        self.links_per_page.len()
    }

    /// Wall-clock run time, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Percentage of records where `field` holds a real value
    pub fn coverage(&self, field: Field) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        let missing = self.unavailable.get(&field).copied().unwrap_or(0);
        ((self.records - missing) as f64 / self.records as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &RunStats) {
    println!("=== Scrape Statistics ===\n");

    println!("Overview:");
    println!("  Start URL: {}", stats.start_url);
    println!("  Listing pages crawled: {}", stats.pages_crawled());
    println!("  Product links found: {}", stats.total_links);
    println!("  Records assembled: {}", stats.records);
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {}s", duration);
    }
    println!();

    println!("Links per Page:");
    for (index, count) in stats.links_per_page.iter().enumerate() {
        println!("  Page {}: {}", index + 1, count);
    }
    println!();

    if !stats.unavailable.is_empty() {
        println!("Unavailable Fields:");
        // Sort fields by count (descending)
        let mut counts: Vec<_> = stats.unavailable.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));

        for (field, count) in counts {
            println!(
                "  {}: {} ({:.1}% coverage)",
                field,
                count,
                stats.coverage(*field)
            );
        }
        println!();
    }

    if let Some(path) = &stats.dataset_path {
        println!("Dataset written to: {}", path);
    }
}
