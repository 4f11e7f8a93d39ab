//! Record assembly
//!
//! Fetches each product page in crawl order, runs the field rules over it
//! and appends the resulting record to the dataset.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::retry::Sleeper;
use crate::crawler::session::RenderSession;
use crate::extract::extract_record;
use crate::record::{Dataset, ProductUrl};
use crate::FetchError;

/// Turns product URLs into a dataset
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    progress_interval: usize,
}

impl RecordAssembler {
    /// Creates an assembler logging progress every `progress_interval` products
    pub fn new(progress_interval: usize) -> Self {
        Self {
            progress_interval: progress_interval.max(1),
        }
    }

    /// Builds one record per URL, in the order given
    ///
    /// A product page that exhausts its fetch retries aborts assembly; the
    /// records built so far are discarded with it.
    pub async fn assemble<S, T>(
        &self,
        fetcher: &mut PageFetcher<S, T>,
        urls: Vec<ProductUrl>,
    ) -> Result<Dataset, FetchError>
    where
        S: RenderSession,
        T: Sleeper,
    {
        let total = urls.len();
        let mut dataset = Dataset::with_capacity(total);

        for (index, url) in urls.into_iter().enumerate() {
            let record = {
                let document = fetcher.fetch(url.as_url()).await?;
                extract_record(url, &document)
            };

            let missing = record.unavailable_fields();
            if !missing.is_empty() {
                tracing::debug!(
                    "{}: {} field(s) unavailable: {:?}",
                    record.url,
                    missing.len(),
                    missing
                );
            }
            dataset.push(record);

            let processed = index + 1;
            if processed % self.progress_interval == 0 && processed < total {
                tracing::info!("Processed {} of {} product links", processed, total);
            }
        }

        tracing::info!("All information for {} links has been scraped", dataset.len());
        Ok(dataset)
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(10)
    }
}
