//! Crawler module for page fetching and record assembly
//!
//! This module contains the core scraping logic, including:
//! - The rendering session seam and its HTTP implementation
//! - Page fetching with fixed-delay retries
//! - Walking the paginated listing
//! - Assembling product records
//! - Overall run coordination

mod assembler;
mod coordinator;
mod fetcher;
mod listing;
mod retry;
mod session;

pub use assembler::RecordAssembler;
pub use coordinator::{run_scrape, Coordinator, ScrapeOutcome};
pub use fetcher::PageFetcher;
pub use listing::{parse_listing, ListingCrawl, ListingCrawler, ListingPage, NEXT_PAGE, PRODUCT_LINK};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use session::{build_http_client, HttpSession, RenderSession, SessionError};

