//! Record types produced by a scrape
//!
//! # Components
//!
//! - `ProductUrl`: an absolute product detail page URL found on a listing page
//! - `ProductRecord`: every extracted field for one product
//! - `Dataset`: records in crawl order, handed to an output sink

mod dataset;
mod product;

// Re-export main types
pub use dataset::Dataset;
pub use product::{ProductRecord, ProductUrl, Specifications};
