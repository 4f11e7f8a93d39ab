//! URL handling module for Product-Scraper
//!
//! Listing pages link to products and to the next page with site-relative
//! hrefs. This module parses the configured entry URLs, derives the site
//! origin those hrefs are resolved against, and performs the resolution.

mod resolve;

pub use resolve::resolve_link;

use crate::config::ScraperConfig;
use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a string as an absolute http(s) URL with a host
pub fn parse_http_url(input: &str) -> UrlResult<Url> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(url)
}

/// Returns the origin of a URL (`scheme://host[:port]/`)
///
/// # Examples
///
/// ```
/// use product_scraper::url::site_origin;
/// use url::Url;
///
/// let url = Url::parse("https://www.bol.com/nl/nl/l/laptops/4770/?page=2").unwrap();
/// assert_eq!(site_origin(&url).unwrap().as_str(), "https://www.bol.com/");
/// ```
pub fn site_origin(url: &Url) -> UrlResult<Url> {
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    let serialized = format!("{}/", origin.ascii_serialization());
    Url::parse(&serialized).map_err(|e| UrlError::Parse(format!("{}: {}", serialized, e)))
}

/// Resolves the start URL and link base for a crawl from configuration
///
/// The base is the configured `base-url` when present, otherwise the origin
/// of the start URL.
pub fn crawl_entry(config: &ScraperConfig) -> UrlResult<(Url, Url)> {
    let start = parse_http_url(&config.start_url)?;

    let base = match &config.base_url {
        Some(base_url) => parse_http_url(base_url)?,
        None => site_origin(&start)?,
    };

    Ok((start, base))
}
