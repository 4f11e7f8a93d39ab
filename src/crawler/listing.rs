//! Listing crawler
//!
//! Walks the paginated product listing by following each page's "next"
//! control and collects product detail URLs in page order, then in-page
//! order. The walk ends on the first page without a "next" link.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::retry::Sleeper;
use crate::crawler::session::RenderSession;
use crate::document::Document;
use crate::record::ProductUrl;
use crate::url::resolve_link;
use crate::FetchError;
use std::collections::HashSet;
use url::Url;

/// Product title links on a listing page
pub const PRODUCT_LINK: &str = "a.product-title";

/// The pagination "next page" control
pub const NEXT_PAGE: &str = "li.pagination__controls--next > a";

/// What one listing page contributes to the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Product links on the page, in document order
    pub product_urls: Vec<ProductUrl>,

    /// Absolute URL of the next listing page, if any
    pub next_page: Option<Url>,
}

/// Reads product links and the next-page link from a listing document
///
/// Hrefs are resolved against `base`; hrefs that cannot be resolved to an
/// http(s) URL are skipped. Only the first "next" control is considered.
pub fn parse_listing(document: &Document, base: &Url) -> ListingPage {
    let product_urls = document
        .select_all(PRODUCT_LINK)
        .into_iter()
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| resolve_link(href, base))
        .map(ProductUrl::new)
        .collect();

    let next_page = document
        .select_first(NEXT_PAGE)
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| resolve_link(href, base));

    ListingPage {
        product_urls,
        next_page,
    }
}

/// Result of walking the whole listing
#[derive(Debug, Clone, Default)]
pub struct ListingCrawl {
    /// Every product URL found, page by page
    pub product_urls: Vec<ProductUrl>,

    /// Number of product links found on each listing page, in page order
    pub links_per_page: Vec<usize>,
}

impl ListingCrawl {
    pub fn pages_crawled(&self) -> usize {
        self.links_per_page.len()
    }

    pub fn total_links(&self) -> usize {
        self.product_urls.len()
    }
}

/// Follows "next page" links from a start URL, collecting product URLs
#[derive(Debug, Clone)]
pub struct ListingCrawler {
    base: Url,
    max_pages: Option<u32>,
}

impl ListingCrawler {
    /// Creates a crawler resolving relative links against `base`
    pub fn new(base: Url) -> Self {
        Self {
            base,
            max_pages: None,
        }
    }

    /// Stops the walk after `max_pages` listing pages (`None` = no limit)
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Walks the listing starting at `start_url`
    ///
    /// A page without product links contributes nothing, but the walk still
    /// follows its "next" link. A "next" link back to a page already crawled
    /// ends the walk. A listing page that exhausts its fetch
    /// retries ends the crawl with that error.
    pub async fn crawl<S, T>(
        &self,
        fetcher: &mut PageFetcher<S, T>,
        start_url: &Url,
    ) -> Result<ListingCrawl, FetchError>
    where
        S: RenderSession,
        T: Sleeper,
    {
        let mut crawl = ListingCrawl::default();
        let mut current = start_url.clone();
        let mut visited = HashSet::new();

        loop {
            let page_number = crawl.pages_crawled() + 1;

            visited.insert(current.clone());

            let page = {
                let document = fetcher.fetch(&current).await?;
                parse_listing(&document, &self.base)
            };

            tracing::info!(
                "Scraped {} links from page {}",
                page.product_urls.len(),
                page_number
            );
            crawl.links_per_page.push(page.product_urls.len());
            crawl.product_urls.extend(page.product_urls);

            let Some(next_page) = page.next_page else {
                tracing::debug!("No next page on {}, listing complete", current);
                break;
            };

            if visited.contains(&next_page) {
                tracing::warn!(
                    "Next page {} on {} was already crawled, stopping",
                    next_page,
                    current
                );
                break;
            }

            if let Some(max_pages) = self.max_pages {
                if page_number >= max_pages as usize {
                    tracing::warn!(
                        "Stopping after {} listing pages; next page {} not visited",
                        max_pages,
                        next_page
                    );
                    break;
                }
            }

            current = next_page;
        }

        tracing::info!(
            "Scraped a total of {} product links",
            crawl.total_links()
        );
        Ok(crawl)
    }
}
