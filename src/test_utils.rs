//! Shared fixtures for unit tests: an in-memory session, a sleeper that
//! records instead of waiting, and page builders.

use crate::crawler::{RenderSession, SessionError, Sleeper};
use crate::extract::FieldValue;
use crate::record::{ProductRecord, ProductUrl, Specifications};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Session serving canned HTML by URL
///
/// URLs registered with [`StubSession::failing`] fail that many navigations
/// before they start succeeding. Unknown URLs navigate successfully but leave
/// no page to read back.
#[derive(Debug, Default)]
pub struct StubSession {
    pages: HashMap<String, String>,
    failures: HashMap<String, u32>,
    current: Option<String>,
    visited: Vec<String>,
}

impl StubSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn failing(mut self, url: &str, times: u32) -> Self {
        self.failures.insert(url.to_string(), times);
        self
    }

    pub fn navigations(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.clone()
    }
}

#[async_trait]
impl RenderSession for StubSession {
    async fn navigate(&mut self, url: &Url) -> Result<(), SessionError> {
        self.visited.push(url.to_string());
        self.current = None;

        if let Some(remaining) = self.failures.get_mut(url.as_str()) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(SessionError::Render(format!("stub failure for {}", url)));
            }
        }

        self.current = self.pages.get(url.as_str()).cloned();
        Ok(())
    }

    fn current_html(&self) -> Result<String, SessionError> {
        self.current.clone().ok_or(SessionError::NoPage)
    }
}

/// Records requested delays without waiting
#[derive(Debug, Default)]
pub struct CountingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl CountingSleeper {
    pub fn count(&self) -> usize {
        self.durations().len()
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

/// A listing page with the given product hrefs and optional next-page href
pub fn listing_html(product_hrefs: &[&str], next_href: Option<&str>) -> String {
    let products: String = product_hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<li class="product-item--row"><a class="product-title px_list_page_product_click" href="{}">Product</a></li>"#,
                href
            )
        })
        .collect();

    let next = next_href
        .map(|href| {
            format!(
                r#"<li class="pagination__controls pagination__controls--next"><a href="{}">volgende</a></li>"#,
                href
            )
        })
        .unwrap_or_default();

    format!(
        r#"<html><body><ul class="product-list">{}</ul><ul class="pagination">{}</ul></body></html>"#,
        products, next
    )
}

/// A product page with every field populated
pub fn product_html(name: &str) -> String {
    format!(
        r##"<html><body>
        <h1 class="page-heading"><span data-test="title"> {name} </span></h1>
        <div class="pdp-header__meta-item">Merk: <a href="/brand">Acme</a></div>
        <div class="pdp-header__meta-item"><wsp-scroll-to><a href="#reviews">
          <div class="pdp-header__rating"><div class="u-pl--xxs">(1.234 reviews)</div></div>
        </a></wsp-scroll-to></div>
        <div class="u-pl--xxs" data-test="rating-suffix">4,5/5</div>
        <div class="image-slot"><img src="https://media.example.com/{name}.jpg"></div>
        <span class="promo-price"> 649 <sup>,-</sup></span>
        <div class="ab-discount"><del data-test="list-price"> 799,00 </del></div>
        <div class="buy-block__discount">You save €150,00</div>
        <div class="buy-block__highlight u-mr--xxs" data-test="delivery-highlight"> Op voorraad </div>
        <ul class="pros-cons-list"><li>Fast</li><li>Light</li></ul>
        <section class="slot slot--description js_slot-description">
          <div class="js_description_content js_show-more-content">
            <div data-test="description"> About {name}. </div>
          </div>
        </section>
        <section class="slot slot--seperated js_slot-specifications">
          <div class="specs__row"><dt class="specs__title">Weight:Tooltip how heavy</dt><dd class="specs__value">1kg</dd></div>
        </section>
        </body></html>"##,
        name = name
    )
}

/// A fully populated record for output and dataset tests
pub fn sample_record(url: &str) -> ProductRecord {
    let present = |value: &str| FieldValue::Present(value.to_string());
    let mut specifications = Specifications::new();
    specifications.insert("Weight".to_string(), "1kg".to_string());

    ProductRecord {
        url: ProductUrl::new(Url::parse(url).unwrap()),
        name: present("HP 15s"),
        brand: present("HP"),
        rating: present("4.5"),
        review_count: present("12"),
        image_url: present("https://img.example.com/1.jpg"),
        sale_price: present("649"),
        mrsp: present("799,00"),
        discount: present("€150,00"),
        stock_status: FieldValue::Unavailable("Stock status not available"),
        pros_and_cons: present("Fast\nLight"),
        description: present("A laptop."),
        specifications,
    }
}
