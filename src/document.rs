//! Parsed page documents
//!
//! A [`Document`] is the immutable snapshot of one fetched page. Locators
//! query it with CSS selectors; a selector that fails to parse simply
//! matches nothing, so lookups never error.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// An immutable parsed tree of a single fetched page
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    /// Parses page HTML fetched from `url`
    pub fn parse(url: Url, html: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(html),
        }
    }

    /// The URL this document was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns every element matching `css`, in document order
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(e) => {
                tracing::debug!("Unusable selector {:?}: {:?}", css, e);
                Vec::new()
            }
        }
    }

    /// Returns the first element matching `css`
    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(css).ok()?;
        self.html.select(&selector).next()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("url", &self.url.as_str()).finish()
    }
}

/// Returns descendants of `element` matching `css`, in document order
pub fn select_within<'a>(element: &ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Iterates the text nodes that are direct children of `element`
///
/// Text inside nested elements is not included.
pub fn own_text<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
}

/// The first direct text node of `element`, untrimmed
pub fn first_own_text<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    own_text(element).next()
}

/// All text beneath `element`, concatenated in document order
pub fn flattened_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
