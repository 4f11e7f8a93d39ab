//! Resolution of listing-page hrefs into absolute URLs

use url::Url;

/// Resolves a link href to an absolute URL
///
/// Returns None if the link cannot point at another page:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that fail to parse
/// - anything that is not HTTP(S) after resolution
///
/// # Examples
///
/// ```
/// use product_scraper::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://www.bol.com/").unwrap();
/// let url = resolve_link("/nl/nl/p/laptop/9300000/", &base).unwrap();
/// assert_eq!(url.as_str(), "https://www.bol.com/nl/nl/p/laptop/9300000/");
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}
