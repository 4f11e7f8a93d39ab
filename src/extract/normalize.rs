//! Field post-processing
//!
//! Each function encodes one formatting assumption about the product page
//! (Dutch-locale ratings, "(N reviews)" counters, "You save" banners, spec
//! titles carrying tooltip text) and is tested on its own.

/// Collapses runs of ASCII whitespace to single spaces and trims the ends
///
/// Non-breaking spaces are content, not separators, and are kept.
///
/// ```
/// use product_scraper::extract::normalize_space;
///
/// assert_eq!(normalize_space("  Intel \n Core  i7 "), "Intel Core i7");
/// ```
pub fn normalize_space(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trims surrounding whitespace
pub(crate) fn trim_text(raw: &str) -> Option<String> {
    Some(raw.trim().to_string())
}

/// Keeps the located text as-is
pub(crate) fn verbatim(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

/// Turns rating-suffix text such as `4,5/5` into `4.5`
///
/// Only the part before the first `/` is kept and the decimal comma becomes a
/// dot. The result stays a string; applying it to an already normalized value
/// returns the value unchanged.
///
/// ```
/// use product_scraper::extract::normalize_rating;
///
/// assert_eq!(normalize_rating("4,5/5").as_deref(), Some("4.5"));
/// assert_eq!(normalize_rating("10").as_deref(), Some("10"));
/// ```
pub fn normalize_rating(raw: &str) -> Option<String> {
    let score = raw.split('/').next()?;
    Some(score.trim().replace(',', "."))
}

/// Takes the review count out of text such as `(1.234 reviews)`
///
/// Returns the token after the first `(` up to the next whitespace, or `None`
/// when the text has no `(` or nothing follows it.
pub fn parse_review_count(raw: &str) -> Option<String> {
    let after_paren = raw.trim().split('(').nth(1)?;
    after_paren.split_whitespace().next().map(str::to_string)
}

/// Removes a single leading `You save ` from discount text
///
/// ```
/// use product_scraper::extract::strip_discount_prefix;
///
/// assert_eq!(strip_discount_prefix("You save €50,00"), "€50,00");
/// assert_eq!(strip_discount_prefix("-15%"), "-15%");
/// ```
pub fn strip_discount_prefix(text: &str) -> String {
    text.strip_prefix("You save ").unwrap_or(text).to_string()
}

pub(crate) fn discount_text(raw: &str) -> Option<String> {
    Some(strip_discount_prefix(raw.trim()))
}

/// Cleans a specification title cell
///
/// Title cells render their help tooltip inline, so `Title:Tooltip extra`
/// arrives as one string. Everything from `Tooltip` onwards is dropped, then
/// surrounding whitespace and a trailing colon.
pub fn clean_spec_title(title: &str) -> String {
    let label = title.split("Tooltip").next().unwrap_or_default();
    label.trim().trim_end_matches(':').trim_end().to_string()
}

/// Joins list items one per line, each trimmed, skipping blank items
///
/// Returns `None` when no item has any text.
pub fn join_pros_and_cons<'a, I>(items: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let lines: Vec<&str> = items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
