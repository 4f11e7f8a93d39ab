//! Per-field extraction from product pages
//!
//! Every output field has one [`FieldRule`]: an ordered chain of locators
//! (primary first, then fallbacks), a normalization step, and the sentinel
//! text reported when nothing in the chain produces a value. Rules never
//! fail; an absent or reshaped page section degrades only its own field.
//!
//! The specifications field is the exception to the string shape: it is a
//! nested title→value mapping and degrades to an empty mapping instead of a
//! sentinel (see [`extract_specifications`]).

mod normalize;
mod rules;
mod specs;

pub use normalize::{
    clean_spec_title, join_pros_and_cons, normalize_rating, normalize_space,
    parse_review_count, strip_discount_prefix,
};
pub use specs::extract_specifications;

use crate::document::{first_own_text, flattened_text, Document};
use crate::record::{ProductRecord, ProductUrl};
use serde::{Serialize, Serializer};
use std::fmt;

/// The fields extracted for every product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Brand,
    Rating,
    ReviewCount,
    ImageUrl,
    SalePrice,
    Mrsp,
    Discount,
    StockStatus,
    ProsAndCons,
    Description,
    Specifications,
}

impl Field {
    /// All fields, in output column order
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::Brand,
        Field::Rating,
        Field::ReviewCount,
        Field::ImageUrl,
        Field::SalePrice,
        Field::Mrsp,
        Field::Discount,
        Field::StockStatus,
        Field::ProsAndCons,
        Field::Description,
        Field::Specifications,
    ];

    /// Column name used in datasets
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Brand => "brand",
            Self::Rating => "rating",
            Self::ReviewCount => "review_count",
            Self::ImageUrl => "image_url",
            Self::SalePrice => "sale_price",
            Self::Mrsp => "mrsp",
            Self::Discount => "discount",
            Self::StockStatus => "stock_status",
            Self::ProsAndCons => "pros_and_cons",
            Self::Description => "description",
            Self::Specifications => "specifications",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one extraction rule
///
/// Unavailability is a value in its own right: it carries the field's
/// sentinel text, which is what ends up in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A value found on the page, after normalization
    Present(String),
    /// No locator produced a value; holds the field's sentinel text
    Unavailable(&'static str),
}

impl FieldValue {
    /// The text written to the dataset
    pub fn as_str(&self) -> &str {
        match self {
            Self::Present(value) => value,
            Self::Unavailable(sentinel) => sentinel,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A structural lookup of one raw string in a document
#[derive(Clone, Copy)]
pub enum Locator {
    /// First direct text node of the first element matching the selector
    Text(&'static str),
    /// Attribute value of the first element matching the selector
    Attr(&'static str, &'static str),
    /// All text beneath the first element matching the selector
    FlatText(&'static str),
    /// Lookups that need more than a single selector
    Custom(fn(&Document) -> Option<String>),
}

impl Locator {
    /// Runs the lookup; `None` means no match
    pub fn locate(&self, document: &Document) -> Option<String> {
        match *self {
            Self::Text(css) => {
                let element = document.select_first(css)?;
                first_own_text(&element).map(str::to_string)
            }
            Self::Attr(css, attr) => {
                let element = document.select_first(css)?;
                element.value().attr(attr).map(str::to_string)
            }
            Self::FlatText(css) => {
                let element = document.select_first(css)?;
                Some(flattened_text(&element))
            }
            Self::Custom(lookup) => lookup(document),
        }
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(css) => f.debug_tuple("Text").field(css).finish(),
            Self::Attr(css, attr) => f.debug_tuple("Attr").field(css).field(attr).finish(),
            Self::FlatText(css) => f.debug_tuple("FlatText").field(css).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Extraction rule for one string-valued field
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    /// Primary locator first, then fallbacks in order
    pub locators: &'static [Locator],
    /// Post-processing of the raw located text; `None` rejects the match
    pub normalize: fn(&str) -> Option<String>,
    pub sentinel: &'static str,
}

impl FieldRule {
    /// Tries each locator in turn and returns the first normalized value,
    /// or the sentinel when the chain is exhausted
    pub fn apply(&self, document: &Document) -> FieldValue {
        self.locators
            .iter()
            .find_map(|locator| {
                let raw = locator.locate(document)?;
                (self.normalize)(&raw)
            })
            .map(FieldValue::Present)
            .unwrap_or(FieldValue::Unavailable(self.sentinel))
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("locators", &self.locators)
            .field("sentinel", &self.sentinel)
            .finish()
    }
}

/// Runs every field rule over a product page and assembles the record
pub fn extract_record(url: ProductUrl, document: &Document) -> ProductRecord {
    ProductRecord {
        name: rules::NAME.apply(document),
        brand: rules::BRAND.apply(document),
        rating: rules::RATING.apply(document),
        review_count: rules::REVIEW_COUNT.apply(document),
        image_url: rules::IMAGE_URL.apply(document),
        sale_price: rules::SALE_PRICE.apply(document),
        mrsp: rules::MRSP.apply(document),
        discount: rules::DISCOUNT.apply(document),
        stock_status: rules::STOCK_STATUS.apply(document),
        pros_and_cons: rules::PROS_AND_CONS.apply(document),
        description: rules::DESCRIPTION.apply(document),
        specifications: extract_specifications(document),
        url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn doc(html: &str) -> Document {
        Document::parse(Url::parse("https://www.bol.com/nl/nl/p/x/1/").unwrap(), html)
    }

    fn trimmed(raw: &str) -> Option<String> {
        Some(raw.trim().to_string())
    }

    const CHAIN: FieldRule = FieldRule {
        field: Field::Mrsp,
        locators: &[Locator::Text("del.primary"), Locator::Text("span.fallback")],
        normalize: trimmed,
        sentinel: "nothing here",
    };

    #[test]
    fn test_rule_uses_primary_first() {
        let document = doc(r#"<del class="primary"> 10 </del><span class="fallback">20</span>"#);
        assert_eq!(CHAIN.apply(&document), FieldValue::Present("10".to_string()));
    }

    #[test]
    fn test_rule_falls_back() {
        let document = doc(r#"<span class="fallback"> 20 </span>"#);
        assert_eq!(CHAIN.apply(&document), FieldValue::Present("20".to_string()));
    }

    #[test]
    fn test_rule_sentinel_when_exhausted() {
        let document = doc("<p>unrelated</p>");
        let value = CHAIN.apply(&document);
        assert_eq!(value, FieldValue::Unavailable("nothing here"));
        assert_eq!(value.as_str(), "nothing here");
        assert!(!value.is_available());
    }

    #[test]
    fn test_rejected_normalization_moves_to_next_locator() {
        fn digits_only(raw: &str) -> Option<String> {
            raw.chars().all(|c| c.is_ascii_digit()).then(|| raw.to_string())
        }
        let rule = FieldRule {
            normalize: digits_only,
            ..CHAIN
        };
        let document = doc(r#"<del class="primary">n/a</del><span class="fallback">42</span>"#);
        assert_eq!(rule.apply(&document), FieldValue::Present("42".to_string()));
    }

    #[test]
    fn test_broken_selector_is_a_miss() {
        let rule = FieldRule {
            locators: &[Locator::Text("del[["), Locator::Text("span.fallback")],
            ..CHAIN
        };
        let document = doc(r#"<span class="fallback">7</span>"#);
        assert_eq!(rule.apply(&document), FieldValue::Present("7".to_string()));
    }

    #[test]
    fn test_attr_locator() {
        let document = doc(r#"<div class="image-slot"><img src="https://img/1.jpg"></div>"#);
        let locator = Locator::Attr("div.image-slot > img", "src");
        assert_eq!(locator.locate(&document), Some("https://img/1.jpg".to_string()));
        assert_eq!(Locator::Attr("div.image-slot > img", "alt").locate(&document), None);
    }

    #[test]
    fn test_field_value_serializes_as_text() {
        let present = serde_json::to_string(&FieldValue::Present("4.5".to_string())).unwrap();
        let missing = serde_json::to_string(&FieldValue::Unavailable("Rating not available")).unwrap();
        assert_eq!(present, r#""4.5""#);
        assert_eq!(missing, r#""Rating not available""#);
    }

    #[test]
    fn test_field_names_unique() {
        let mut names: Vec<&str> = Field::ALL.iter().map(Field::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Field::ALL.len());
    }
}
