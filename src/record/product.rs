//! Product URL and record definitions
//!
//! A record is built once per product page and never modified afterwards.

use crate::extract::{Field, FieldValue};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// Specification title → value, in the order the page lists them
pub type Specifications = IndexMap<String, String>;

/// Absolute URL of one product detail page
///
/// Built only from a parsed [`Url`], so it can never hold a relative href.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductUrl(Url);

impl ProductUrl {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProductUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<ProductUrl> for Url {
    fn from(url: ProductUrl) -> Self {
        url.0
    }
}

/// Every extracted field for one product, plus the page it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub url: ProductUrl,
    pub name: FieldValue,
    pub brand: FieldValue,
    pub rating: FieldValue,
    pub review_count: FieldValue,
    pub image_url: FieldValue,
    pub sale_price: FieldValue,
    pub mrsp: FieldValue,
    pub discount: FieldValue,
    pub stock_status: FieldValue,
    pub pros_and_cons: FieldValue,
    pub description: FieldValue,
    pub specifications: Specifications,
}

impl ProductRecord {
    /// Looks up a string-valued field
    ///
    /// Returns `None` only for [`Field::Specifications`], which is a mapping;
    /// use the `specifications` field for it.
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        let value = match field {
            Field::Name => &self.name,
            Field::Brand => &self.brand,
            Field::Rating => &self.rating,
            Field::ReviewCount => &self.review_count,
            Field::ImageUrl => &self.image_url,
            Field::SalePrice => &self.sale_price,
            Field::Mrsp => &self.mrsp,
            Field::Discount => &self.discount,
            Field::StockStatus => &self.stock_status,
            Field::ProsAndCons => &self.pros_and_cons,
            Field::Description => &self.description,
            Field::Specifications => return None,
        };
        Some(value)
    }

    /// String-valued fields in column order
    pub fn values(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    /// Fields that fell back to their sentinel
    pub fn unavailable_fields(&self) -> Vec<Field> {
        self.values()
            .filter(|(_, value)| !value.is_available())
            .map(|(field, _)| field)
            .collect()
    }
}
