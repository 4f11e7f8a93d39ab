//! Specifications table extraction

use super::normalize::{clean_spec_title, normalize_space};
use crate::document::{flattened_text, select_within, Document};
use crate::record::Specifications;

const SECTION: &str = "section.js_slot-specifications";
const ROW: &str = "div.specs__row";
const TITLE: &str = "dt.specs__title";
const VALUE: &str = "dd.specs__value";

/// Collects the specifications section into a title→value mapping
///
/// Rows keep document order; a repeated title keeps its last value. The
/// section is read as a whole: if it is missing, or any row lacks its title
/// or value cell, the result is an empty mapping.
pub fn extract_specifications(document: &Document) -> Specifications {
    let Some(section) = document.select_first(SECTION) else {
        return Specifications::new();
    };

    let mut specifications = Specifications::new();
    for row in select_within(&section, ROW) {
        let title = select_within(&row, TITLE).into_iter().next();
        let value = select_within(&row, VALUE).into_iter().next();

        let (Some(title), Some(value)) = (title, value) else {
            tracing::debug!(
                "Incomplete specifications row on {}, dropping section",
                document.url()
            );
            return Specifications::new();
        };

        specifications.insert(
            clean_spec_title(&normalize_space(&flattened_text(&title))),
            normalize_space(&flattened_text(&value)),
        );
    }

    specifications
}
