//! Locator chains and sentinels for the product detail page

use super::normalize::{
    discount_text, join_pros_and_cons, normalize_rating, parse_review_count, trim_text, verbatim,
};
use super::{Field, FieldRule, Locator};
use crate::document::{first_own_text, own_text, Document};

const PROMO_PRICE: &str = "span.promo-price";

pub const NAME: FieldRule = FieldRule {
    field: Field::Name,
    locators: &[Locator::Text(r#"h1.page-heading > span[data-test="title"]"#)],
    normalize: trim_text,
    sentinel: "Product name is not available",
};

pub const BRAND: FieldRule = FieldRule {
    field: Field::Brand,
    locators: &[Locator::Custom(brand_link_text)],
    normalize: trim_text,
    sentinel: "Brand is not available",
};

pub const RATING: FieldRule = FieldRule {
    field: Field::Rating,
    locators: &[Locator::Text(r#"div.u-pl--xxs[data-test="rating-suffix"]"#)],
    normalize: normalize_rating,
    sentinel: "Rating not available",
};

pub const REVIEW_COUNT: FieldRule = FieldRule {
    field: Field::ReviewCount,
    locators: &[Locator::Text(
        "div.pdp-header__meta-item > wsp-scroll-to > a > div.pdp-header__rating > div.u-pl--xxs",
    )],
    normalize: parse_review_count,
    sentinel: "Review count is not available",
};

pub const IMAGE_URL: FieldRule = FieldRule {
    field: Field::ImageUrl,
    locators: &[Locator::Attr("div.image-slot > img", "src")],
    normalize: verbatim,
    sentinel: "Product image URL is not available",
};

pub const SALE_PRICE: FieldRule = FieldRule {
    field: Field::SalePrice,
    locators: &[Locator::Text(PROMO_PRICE)],
    normalize: trim_text,
    sentinel: "Sale price not available",
};

/// List price; pages without a struck-through price report the sale price
pub const MRSP: FieldRule = FieldRule {
    field: Field::Mrsp,
    locators: &[
        Locator::Text(r#"div.ab-discount > del[data-test="list-price"]"#),
        Locator::Text(PROMO_PRICE),
    ],
    normalize: trim_text,
    sentinel: "MRSP not available",
};

pub const DISCOUNT: FieldRule = FieldRule {
    field: Field::Discount,
    locators: &[Locator::Text("div.buy-block__discount")],
    normalize: discount_text,
    sentinel: "No discount",
};

pub const STOCK_STATUS: FieldRule = FieldRule {
    field: Field::StockStatus,
    locators: &[
        Locator::Text(r#"div.buy-block__highlight.u-mr--xxs[data-test="delivery-highlight"]"#),
        Locator::Text("div.buy-block__highlight--scarce.buy-block__highlight"),
    ],
    normalize: trim_text,
    sentinel: "Stock status not available",
};

pub const PROS_AND_CONS: FieldRule = FieldRule {
    field: Field::ProsAndCons,
    locators: &[Locator::Custom(pros_and_cons_items)],
    normalize: verbatim,
    sentinel: "Pros and cons not available",
};

pub const DESCRIPTION: FieldRule = FieldRule {
    field: Field::Description,
    locators: &[Locator::FlatText(
        r#"section.js_slot-description div.js_description_content > div[data-test="description"]"#,
    )],
    normalize: trim_text,
    sentinel: "Product description not available",
};

/// Link text of the header metadata item labelled `Merk:`
fn brand_link_text(document: &Document) -> Option<String> {
    document
        .select_all("div.pdp-header__meta-item")
        .into_iter()
        .find(|item| own_text(item).any(|text| text.contains("Merk:")))
        .and_then(|item| {
            item.children()
                .filter_map(scraper::ElementRef::wrap)
                .find(|child| child.value().name() == "a")
        })
        .and_then(|link| first_own_text(&link).map(str::to_string))
}

/// Direct text of every item in the pros/cons list, one per line
fn pros_and_cons_items(document: &Document) -> Option<String> {
    let items = document.select_all("ul.pros-cons-list > li");
    join_pros_and_cons(items.iter().flat_map(own_text))
}
