//! Query-string builders for the backend's `filter` syntax.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use stockroom_core::{Status, StatusFilter};

const STORE_REGEXP_FIELDS: &[&str] = &["Name", "Address"];
const STORE_LIKE_FIELD: &str = "FloorArea";

const PRODUCT_REGEXP_FIELDS: &[&str] = &[
    "Name",
    "Specs",
    "SupplierInfo",
    "MadeIn",
    "ProductionCompanyName",
];
const PRODUCT_LIKE_FIELD: &str = "Price";

/// Query pairs for a store search: case-insensitive prefix regexp on Name and
/// Address, or a substring `like` on `FloorArea`.
#[must_use]
pub fn store_search_pairs(text: &str) -> Vec<(String, String)> {
    or_pairs(STORE_REGEXP_FIELDS, STORE_LIKE_FIELD, text)
}

/// Query pairs for a product search: prefix regexp on the text columns, or a
/// substring `like` on `Price`.
#[must_use]
pub fn product_search_pairs(text: &str) -> Vec<(String, String)> {
    or_pairs(PRODUCT_REGEXP_FIELDS, PRODUCT_LIKE_FIELD, text)
}

fn or_pairs(regexp_fields: &[&str], like_field: &str, text: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = regexp_fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            (
                format!("filter[where][or][{i}][{field}][regexp]"),
                format!("^{text}/i"),
            )
        })
        .collect();
    pairs.push((
        format!("filter[where][or][{}][{like_field}][like]", regexp_fields.len()),
        text.to_string(),
    ));
    pairs
}

/// Pre-encoded `?filter=` suffix restricting products to one status.
#[must_use]
pub fn status_filter(status: Status) -> String {
    let filter = serde_json::json!({ "where": { "Status": status.as_str() } }).to_string();
    format!("?filter={}", utf8_percent_encode(&filter, NON_ALPHANUMERIC))
}

/// Suffix for a [`StatusFilter`]; empty for `All`.
#[must_use]
pub fn filter_fragment(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => String::new(),
        StatusFilter::Only(status) => status_filter(status),
    }
}
