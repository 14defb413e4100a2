use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::forms::{Form, FormKind};

pub type ProductId = i64;

/// Stock status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    Storage,
    OutOfStock,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Ok, Status::Storage, Status::OutOfStock];

    /// Wire spelling used by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Storage => "STORAGE",
            Status::OutOfStock => "OUT_OF_STOCK",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OK" => Ok(Status::Ok),
            "STORAGE" => Ok(Status::Storage),
            "OUT_OF_STOCK" | "OUT" => Ok(Status::OutOfStock),
            _ => Err(format!("unknown status \"{s}\"")),
        }
    }
}

/// Status constraint applied to the product table. `All` means unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<Status>().map(StatusFilter::Only)
    }
}

/// An inventory item under `Stores/{id}/rel_Products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "crate::lenient::f64")]
    pub price: f64,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub specs: String,
    /// 1 to 5; anything else is treated as unrated.
    #[serde(default, deserialize_with = "crate::lenient::i64")]
    pub rating: i64,
    #[serde(default)]
    pub supplier_info: String,
    #[serde(default)]
    pub made_in: String,
    #[serde(default)]
    pub production_company_name: String,
    pub status: Status,
}

/// Payload for `POST /Stores/{id}/rel_Products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub specs: String,
    pub rating: i64,
    pub supplier_info: String,
    pub made_in: String,
    pub production_company_name: String,
    pub status: Status,
}

impl NewProduct {
    /// Convert a filled-in product form into a create payload.
    ///
    /// # Errors
    ///
    /// Returns the names of fields whose values cannot be converted: `Price`
    /// must be a non-negative number, `Rating` an integer from 1 to 5, and
    /// `Status` one of the known statuses.
    pub fn from_form(form: &Form) -> Result<Self, Vec<&'static str>> {
        debug_assert_eq!(form.kind(), FormKind::Product);
        let mut bad = Vec::new();

        let price = form
            .value("Price")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0);
        if price.is_none() {
            bad.push("Price");
        }

        let rating = form
            .value("Rating")
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|r| (1..=5).contains(r));
        if rating.is_none() {
            bad.push("Rating");
        }

        let status = form.value("Status").parse::<Status>().ok();
        if status.is_none() {
            bad.push("Status");
        }

        match (price, rating, status) {
            (Some(price), Some(rating), Some(status)) => Ok(Self {
                name: form.value("Name").trim().to_string(),
                price,
                photo: None,
                specs: form.value("Specs").trim().to_string(),
                rating,
                supplier_info: form.value("SupplierInfo").trim().to_string(),
                made_in: form.value("MadeIn").trim().to_string(),
                production_company_name: form.value("ProductionCompanyName").trim().to_string(),
                status,
            }),
            _ => Err(bad),
        }
    }
}

/// Product-table column a sort can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Specs,
    SupplierInfo,
    MadeIn,
    ProductionCompanyName,
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Name,
        SortKey::Price,
        SortKey::Specs,
        SortKey::SupplierInfo,
        SortKey::MadeIn,
        SortKey::ProductionCompanyName,
        SortKey::Rating,
    ];

    /// Column header text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Price => "Price",
            SortKey::Specs => "Specs",
            SortKey::SupplierInfo => "SupplierInfo",
            SortKey::MadeIn => "Country",
            SortKey::ProductionCompanyName => "Company",
            SortKey::Rating => "Rating",
        }
    }

    /// Backend field name.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            SortKey::MadeIn => "MadeIn",
            SortKey::ProductionCompanyName => "ProductionCompanyName",
            other => other.label(),
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Specs => a.specs.cmp(&b.specs),
            SortKey::SupplierInfo => a.supplier_info.cmp(&b.supplier_info),
            SortKey::MadeIn => a.made_in.cmp(&b.made_in),
            SortKey::ProductionCompanyName => {
                a.production_company_name.cmp(&b.production_company_name)
            }
            SortKey::Rating => a.rating.cmp(&b.rating),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts either the column label or the backend field name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s) || k.field().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown column \"{s}\""))
    }
}

/// Per-store status counts shown above the product table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub total: usize,
    pub ok: usize,
    pub storage: usize,
    pub out_of_stock: usize,
}

impl StatusTally {
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Ok => self.ok,
            Status::Storage => self.storage,
            Status::OutOfStock => self.out_of_stock,
        }
    }
}

#[must_use]
pub fn tally_by_status(products: &[Product]) -> StatusTally {
    products.iter().fold(
        StatusTally {
            total: products.len(),
            ..StatusTally::default()
        },
        |mut tally, p| {
            match p.status {
                Status::Ok => tally.ok += 1,
                Status::Storage => tally.storage += 1,
                Status::OutOfStock => tally.out_of_stock += 1,
            }
            tally
        },
    )
}

#[must_use]
pub fn filter_by_status(products: &[Product], filter: StatusFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| filter.matches(p.status))
        .cloned()
        .collect()
}

/// Sort ascending by `key`, then reverse when `descending`.
///
/// A descending sort is the exact mirror of the ascending one, ties included.
pub fn sort_products(products: &mut [Product], key: SortKey, descending: bool) {
    products.sort_by(|a, b| key.compare(a, b));
    if descending {
        products.reverse();
    }
}

/// Filled and empty star counts for a rating; `None` outside 1 to 5.
#[must_use]
pub fn rating_stars(rating: i64) -> Option<(usize, usize)> {
    let filled = usize::try_from(rating).ok().filter(|r| (1..=5).contains(r))?;
    Some((filled, 5 - filled))
}
