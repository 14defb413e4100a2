use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::forms::{Form, FormKind};

pub type StoreId = i64;

/// A retail location as returned by `GET /Stores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Store {
    #[serde(rename = "id")]
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    /// Opening date as stored by the backend, usually `YYYY-MM-DD` or a full ISO timestamp.
    #[serde(default)]
    pub established: String,
    #[serde(default, deserialize_with = "crate::lenient::f64")]
    pub floor_area: f64,
}

/// Payload for `POST /Stores/`. Identity is assigned by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewStore {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub established: String,
    pub floor_area: f64,
}

impl NewStore {
    /// Convert a filled-in store form into a create payload.
    ///
    /// # Errors
    ///
    /// Returns the names of fields whose values cannot be converted:
    /// `Established` must be `YYYY-MM-DD` and `FloorArea` must be a number.
    pub fn from_form(form: &Form) -> Result<Self, Vec<&'static str>> {
        debug_assert_eq!(form.kind(), FormKind::Store);
        let mut bad = Vec::new();

        let established = form.value("Established").trim().to_string();
        if NaiveDate::parse_from_str(&established, "%Y-%m-%d").is_err() {
            bad.push("Established");
        }

        let floor_area = form.value("FloorArea").trim().parse::<f64>().ok();
        if floor_area.is_none_or(|v| !v.is_finite() || v < 0.0) {
            bad.push("FloorArea");
        }

        match floor_area {
            Some(floor_area) if bad.is_empty() => Ok(Self {
                name: form.value("Name").trim().to_string(),
                email: form.value("Email").trim().to_string(),
                phone_number: form.value("PhoneNumber").trim().to_string(),
                address: form.value("Address").trim().to_string(),
                established,
                floor_area,
            }),
            _ => Err(bad),
        }
    }
}

/// Render an `Established` value as `Mon DD, YYYY`.
///
/// Accepts a bare date or any string starting with one (ISO timestamps).
/// Anything else is returned unchanged.
#[must_use]
pub fn format_established(raw: &str) -> String {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map_or_else(|| raw.to_string(), |d| d.format("%b %d, %Y").to_string())
}
