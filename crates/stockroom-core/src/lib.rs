pub mod app_config;
pub mod config;
pub mod forms;
pub mod products;
pub mod stores;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use forms::{validate_form, Form, FormKind, ValidationReport, EMAIL_HINT};
pub use products::{
    filter_by_status, rating_stars, sort_products, tally_by_status, NewProduct, Product,
    ProductId, SortKey, Status, StatusFilter, StatusTally,
};
pub use stores::{format_established, NewStore, Store, StoreId};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Lenient number decoding shared by [`Store`] and [`Product`].
///
/// Older records were created with form values posted verbatim, so numeric
/// columns may come back as JSON strings.
pub(crate) mod lenient {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(serde_json::Number),
        Text(String),
    }

    pub(crate) fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n
                .as_f64()
                .ok_or_else(|| de::Error::custom(format!("number {n} is not representable"))),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("invalid number \"{s}\": {e}"))),
        }
    }

    pub(crate) fn i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n
                .as_i64()
                .ok_or_else(|| de::Error::custom(format!("number {n} is not an integer"))),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| de::Error::custom(format!("invalid integer \"{s}\": {e}"))),
        }
    }
}
