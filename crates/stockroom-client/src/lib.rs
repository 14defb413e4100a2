//! REST gateway for the inventory backend (`/api/Stores` and its
//! `rel_Products` sub-collections).

pub mod client;
pub mod error;
pub mod query;

pub use client::{InventoryClient, DEFAULT_BASE_URL};
pub use error::GatewayError;
pub use query::{filter_fragment, status_filter};
