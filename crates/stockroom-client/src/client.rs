//! HTTP client for the inventory REST backend.
//!
//! Wraps `reqwest` with the backend's status conventions: anything below 400
//! is success, 404 becomes [`GatewayError::NotFound`], and every other error
//! status is surfaced as [`GatewayError::Api`] carrying the parsed body.
//! Every call is attempted exactly once.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use stockroom_core::{NewProduct, NewStore, Product, ProductId, StatusFilter, Store, StoreId};

use crate::error::GatewayError;
use crate::query;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Client for the `/Stores` REST surface.
///
/// Clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    client: Client,
    /// `{base}/Stores`, without a trailing slash.
    stores_url: String,
}

impl InventoryClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GatewayError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let stores_url = format!("{}/Stores", base_url.trim_end_matches('/'));
        Url::parse(&stores_url).map_err(|e| GatewayError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, stores_url })
    }

    /// `GET /Stores`.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn list_stores(&self) -> Result<Vec<Store>, GatewayError> {
        let url = parse_url(&self.stores_url)?;
        self.get_json(url, "list stores").await
    }

    /// Stores whose Name or Address starts with `text` (case-insensitive) or
    /// whose `FloorArea` contains it. Blank text lists everything.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn search_stores(&self, text: &str) -> Result<Vec<Store>, GatewayError> {
        if text.trim().is_empty() {
            return self.list_stores().await;
        }
        let mut url = parse_url(&self.stores_url)?;
        url.query_pairs_mut()
            .extend_pairs(query::store_search_pairs(text));
        self.get_json(url, "search stores").await
    }

    /// `GET /Stores/{id}/rel_Products{filter_fragment}`.
    ///
    /// `filter_fragment` is an already-encoded query suffix such as the one
    /// produced by [`query::status_filter`], or empty.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn list_products(
        &self,
        store_id: StoreId,
        filter_fragment: &str,
    ) -> Result<Vec<Product>, GatewayError> {
        let url = parse_url(&format!(
            "{}{filter_fragment}",
            self.products_url(store_id)
        ))?;
        self.get_json(url, &format!("list products for store {store_id}"))
            .await
    }

    /// Products of one store, restricted by `filter`.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn list_products_with_status(
        &self,
        store_id: StoreId,
        filter: StatusFilter,
    ) -> Result<Vec<Product>, GatewayError> {
        self.list_products(store_id, &query::filter_fragment(filter))
            .await
    }

    /// Products of one store matching `text` as a prefix of any text column or
    /// a substring of `Price`. Blank text lists everything.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn search_products(
        &self,
        store_id: StoreId,
        text: &str,
    ) -> Result<Vec<Product>, GatewayError> {
        if text.trim().is_empty() {
            return self.list_products(store_id, "").await;
        }
        let mut url = parse_url(&self.products_url(store_id))?;
        url.query_pairs_mut()
            .extend_pairs(query::product_search_pairs(text));
        self.get_json(url, &format!("search products for store {store_id}"))
            .await
    }

    /// `POST /Stores/` and return the created record.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn create_store(&self, store: &NewStore) -> Result<Store, GatewayError> {
        let url = parse_url(&format!("{}/", self.stores_url))?;
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).json(store).send().await?;
        let response = check_status(response).await?;
        decode(response, "created store").await
    }

    /// `POST /Stores/{id}/rel_Products` and return the created record.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn create_product(
        &self,
        store_id: StoreId,
        product: &NewProduct,
    ) -> Result<Product, GatewayError> {
        let url = parse_url(&self.products_url(store_id))?;
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).json(product).send().await?;
        let response = check_status(response).await?;
        decode(response, "created product").await
    }

    /// `DELETE /Stores/{id}`.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn delete_store(&self, store_id: StoreId) -> Result<(), GatewayError> {
        let url = parse_url(&format!("{}/{store_id}", self.stores_url))?;
        self.delete(url).await
    }

    /// `DELETE /Stores/{id}/rel_Products/{productId}`.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn delete_product(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> Result<(), GatewayError> {
        let url = parse_url(&format!("{}/{product_id}", self.products_url(store_id)))?;
        self.delete(url).await
    }

    fn products_url(&self, store_id: StoreId) -> String {
        format!("{}/{store_id}/rel_Products", self.stores_url)
    }

    async fn get_json<T>(&self, url: Url, context: &str) -> Result<T, GatewayError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        decode(response, context).await
    }

    async fn delete(&self, url: Url) -> Result<(), GatewayError> {
        tracing::debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

fn parse_url(raw: &str) -> Result<Url, GatewayError> {
    Url::parse(raw).map_err(|e| GatewayError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Map a response onto the backend's status conventions.
async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let url = response.url().to_string();
    if status == StatusCode::NOT_FOUND {
        return Err(GatewayError::NotFound { url });
    }

    let text = response.text().await?;
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Err(GatewayError::Api {
        status: status.as_u16(),
        url,
        body,
    })
}

async fn decode<T>(response: Response, context: &str) -> Result<T, GatewayError>
where
    T: serde::de::DeserializeOwned,
{
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| GatewayError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
