use thiserror::Error;

/// Errors returned by [`crate::InventoryClient`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered 404.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Any other status of 400 or above. `body` is the parsed error payload,
    /// or the raw text as a JSON string when it was not JSON.
    #[error("server returned HTTP {status} for {url}: {}", api_message(.body))]
    Api {
        status: u16,
        url: String,
        body: serde_json::Value,
    },

    /// A success body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl GatewayError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands the `{"error": {"message": ...}}` envelope the backend uses;
/// falls back to the compact JSON text.
fn api_message(body: &serde_json::Value) -> String {
    body.get("error")
        .and_then(|e| e.get("message"))
        .or_else(|| body.get("message"))
        .and_then(serde_json::Value::as_str)
        .map_or_else(
            || match body {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            str::to_string,
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_envelope_message() {
        let err = GatewayError::Api {
            status: 422,
            url: "http://localhost:3000/api/Stores/".to_string(),
            body: serde_json::json!({
                "error": { "statusCode": 422, "name": "ValidationError", "message": "Name is blank" }
            }),
        };
        assert_eq!(
            err.to_string(),
            "server returned HTTP 422 for http://localhost:3000/api/Stores/: Name is blank"
        );
    }

    #[test]
    fn api_error_falls_back_to_raw_text() {
        let err = GatewayError::Api {
            status: 502,
            url: "http://x/api/Stores".to_string(),
            body: serde_json::Value::String("Bad Gateway".to_string()),
        };
        assert!(err.to_string().ends_with(": Bad Gateway"));
        assert!(!err.is_not_found());
    }
}
