//! # Sanity Product Lookups
//!
//! Fetches product documents by ID through the GROQ query API.

use crate::config::SanityConfig;
use async_trait::async_trait;
use cart_core::{CheckoutError, CheckoutResult, ProductRecord, ProductStore};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// Projection returns exactly the fields `ProductRecord` reads
pub const PRODUCT_QUERY: &str =
    r#"*[_type == "product" && _id == $id][0]{_id, name, price, "image": image[0].asset}"#;

/// Sanity query API client
#[derive(Debug, Clone)]
pub struct SanityClient {
    config: SanityConfig,
    client: Client,
}

impl SanityClient {
    pub fn new(config: SanityConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SanityConfig {
        &self.config
    }
}

#[async_trait]
impl ProductStore for SanityClient {
    #[instrument(skip(self))]
    async fn fetch_product(&self, id: &str) -> CheckoutResult<Option<ProductRecord>> {
        // GROQ parameters are passed as JSON literals
        let id_param = serde_json::to_string(id)?;

        let mut request = self
            .client
            .get(self.config.query_url())
            .query(&[("query", PRODUCT_QUERY), ("$id", id_param.as_str())]);

        if let Some(ref token) = self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Sanity API error: status={}, body={}", status, body);

            let message = match serde_json::from_str::<SanityErrorResponse>(&body) {
                Ok(err) => err.error.description,
                Err(_) => body,
            };

            return Err(CheckoutError::ContentStore {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SanityQueryResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Sanity response: {}", e))
        })?;

        debug!("Sanity lookup for {}: found={}", id, parsed.result.is_some());

        Ok(parsed.result)
    }

    fn store_name(&self) -> &'static str {
        "sanity"
    }
}

// =============================================================================
// Sanity API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SanityQueryResponse {
    #[serde(default)]
    result: Option<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct SanityErrorResponse {
    error: SanityError,
}

#[derive(Debug, Deserialize)]
struct SanityError {
    description: String,
}
