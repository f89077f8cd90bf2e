//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Requests are sent form-encoded, the way Stripe's API expects them.

use crate::config::StripeConfig;
use async_trait::async_trait;
use cart_core::{
    CheckoutError, CheckoutRequest, CheckoutResult, CheckoutSession, PaymentProvider,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session client
///
/// Uses Stripe's hosted checkout page, so card data never touches this service.
#[derive(Debug, Clone)]
pub struct StripeCheckoutClient {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutClient {
    /// Create a new Stripe checkout client
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

/// Flatten a checkout request into Stripe's bracketed form fields
pub fn form_params(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vec![
        ("submit_type".to_string(), request.submit_type.as_str().to_string()),
        ("mode".to_string(), request.mode.as_str().to_string()),
        (
            "billing_address_collection".to_string(),
            request.billing_address_collection.as_str().to_string(),
        ),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];

    for (i, method) in request.payment_method_types.iter().enumerate() {
        params.push((
            format!("payment_method_types[{}]", i),
            method.as_str().to_string(),
        ));
    }

    if let Some(ref options) = request.shipping_options {
        for (i, option) in options.iter().enumerate() {
            params.push((
                format!("shipping_options[{}][shipping_rate]", i),
                option.shipping_rate.clone(),
            ));
        }
    }

    for (i, item) in request.line_items.iter().enumerate() {
        let price = &item.price_data;
        params.push((
            format!("line_items[{}][price_data][currency]", i),
            price.currency.clone(),
        ));
        params.push((
            format!("line_items[{}][price_data][product_data][name]", i),
            price.product_data.name.clone(),
        ));
        if let Some(ref images) = price.product_data.images {
            for (j, img) in images.iter().enumerate() {
                params.push((
                    format!("line_items[{}][price_data][product_data][images][{}]", i, j),
                    img.clone(),
                ));
            }
        }
        params.push((
            format!("line_items[{}][price_data][unit_amount]", i),
            price.unit_amount.to_string(),
        ));
        params.push((
            format!("line_items[{}][adjustable_quantity][enabled]", i),
            item.adjustable_quantity.enabled.to_string(),
        ));
        params.push((
            format!("line_items[{}][adjustable_quantity][minimum]", i),
            item.adjustable_quantity.minimum.to_string(),
        ));
        params.push((
            format!("line_items[{}][quantity]", i),
            item.quantity.to_string(),
        ));
    }

    params
}

#[async_trait]
impl PaymentProvider for StripeCheckoutClient {
    #[instrument(skip(self, request), fields(line_items = request.line_items.len()))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> CheckoutResult<CheckoutSession> {
        let params = form_params(request);
        let idempotency_key = Uuid::new_v4().to_string();

        debug!(
            "Creating Stripe checkout session: {} form fields, idempotency_key={}",
            params.len(),
            idempotency_key
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            let message = match serde_json::from_str::<StripeErrorResponse>(&body) {
                Ok(error_response) => error_response.error.message,
                Err(_) => format!("HTTP {}: {}", status, body),
            };

            return Err(CheckoutError::Provider {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let raw: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;
        let session = CheckoutSession::new(raw);

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session.id().unwrap_or("<missing>"),
            session.url().unwrap_or("<missing>")
        );

        Ok(session)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::{
        AdjustableQuantity, BillingAddressCollection, CheckoutMode, LineItem, PaymentMethodType,
        PriceData, ProductData, ShippingOption, SubmitType,
    };

    fn request(shipping: Option<&str>, images: Option<Vec<String>>) -> CheckoutRequest {
        CheckoutRequest {
            submit_type: SubmitType::Pay,
            mode: CheckoutMode::Payment,
            payment_method_types: vec![PaymentMethodType::Card],
            billing_address_collection: BillingAddressCollection::Auto,
            shipping_options: shipping.map(|rate| {
                vec![ShippingOption {
                    shipping_rate: rate.to_string(),
                }]
            }),
            line_items: vec![LineItem {
                price_data: PriceData {
                    currency: "usd".to_string(),
                    product_data: ProductData {
                        name: "Mug".to_string(),
                        images,
                    },
                    unit_amount: 999,
                },
                adjustable_quantity: AdjustableQuantity::default(),
                quantity: 2,
            }],
            success_url: "https://shop.test/success".to_string(),
            cancel_url: "https://shop.test/canceled".to_string(),
        }
    }

    fn get<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_form_params_fixed_fields() {
        let params = form_params(&request(None, None));

        assert_eq!(get(&params, "submit_type"), Some("pay"));
        assert_eq!(get(&params, "mode"), Some("payment"));
        assert_eq!(get(&params, "payment_method_types[0]"), Some("card"));
        assert_eq!(get(&params, "billing_address_collection"), Some("auto"));
        assert_eq!(get(&params, "success_url"), Some("https://shop.test/success"));
        assert_eq!(get(&params, "cancel_url"), Some("https://shop.test/canceled"));
        assert!(params.iter().all(|(k, _)| !k.starts_with("shipping_options")));
    }

    #[test]
    fn test_form_params_line_item() {
        let images = Some(vec!["https://cdn.test/mug.webp".to_string()]);
        let params = form_params(&request(Some("shr_abc"), images));

        assert_eq!(get(&params, "shipping_options[0][shipping_rate]"), Some("shr_abc"));
        assert_eq!(get(&params, "line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(get(&params, "line_items[0][price_data][unit_amount]"), Some("999"));
        assert_eq!(
            get(&params, "line_items[0][price_data][product_data][name]"),
            Some("Mug")
        );
        assert_eq!(
            get(&params, "line_items[0][price_data][product_data][images][0]"),
            Some("https://cdn.test/mug.webp")
        );
        assert_eq!(get(&params, "line_items[0][adjustable_quantity][enabled]"), Some("true"));
        assert_eq!(get(&params, "line_items[0][adjustable_quantity][minimum]"), Some("1"));
        assert_eq!(get(&params, "line_items[0][quantity]"), Some("2"));
    }

    #[test]
    fn test_provider_name() {
        let client = StripeCheckoutClient::new(StripeConfig::new("sk_test_abc")).unwrap();
        assert_eq!(client.provider_name(), "stripe");
    }
}
