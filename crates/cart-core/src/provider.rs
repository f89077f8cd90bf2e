//! # Payment Provider Trait
//!
//! Seam between the checkout builder and the hosted-checkout provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 PaymentProvider (trait)                     │
//! │  ├── create_checkout_session()                              │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │StripeCheckout     │
//!                  │   Client          │
//!                  └───────────────────┘
//! ```

use crate::checkout::{CheckoutRequest, CheckoutSession};
use crate::error::CheckoutResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session.
    ///
    /// # Arguments
    /// * `request` - Fully priced checkout request
    ///
    /// # Returns
    /// The provider's session object, unmodified.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> CheckoutResult<CheckoutSession>;

    /// Get the provider name (for logging and error reporting).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;

/// Redirect URLs for a checkout, rooted at the storefront origin
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Storefront origin (e.g., "https://shop.example.com")
    pub origin: String,
    /// Success page path
    pub success_path: String,
    /// Cancel page path
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            success_path: "/success".to_string(),
            cancel_path: "/canceled".to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.origin, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.origin, self.cancel_path)
    }
}
