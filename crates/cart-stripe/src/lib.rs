//! # cart-stripe
//!
//! Stripe Checkout Sessions client for sanity-cart-rs.
//!
//! `StripeCheckoutClient` implements `cart_core::PaymentProvider`: it
//! form-encodes a `CheckoutRequest`, posts it to `/v1/checkout/sessions`, and
//! hands back Stripe's session object untouched.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cart_stripe::StripeCheckoutClient;
//! use cart_core::PaymentProvider;
//!
//! let stripe = StripeCheckoutClient::from_env()?;
//! let session = stripe.create_checkout_session(&request).await?;
//!
//! // Redirect user to session.url()
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{form_params, StripeCheckoutClient};
pub use config::StripeConfig;
