//! # cart-core
//!
//! Core types and traits for the sanity-cart checkout shim.
//!
//! This crate provides:
//! - `CartItem` and `parse_cart` for the untrusted inbound cart
//! - `ProductRecord`, `PricedProduct`, and the static `ProductCatalog`
//! - `ProductStore` and `PaymentProvider` traits for the two upstreams
//! - `CheckoutRequest`, `LineItem`, and `CheckoutSession`
//! - `CheckoutRequestBuilder`, which ties it all together
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{parse_cart, CheckoutOptions, CheckoutRequestBuilder, CheckoutUrls};
//!
//! let items = parse_cart(&body)?;
//! let builder = CheckoutRequestBuilder::new(CheckoutOptions::default());
//!
//! let session = builder
//!     .create_session(&store, &provider, &items, &CheckoutUrls::new("https://shop.example.com"))
//!     .await?;
//!
//! // Relay session to the storefront, which redirects to session.url()
//! ```

pub mod builder;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod product;
pub mod provider;
pub mod store;

// Re-exports for convenience
pub use builder::{image_url, CheckoutOptions, CheckoutRequestBuilder, DEFAULT_IMAGE_CDN_BASE};
pub use cart::{parse_cart, CartItem};
pub use checkout::{
    AdjustableQuantity, BillingAddressCollection, CheckoutMode, CheckoutRequest, CheckoutSession,
    LineItem, PaymentMethodType, PriceData, ProductData, ShippingOption, SubmitType, CURRENCY,
};
pub use error::{CheckoutError, CheckoutResult};
pub use product::{to_cents, AssetRef, PricedProduct, ProductCatalog, ProductRecord};
pub use provider::{BoxedPaymentProvider, CheckoutUrls, PaymentProvider};
pub use store::{BoxedProductStore, ProductStore};
