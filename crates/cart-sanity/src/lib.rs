//! # cart-sanity
//!
//! Sanity content-store client for sanity-cart-rs.
//!
//! `SanityClient` implements `cart_core::ProductStore` by running a GROQ
//! query per product ID, so prices always come from the content store and
//! never from the shopper's browser.

pub mod client;
pub mod config;

pub use client::{SanityClient, PRODUCT_QUERY};
pub use config::SanityConfig;
