//! # Cart Types
//!
//! The client-supplied cart. Only the product identifier and the quantity are
//! read; anything else the storefront sends along (name, price, image) is
//! ignored.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

/// One entry of the inbound cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Content-store document ID of the product
    #[serde(rename = "_id")]
    pub id: String,

    /// Requested quantity (must be at least 1)
    pub quantity: u32,
}

impl CartItem {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Parse a raw request body into cart items.
///
/// Anything that is not a non-empty JSON array is rejected as an empty cart.
/// Entries that are present but malformed are an invalid request.
pub fn parse_cart(body: &[u8]) -> CheckoutResult<Vec<CartItem>> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| CheckoutError::EmptyCart)?;

    match &value {
        serde_json::Value::Array(entries) if !entries.is_empty() => {}
        _ => return Err(CheckoutError::EmptyCart),
    }

    let items: Vec<CartItem> = serde_json::from_value(value)
        .map_err(|e| CheckoutError::InvalidRequest(format!("malformed cart item: {}", e)))?;

    if let Some(item) = items.iter().find(|item| item.quantity == 0) {
        return Err(CheckoutError::InvalidRequest(format!(
            "quantity must be at least 1 for product {}",
            item.id
        )));
    }

    Ok(items)
}
