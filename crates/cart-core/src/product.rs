//! # Product Types
//!
//! Authoritative product records as the content store returns them, and the
//! validated form the checkout builder prices line items from.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Deserializer, Serialize};

/// Reference to an image asset in the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset document ID, e.g. `image-<hash>-<w>x<h>-webp`
    #[serde(rename = "_ref")]
    pub asset_ref: String,
}

impl AssetRef {
    pub fn new(asset_ref: impl Into<String>) -> Self {
        Self {
            asset_ref: asset_ref.into(),
        }
    }
}

/// A product document fetched from the content store.
///
/// `price` is kept as raw JSON so that a document holding a string or null
/// price is caught by validation instead of failing the lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name; a missing or null name reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    /// Price in major currency units (dollars)
    #[serde(default)]
    pub price: serde_json::Value,

    /// Primary image asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<AssetRef>,
}

impl ProductRecord {
    /// Create a record with a numeric price
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: serde_json::json!(price),
            image: None,
        }
    }

    /// Builder: set image asset reference
    pub fn with_image(mut self, asset_ref: impl Into<String>) -> Self {
        self.image = Some(AssetRef::new(asset_ref));
        self
    }

    /// Builder: replace the raw price value
    pub fn with_raw_price(mut self, price: serde_json::Value) -> Self {
        self.price = price;
        self
    }

    /// Validate the stored price and convert it to whole cents.
    pub fn validate(&self) -> CheckoutResult<PricedProduct> {
        let invalid = |reason: &str| CheckoutError::InvalidPrice {
            product_id: self.id.clone(),
            reason: reason.to_string(),
        };

        let price = self
            .price
            .as_f64()
            .ok_or_else(|| invalid("price is not a number"))?;

        if !price.is_finite() || price <= 0.0 {
            return Err(invalid("price must be a positive number"));
        }

        let unit_amount = to_cents(price);
        if unit_amount < 1 {
            return Err(invalid("price rounds to zero cents"));
        }

        Ok(PricedProduct {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_amount,
            image: self.image.clone(),
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Convert a decimal dollar amount to cents, rounding to nearest
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// A product whose price has been checked against the content store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedProduct {
    pub id: String,
    pub name: String,
    /// Unit price in cents, always >= 1
    pub unit_amount: i64,
    pub image: Option<AssetRef>,
}

/// Static product catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: ProductRecord) {
        self.products.push(product);
    }

    /// Builder: add a product
    pub fn with_product(mut self, product: ProductRecord) -> Self {
        self.add(product);
        self
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
