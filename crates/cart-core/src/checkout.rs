//! # Checkout Types
//!
//! The provider-facing checkout request and the session it returns.
//! Field names follow the Stripe Checkout Sessions API so the request can be
//! encoded without renaming.

use serde::{Deserialize, Serialize};

/// Currency used for every line item
pub const CURRENCY: &str = "usd";

/// Checkout submit button intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitType {
    #[default]
    Pay,
}

impl SubmitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitType::Pay => "pay",
        }
    }
}

/// Checkout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// Accepted payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Card,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::Card => "card",
        }
    }
}

/// Billing address collection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingAddressCollection {
    #[default]
    Auto,
    Required,
}

impl BillingAddressCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingAddressCollection::Auto => "auto",
            BillingAddressCollection::Required => "required",
        }
    }
}

/// Product shown on the hosted checkout page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Inline price for a line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceData {
    pub currency: String,
    pub product_data: ProductData,
    /// Amount in cents
    pub unit_amount: i64,
}

/// Lets the customer change the quantity on the checkout page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustableQuantity {
    pub enabled: bool,
    pub minimum: u32,
}

impl Default for AdjustableQuantity {
    fn default() -> Self {
        Self {
            enabled: true,
            minimum: 1,
        }
    }
}

/// A line item in a checkout request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub price_data: PriceData,
    pub adjustable_quantity: AdjustableQuantity,
    pub quantity: u32,
}

impl LineItem {
    /// Product display name
    pub fn name(&self) -> &str {
        &self.price_data.product_data.name
    }

    pub fn unit_amount(&self) -> i64 {
        self.price_data.unit_amount
    }

    /// First product image, if any
    pub fn image_url(&self) -> Option<&str> {
        self.price_data
            .product_data
            .images
            .as_ref()
            .and_then(|images| images.first())
            .map(String::as_str)
    }

    /// Line total in cents, saturating at `i64::MAX`
    pub fn total(&self) -> i64 {
        self.price_data
            .unit_amount
            .saturating_mul(i64::from(self.quantity))
    }
}

/// Provider-side shipping rate attached to the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub shipping_rate: String,
}

/// A fully assembled checkout session request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub submit_type: SubmitType,
    pub mode: CheckoutMode,
    pub payment_method_types: Vec<PaymentMethodType>,
    pub billing_address_collection: BillingAddressCollection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_options: Option<Vec<ShippingOption>>,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Order total in cents, saturating at `i64::MAX`
    pub fn total(&self) -> i64 {
        self.line_items
            .iter()
            .map(LineItem::total)
            .fold(0, i64::saturating_add)
    }

    /// Number of units across all line items
    pub fn item_count(&self) -> u64 {
        self.line_items
            .iter()
            .map(|item| u64::from(item.quantity))
            .fold(0, u64::saturating_add)
    }
}

/// A checkout session created by the payment provider.
///
/// Opaque: the provider's JSON is kept as-is and relayed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutSession(serde_json::Value);

impl CheckoutSession {
    pub fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    /// Provider's session ID
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(|v| v.as_str())
    }

    /// Hosted checkout URL to redirect the customer to
    pub fn url(&self) -> Option<&str> {
        self.0.get("url").and_then(|v| v.as_str())
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mug(quantity: u32) -> LineItem {
        LineItem {
            price_data: PriceData {
                currency: CURRENCY.to_string(),
                product_data: ProductData {
                    name: "Mug".to_string(),
                    images: None,
                },
                unit_amount: 999,
            },
            adjustable_quantity: AdjustableQuantity::default(),
            quantity,
        }
    }

    #[test]
    fn test_line_item_total() {
        assert_eq!(mug(3).total(), 2997);
        assert!(mug(1).image_url().is_none());
    }

    #[test]
    fn test_totals_saturate_on_huge_carts() {
        let mut huge = mug(u32::MAX);
        huge.price_data.unit_amount = i64::MAX;
        assert_eq!(huge.total(), i64::MAX);

        let request = CheckoutRequest {
            submit_type: SubmitType::Pay,
            mode: CheckoutMode::Payment,
            payment_method_types: vec![PaymentMethodType::Card],
            billing_address_collection: BillingAddressCollection::Auto,
            shipping_options: None,
            line_items: vec![huge, mug(3_000_000_000), mug(3_000_000_000)],
            success_url: "https://shop.test/success".to_string(),
            cancel_url: "https://shop.test/canceled".to_string(),
        };

        assert_eq!(request.total(), i64::MAX);
        assert_eq!(
            request.item_count(),
            u64::from(u32::MAX) + 6_000_000_000
        );
    }

    #[test]
    fn test_request_serialization_omits_unset_options() {
        let request = CheckoutRequest {
            submit_type: SubmitType::Pay,
            mode: CheckoutMode::Payment,
            payment_method_types: vec![PaymentMethodType::Card],
            billing_address_collection: BillingAddressCollection::Auto,
            shipping_options: None,
            line_items: vec![mug(2)],
            success_url: "https://shop.test/success".to_string(),
            cancel_url: "https://shop.test/canceled".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("shipping_options").is_none());
        assert_eq!(value["mode"], "payment");
        assert_eq!(value["submit_type"], "pay");
        assert_eq!(value["payment_method_types"], json!(["card"]));
        assert_eq!(value["line_items"][0]["adjustable_quantity"], json!({"enabled": true, "minimum": 1}));
        assert!(value["line_items"][0]["price_data"]["product_data"]
            .get("images")
            .is_none());
        assert_eq!(request.total(), 1998);
        assert_eq!(request.item_count(), 2);
    }

    #[test]
    fn test_session_is_relayed_verbatim() {
        let raw = json!({
            "id": "cs_test_123",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_123",
            "amount_total": 1998
        });
        let session: CheckoutSession = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(session.id(), Some("cs_test_123"));
        assert_eq!(session.url(), Some("https://checkout.stripe.com/c/pay/cs_test_123"));
        assert_eq!(serde_json::to_value(&session).unwrap(), raw);
    }
}
