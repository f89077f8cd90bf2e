//! Integration tests for `StripeCheckoutClient::create_checkout_session`.
//!
//! Uses `wiremock` to stand in for `api.stripe.com` so no real network
//! traffic is made.

use cart_core::{
    AdjustableQuantity, BillingAddressCollection, CheckoutError, CheckoutMode, CheckoutRequest,
    LineItem, PaymentMethodType, PaymentProvider, PriceData, ProductData, ShippingOption,
    SubmitType,
};
use cart_stripe::{StripeCheckoutClient, StripeConfig};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> StripeCheckoutClient {
    let config = StripeConfig::new("sk_test_wiremock").with_api_base_url(server.uri());
    StripeCheckoutClient::new(config).expect("failed to build test client")
}

fn mug_request(shipping_rate: Option<&str>) -> CheckoutRequest {
    CheckoutRequest {
        submit_type: SubmitType::Pay,
        mode: CheckoutMode::Payment,
        payment_method_types: vec![PaymentMethodType::Card],
        billing_address_collection: BillingAddressCollection::Auto,
        shipping_options: shipping_rate.map(|rate| {
            vec![ShippingOption {
                shipping_rate: rate.to_string(),
            }]
        }),
        line_items: vec![LineItem {
            price_data: PriceData {
                currency: "usd".to_string(),
                product_data: ProductData {
                    name: "Mug".to_string(),
                    images: None,
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

#[tokio::test]
async fn create_checkout_session_relays_stripe_session() {
    let server = MockServer::start().await;
    let session_json = json!({
        "id": "cs_test_a1",
        "object": "checkout.session",
        "url": "https://checkout.stripe.com/c/pay/cs_test_a1",
        "amount_total": 1998,
        "currency": "usd"
    });

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header("Authorization", "Bearer sk_test_wiremock"))
        .and(header_exists("Idempotency-Key"))
        .and(header_exists("Stripe-Version"))
        .and(body_string_contains("mode=payment"))
        .and(body_string_contains("submit_type=pay"))
        .and(body_string_contains("line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=999"))
        .and(body_string_contains("line_items%5B0%5D%5Bquantity%5D=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&session_json))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .create_checkout_session(&mug_request(None))
        .await
        .expect("expected session");

    assert_eq!(session.id(), Some("cs_test_a1"));
    assert_eq!(session.as_json(), &session_json);
}

#[tokio::test]
async fn create_checkout_session_sends_shipping_rate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains(
            "shipping_options%5B0%5D%5Bshipping_rate%5D=shr_abc",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"id": "cs_test_s"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .create_checkout_session(&mug_request(Some("shr_abc")))
        .await
        .expect("expected session");

    assert_eq!(session.id(), Some("cs_test_s"));
}

#[tokio::test]
async fn create_checkout_session_propagates_stripe_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&json!({
            "error": {
                "type": "invalid_request_error",
                "message": "No such shipping rate: 'shr_missing'",
                "param": "shipping_options[0][shipping_rate]"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_checkout_session(&mug_request(Some("shr_missing")))
        .await
        .expect_err("expected provider error");

    match err {
        CheckoutError::Provider {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "stripe");
            assert_eq!(status, 400);
            assert_eq!(message, "No such shipping rate: 'shr_missing'");
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn create_checkout_session_handles_unparseable_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_checkout_session(&mug_request(None))
        .await
        .expect_err("expected provider error");

    assert_eq!(err.status_code(), 503);
    assert!(err.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn create_checkout_session_rejects_non_json_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_checkout_session(&mug_request(None))
        .await
        .expect_err("expected serialization error");

    assert!(matches!(err, CheckoutError::Serialization(_)));
    assert_eq!(err.status_code(), 500);
}
