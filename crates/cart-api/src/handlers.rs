//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cart_core::{parse_cart, CheckoutError, CheckoutSession, CheckoutUrls};
use serde::Serialize;
use tracing::{error, instrument, warn};

// =============================================================================
// Error Responses
// =============================================================================

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// HTTP rendering of a `CheckoutError`
#[derive(Debug)]
pub struct ApiError(pub CheckoutError);

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            CheckoutError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                "Method Not Allowed",
            )
                .into_response(),
            err => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(ErrorResponse::new(err.public_message()))).into_response()
            }
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sanity-cart",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session from a cart.
///
/// Accepts every method so that non-POST requests get the plain-text 405
/// rather than the router's default.
#[instrument(skip(state, headers, body), fields(method = %method, body_len = body.len()))]
pub async fn create_checkout(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutSession>, ApiError> {
    checkout(&state, &method, &headers, &body)
        .await
        .map(Json)
        .map_err(|err| {
            let status = err.status_code();
            if status >= 500 {
                error!("Checkout failed ({}): {}", status, err);
            } else {
                warn!("Checkout rejected ({}): {}", status, err);
            }
            ApiError(err)
        })
}

async fn checkout(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<CheckoutSession, CheckoutError> {
    if *method != Method::POST {
        return Err(CheckoutError::MethodNotAllowed);
    }

    let items = parse_cart(body)?;
    let urls = CheckoutUrls::new(request_origin(headers).unwrap_or(state.config.base_url.as_str()));

    state
        .builder
        .create_session(state.store.as_ref(), state.provider.as_ref(), &items, &urls)
        .await
}

/// Storefront origin from the `Origin` header, if usable
fn request_origin(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("cart items are required");
        assert_eq!(err.error, "cart items are required");
    }

    #[test]
    fn test_error_conversion() {
        let response = ApiError(CheckoutError::EmptyCart).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError(CheckoutError::MethodNotAllowed).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
    }

    #[test]
    fn test_provider_status_is_kept() {
        let response = ApiError(CheckoutError::Provider {
            provider: "stripe".into(),
            status: 402,
            message: "Your card was declined.".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_request_origin() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_origin(&headers), None);

        headers.insert(header::ORIGIN, HeaderValue::from_static("null"));
        assert_eq!(request_origin(&headers), None);

        headers.insert(header::ORIGIN, HeaderValue::from_static("https://shop.test"));
        assert_eq!(request_origin(&headers), Some("https://shop.test"));
    }
}
