//! # Checkout Error Types
//!
//! Typed error handling for the checkout shim.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Wrong HTTP verb on the checkout route
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Cart body was empty or not a list
    #[error("cart items are required")]
    EmptyCart,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cart identifier did not resolve to a product
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Stored price is missing, non-numeric, or not positive
    #[error("Invalid price for product {product_id}: {reason}")]
    InvalidPrice { product_id: String, reason: String },

    /// Content store rejected or failed a lookup
    #[error("Content store error ({status}): {message}")]
    ContentStore { status: u16, message: String },

    /// Payment provider rejected the session request
    #[error("{message}")]
    Provider {
        provider: String,
        status: u16,
        message: String,
    },

    /// Network/HTTP error talking to an upstream service
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::MethodNotAllowed => 405,
            CheckoutError::EmptyCart => 400,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::ProductNotFound { .. } => 404,
            CheckoutError::InvalidPrice { .. } => 400,
            CheckoutError::ContentStore { .. } => 502,
            CheckoutError::Provider { status, .. } => {
                if (400..=599).contains(status) {
                    *status
                } else {
                    500
                }
            }
            CheckoutError::Network(_) => 500,
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Serialization(_) => 500,
            CheckoutError::Internal(_) => 500,
        }
    }

    /// Message safe to hand back to the caller.
    ///
    /// Internal failures collapse to a generic message; everything else is
    /// the error's display text.
    pub fn public_message(&self) -> String {
        match self {
            CheckoutError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Serialization(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CheckoutError::EmptyCart.status_code(), 400);
        assert_eq!(
            CheckoutError::ProductNotFound {
                product_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(CheckoutError::MethodNotAllowed.status_code(), 405);
        assert_eq!(CheckoutError::Network("timeout".into()).status_code(), 500);
    }

    #[test]
    fn test_provider_status_passthrough() {
        let err = CheckoutError::Provider {
            provider: "stripe".into(),
            status: 402,
            message: "Your card was declined.".into(),
        };
        assert_eq!(err.status_code(), 402);
        assert_eq!(err.to_string(), "Your card was declined.");

        let odd = CheckoutError::Provider {
            provider: "stripe".into(),
            status: 302,
            message: "redirect".into(),
        };
        assert_eq!(odd.status_code(), 500);
    }

    #[test]
    fn test_public_message() {
        assert_eq!(
            CheckoutError::EmptyCart.public_message(),
            "cart items are required"
        );
        assert_eq!(
            CheckoutError::Internal("join failed".into()).public_message(),
            "Internal Server Error"
        );
    }
}
