//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the product store, the payment provider, and the checkout builder.

use cart_core::{
    BoxedPaymentProvider, BoxedProductStore, CheckoutOptions, CheckoutRequestBuilder,
    ProductCatalog, DEFAULT_IMAGE_CDN_BASE,
};
use cart_sanity::{SanityClient, SanityConfig};
use cart_stripe::StripeCheckoutClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Storefront origin used when a request carries no `Origin` header
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Stripe shipping rate ID attached to every session
    pub shipping_rate: Option<String>,
    /// Override for the image CDN base URL
    pub image_cdn_base: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            shipping_rate: non_empty("STRIPE_SHIPPING_RATE"),
            image_cdn_base: non_empty("IMAGE_CDN_BASE"),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            environment: "development".to_string(),
            shipping_rate: None,
            image_cdn_base: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Authoritative product lookups
    pub store: BoxedProductStore,
    /// Hosted checkout provider
    pub provider: BoxedPaymentProvider,
    /// Checkout request builder
    pub builder: CheckoutRequestBuilder,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState from the environment.
    ///
    /// Fails when the Stripe secret key is missing. Uses Sanity when
    /// `SANITY_PROJECT_ID` is set, otherwise the static product catalog.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let provider = StripeCheckoutClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        let (store, derived_cdn_base) = match SanityConfig::from_env()? {
            Some(sanity) => {
                tracing::info!(
                    "Using Sanity project {} (dataset {})",
                    sanity.project_id,
                    sanity.dataset
                );
                let cdn_base = sanity.image_cdn_base();
                let store: BoxedProductStore = Arc::new(SanityClient::new(sanity)?);
                (store, cdn_base)
            }
            None => {
                let store: BoxedProductStore = Arc::new(load_product_catalog()?);
                (store, DEFAULT_IMAGE_CDN_BASE.to_string())
            }
        };

        let options = CheckoutOptions::new(config.image_cdn_base.clone().unwrap_or(derived_cdn_base))
            .with_shipping_rate(config.shipping_rate.clone());

        Ok(Self::from_parts(config, store, Arc::new(provider), options))
    }

    /// Assemble state from already-built parts
    pub fn from_parts(
        config: AppConfig,
        store: BoxedProductStore,
        provider: BoxedPaymentProvider,
        options: CheckoutOptions,
    ) -> Self {
        Self {
            store,
            provider,
            builder: CheckoutRequestBuilder::new(options),
            config,
        }
    }
}

/// Load product catalog from config file
fn load_product_catalog() -> anyhow::Result<ProductCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    // Every checkout will fail with "Product not found"
    tracing::warn!("SANITY_PROJECT_ID not set and no product catalog found, using empty catalog");
    Ok(ProductCatalog::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.shipping_rate.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
