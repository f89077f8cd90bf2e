//! # Sanity Cart RS
//!
//! Cart-to-Stripe checkout service backed by Sanity product data.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export SANITY_PROJECT_ID=vfxfwnaw
//! export STRIPE_SHIPPING_RATE=shr_...   # optional
//!
//! # Run the server
//! sanity-cart
//! ```

use cart_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Product store: {}", state.store.store_name());
    info!("Payment provider: {}", state.provider.provider_name());
    info!(
        "Shipping rate: {}",
        state.config.shipping_rate.as_deref().unwrap_or("none")
    );

    // Create router
    let app = routes::create_router(state);

    info!("sanity-cart {} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
