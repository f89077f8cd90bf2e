//! # cart-api
//!
//! HTTP API layer for sanity-cart-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout endpoint that turns a cart into a Stripe session
//! - Environment-driven wiring of the Sanity store and Stripe client
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/checkout` | Create checkout session |
//! | POST | `/api/stripe` | Create checkout session (storefront path) |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
