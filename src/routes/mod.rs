//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/stripe_intent` - PaymentIntent creation for the checkout form
//! - `/api/webhook` - Stripe webhook receiver (mints on payment success)
//! - `/api/health` - Health checks

pub mod health;
pub mod intent;
pub mod webhook;

use crate::middleware::cors_layer;
use crate::models::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(intent::router(state.clone()))
        .merge(webhook::router(state))
        .merge(health::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
