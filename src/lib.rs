// Domain Mint - Stripe-to-NFT payment gateway for domain names

pub mod chain;
pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod stripe;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
