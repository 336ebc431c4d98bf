use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain_mint::chain::EthersRegistrar;
use domain_mint::stripe::StripeClient;
use domain_mint::{config::Config, routes::create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domain_mint=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Stripe API client and on-chain registrar
    let stripe = StripeClient::new(config.stripe.secret_key.clone());
    let registrar = EthersRegistrar::from_config(&config.chain)
        .map_err(|e| anyhow::anyhow!("Failed to initialize registrar: {}", e))?;
    info!(
        contract = %config.chain.contract_address,
        chain_id = config.chain.chain_id,
        "Registrar initialized"
    );

    // Create shared state
    let state = AppState {
        config: config.clone(),
        stripe,
        registrar: Arc::new(registrar),
        minted: Arc::new(Mutex::new(HashSet::new())),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
