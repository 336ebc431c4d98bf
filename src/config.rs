use anyhow::Result;
use serde::Deserialize;
use std::env;

/// Wei value of the fixed 0.01 MATIC registration fee the contract charges.
const DEFAULT_REGISTRATION_FEE_WEI: &str = "10000000000000000";

/// Contract deployed on Mumbai that mints domain-name NFTs.
const DEFAULT_CONTRACT_ADDRESS: &str = "0xe39aEBC9Ae55b5B84EDA1932416cEcc49692837e";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub chain: ChainConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    pub secret_key: String,
    pub webhook_secret: String,
    /// Seconds a webhook timestamp may lag or lead before it is rejected.
    pub signature_tolerance_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub private_key: String,
    pub contract_address: String,
    /// Value attached to every `register` call, as a decimal wei string.
    pub registration_fee_wei: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    pub amount_cents: i64,
    pub currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            stripe: StripeConfig {
                secret_key: env::var("STRIPE_SECRET_KEY")
                    .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY must be set"))?,
                webhook_secret: env::var("WEBHOOK_SECRET_KEY")
                    .map_err(|_| anyhow::anyhow!("WEBHOOK_SECRET_KEY must be set"))?,
                signature_tolerance_secs: env::var("WEBHOOK_SIGNATURE_TOLERANCE")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()?,
            },
            chain: ChainConfig {
                rpc_url: env::var("CHAIN_RPC_URL")
                    .unwrap_or_else(|_| "https://rpc-mumbai.maticvigil.com".to_string()),
                chain_id: env::var("CHAIN_ID")
                    .unwrap_or_else(|_| "80001".to_string())
                    .parse()?,
                private_key: env::var("PRIVATE_KEY")
                    .map_err(|_| anyhow::anyhow!("PRIVATE_KEY must be set"))?,
                contract_address: env::var("CONTRACT_ADDRESS")
                    .unwrap_or_else(|_| DEFAULT_CONTRACT_ADDRESS.to_string()),
                registration_fee_wei: env::var("REGISTRATION_FEE_WEI")
                    .unwrap_or_else(|_| DEFAULT_REGISTRATION_FEE_WEI.to_string()),
            },
            pricing: PricingConfig {
                amount_cents: env::var("PRICE_AMOUNT_CENTS")
                    .unwrap_or_else(|_| "10000".to_string())
                    .parse()?,
                currency: env::var("PRICE_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            },
        })
    }
}
