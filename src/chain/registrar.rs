use crate::config::ChainConfig;
use async_trait::async_trait;
use ethers::prelude::*;
use std::sync::Arc;
use thiserror::Error;

abigen!(
    DomainRegistry,
    r#"[
        function register(string domain, string category) external payable
    ]"#
);

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("invalid chain configuration: {0}")]
    Config(String),

    #[error("register transaction failed: {0}")]
    Transaction(String),

    #[error("register transaction dropped from the mempool")]
    Dropped,
}

/// What a confirmed `register` call produced.
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
}

/// Seam between the webhook handler and the chain. The handler only ever
/// needs "mint this domain under this category"; tests substitute a mock.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn register(&self, domain: &str, category: &str) -> Result<TxOutcome, RegistrarError>;
}

/// Registrar backed by an ethers JSON-RPC provider and a local signing key.
#[derive(Debug)]
pub struct EthersRegistrar {
    contract: DomainRegistry<SignerMiddleware<Provider<Http>, LocalWallet>>,
    fee: U256,
}

impl EthersRegistrar {
    pub fn from_config(config: &ChainConfig) -> Result<Self, RegistrarError> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| RegistrarError::Config(format!("bad rpc url: {}", e)))?;

        let wallet = config
            .private_key
            .parse::<LocalWallet>()
            .map_err(|e| RegistrarError::Config(format!("bad private key: {}", e)))?
            .with_chain_id(config.chain_id);

        let address = config
            .contract_address
            .parse::<Address>()
            .map_err(|_| {
                RegistrarError::Config(format!(
                    "bad contract address: {}",
                    config.contract_address
                ))
            })?;

        let fee = U256::from_dec_str(&config.registration_fee_wei)
            .map_err(|e| RegistrarError::Config(format!("bad registration fee: {}", e)))?;

        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        Ok(Self {
            contract: DomainRegistry::new(address, client),
            fee,
        })
    }
}

#[async_trait]
impl Registrar for EthersRegistrar {
    async fn register(&self, domain: &str, category: &str) -> Result<TxOutcome, RegistrarError> {
        let call = self
            .contract
            .register(domain.to_string(), category.to_string())
            .value(self.fee);

        let pending = call
            .send()
            .await
            .map_err(|e| RegistrarError::Transaction(e.to_string()))?;

        // A None receipt means the node no longer knows the transaction.
        let receipt = pending
            .await
            .map_err(|e| RegistrarError::Transaction(e.to_string()))?
            .ok_or(RegistrarError::Dropped)?;

        Ok(TxOutcome {
            transaction_hash: format!("{:?}", receipt.transaction_hash),
            block_number: receipt.block_number.map(|b| b.as_u64()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 80001,
            private_key: "0x0123456789012345678901234567890123456789012345678901234567890123"
                .to_string(),
            contract_address: "0xe39aEBC9Ae55b5B84EDA1932416cEcc49692837e".to_string(),
            registration_fee_wei: "10000000000000000".to_string(),
        }
    }

    #[test]
    fn test_from_config_accepts_valid_config() {
        assert!(EthersRegistrar::from_config(&base_config()).is_ok());
    }

    #[test]
    fn test_from_config_rejects_bad_private_key() {
        let mut config = base_config();
        config.private_key = "not-a-key".to_string();
        let err = EthersRegistrar::from_config(&config).unwrap_err();
        assert!(matches!(err, RegistrarError::Config(_)));
    }

    #[test]
    fn test_from_config_rejects_bad_contract_address() {
        let mut config = base_config();
        config.contract_address = "0x1234".to_string();
        let err = EthersRegistrar::from_config(&config).unwrap_err();
        assert!(matches!(err, RegistrarError::Config(_)));
    }

    #[test]
    fn test_from_config_rejects_bad_fee() {
        let mut config = base_config();
        config.registration_fee_wei = "0.01 ether".to_string();
        let err = EthersRegistrar::from_config(&config).unwrap_err();
        assert!(matches!(err, RegistrarError::Config(_)));
    }
}
