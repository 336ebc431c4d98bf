use crate::chain::Registrar;
use crate::config::Config;
use crate::stripe::StripeClient;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use validator::{Validate, ValidationError};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub stripe: StripeClient,
    pub registrar: Arc<dyn Registrar>,
    /// Payment intents already minted in this process. Stripe redelivers
    /// webhooks until it sees a 2xx, so duplicate deliveries must not mint twice.
    pub minted: Arc<Mutex<HashSet<String>>>,
}

#[derive(Debug, Clone, serde::Deserialize, Validate)]
pub struct CreateIntentRequest {
    #[validate(length(min = 1, max = 64), custom(function = validate_domain))]
    pub domain: String,
    #[validate(custom(function = validate_category))]
    pub category: String,
}

fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    if domain.trim().is_empty() {
        return Err(ValidationError::new("domain_blank"));
    }
    // Names are sold without the TLD suffix; a dot means the buyer typed one.
    if domain.contains('.') {
        return Err(ValidationError::new("domain_contains_dot"));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    category
        .parse::<crate::types::DomainCategory>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_category"))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CreateIntentResponse {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
