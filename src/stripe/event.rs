// Typed webhook event envelope

use serde::Deserialize;
use std::collections::HashMap;

pub const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: PaymentIntentObject,
}

/// The `data.object` of a payment_intent.* event. Other event families carry
/// different objects; extra fields are ignored and the ones below are
/// defaulted, so deserialization never fails on an event we do not act on.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentObject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl PaymentIntentObject {
    pub fn metadata_field(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
