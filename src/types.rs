// Type definitions and enums

use std::str::FromStr;

/// Categories a domain name can be listed under. These mirror the options
/// offered at checkout; the chosen label is stored verbatim in the payment
/// metadata and passed through to the registrar contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DomainCategory {
    Letter,
    Number,
    Emoji,
    Kaomoji,
    Symbol,
    SpecialCharacter,
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainCategory::Letter => write!(f, "Letter"),
            DomainCategory::Number => write!(f, "Number"),
            DomainCategory::Emoji => write!(f, "Emoji"),
            DomainCategory::Kaomoji => write!(f, "Kaomoji"),
            DomainCategory::Symbol => write!(f, "Symbol"),
            DomainCategory::SpecialCharacter => write!(f, "Special Character"),
        }
    }
}

impl FromStr for DomainCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Letter" => Ok(DomainCategory::Letter),
            "Number" => Ok(DomainCategory::Number),
            "Emoji" => Ok(DomainCategory::Emoji),
            "Kaomoji" => Ok(DomainCategory::Kaomoji),
            "Symbol" => Ok(DomainCategory::Symbol),
            "Special Character" => Ok(DomainCategory::SpecialCharacter),
            other => Err(format!("unknown domain category: {}", other)),
        }
    }
}

/// Record of a completed payment-to-mint handoff.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MintReceipt {
    pub payment_intent_id: String,
    pub domain: String,
    pub category: String,
    pub transaction_hash: String,
    pub block_number: Option<u64>,
}
