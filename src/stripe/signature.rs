//! Webhook signature verification
//!
//! Stripe signs each webhook delivery with a `Stripe-Signature` header of the
//! form `t=<unix>,v1=<hex>[,v1=<hex>,...]`. The signed payload is the raw
//! request body prefixed with the timestamp (`"{t}.{body}"`), MACed with
//! HMAC-SHA256 under the endpoint's signing secret.
//!
//! # Security Notes
//! - Signatures are compared in constant time
//! - Timestamps outside the tolerance window are rejected to block replays
//! - Verification must run against the raw bytes, before any JSON parsing

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

/// HMAC type alias for SHA-256
type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("missing Stripe-Signature header")]
    MissingHeader,

    #[error("malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("webhook timestamp outside tolerance window")]
    TimestampOutOfTolerance,

    #[error("no signature matched the payload")]
    NoMatchingSignature,
}

/// Parsed form of the `Stripe-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    /// All `v1` candidates; any one matching accepts the event. Stripe sends
    /// several during signing-secret rotation.
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| SignatureError::MalformedHeader(part.to_string()))?;
            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        SignatureError::MalformedHeader(format!("bad timestamp: {}", value))
                    })?);
                }
                "v1" => signatures.push(value.to_string()),
                // v0 (and anything newer) is for Stripe's internal use
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| SignatureError::MalformedHeader("missing t field".to_string()))?;
        if signatures.is_empty() {
            return Err(SignatureError::MalformedHeader(
                "missing v1 signature".to_string(),
            ));
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Verify a webhook delivery against the signing secret.
///
/// `tolerance_secs` bounds how far the signed timestamp may drift from `now`
/// in either direction.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), SignatureError> {
    let parsed = SignatureHeader::parse(header)?;

    if (now - parsed.timestamp).abs() > tolerance_secs {
        return Err(SignatureError::TimestampOutOfTolerance);
    }

    let expected = compute_signature(payload, parsed.timestamp, secret);
    for candidate in &parsed.signatures {
        if constant_time_compare(expected.as_bytes(), candidate.as_bytes()) {
            return Ok(());
        }
    }

    Err(SignatureError::NoMatchingSignature)
}

/// Hex-encoded HMAC-SHA256 of `"{timestamp}.{payload}"`.
pub fn compute_signature(payload: &[u8], timestamp: i64, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time byte comparison
///
/// Compares two byte slices in constant time to prevent timing attacks.
/// Returns `false` if lengths differ.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
