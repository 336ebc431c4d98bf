//! Stripe integration: outbound PaymentIntent API calls, webhook signature
//! verification, and typed webhook event payloads.

pub mod client;
pub mod event;
pub mod signature;

pub use client::{PaymentIntent, StripeClient};
pub use event::{PaymentIntentObject, WebhookEvent, PAYMENT_INTENT_SUCCEEDED};
pub use signature::{verify_signature, SignatureError};
