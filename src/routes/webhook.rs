use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json as ResponseJson,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::models::{AppState, WebhookAck};
use crate::stripe::{verify_signature, WebhookEvent, PAYMENT_INTENT_SUCCEEDED};
use crate::types::MintReceipt;
use crate::utils::with_retry;

/// Attempts per mint before giving the event back to Stripe's retry schedule.
const MINT_MAX_ATTEMPTS: u32 = 3;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/webhook", post(handle_webhook))
        .with_state(state)
}

/// Stripe webhook receiver. Verifies the delivery signature against the raw
/// body, then mints the purchased domain when a payment intent succeeds.
///
/// Response codes drive Stripe's delivery behavior: 2xx acknowledges the
/// event, anything else makes Stripe redeliver it later. Events we cannot act
/// on (wrong type, missing metadata) are therefore acknowledged, while mint
/// failures return 500 so the handoff is retried.
async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ResponseJson<WebhookAck>, (StatusCode, String)> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            warn!("webhook delivery without Stripe-Signature header");
            (
                StatusCode::BAD_REQUEST,
                "Webhook Error: missing Stripe-Signature header".to_string(),
            )
        })?;

    let now = chrono::Utc::now().timestamp();
    verify_signature(
        &body,
        signature,
        &state.config.stripe.webhook_secret,
        state.config.stripe.signature_tolerance_secs,
        now,
    )
    .map_err(|e| {
        warn!(error = %e, "webhook signature verification failed");
        (StatusCode::BAD_REQUEST, format!("Webhook Error: {}", e))
    })?;

    let event: WebhookEvent = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "webhook body is not a valid event");
        (StatusCode::BAD_REQUEST, format!("Webhook Error: {}", e))
    })?;

    if event.event_type != PAYMENT_INTENT_SUCCEEDED {
        debug!(event = %event.id, event_type = %event.event_type, "ignoring event type");
        return Ok(Json(WebhookAck { received: true }));
    }

    let intent = event.data.object;
    let (domain, category) = match (
        intent.metadata_field("domain"),
        intent.metadata_field("category"),
    ) {
        (Some(d), Some(c)) => (d.to_string(), c.to_string()),
        _ => {
            // Someone paid but we have nothing to mint. Acknowledge so Stripe
            // stops redelivering, and leave a loud trail for manual follow-up.
            error!(
                event = %event.id,
                payment_intent = %intent.id,
                "succeeded payment is missing domain/category metadata, skipping mint"
            );
            return Ok(Json(WebhookAck { received: true }));
        }
    };

    {
        let mut minted = state.minted.lock().await;
        if !minted.insert(intent.id.clone()) {
            info!(
                payment_intent = %intent.id,
                "duplicate delivery for already-minted payment, acknowledging"
            );
            return Ok(Json(WebhookAck { received: true }));
        }
    }

    let registrar = state.registrar.clone();
    let mint_domain = domain.clone();
    let mint_category = category.clone();
    let result = with_retry(
        move || {
            let registrar = registrar.clone();
            let domain = mint_domain.clone();
            let category = mint_category.clone();
            Box::pin(async move { registrar.register(&domain, &category).await })
        },
        MINT_MAX_ATTEMPTS,
    )
    .await;

    match result {
        Ok(outcome) => {
            let receipt = MintReceipt {
                payment_intent_id: intent.id.clone(),
                domain,
                category,
                transaction_hash: outcome.transaction_hash,
                block_number: outcome.block_number,
            };
            info!(
                payment_intent = %receipt.payment_intent_id,
                domain = %receipt.domain,
                category = %receipt.category,
                tx = %receipt.transaction_hash,
                amount = intent.amount,
                "mint transaction confirmed"
            );
            Ok(Json(WebhookAck { received: true }))
        }
        Err(e) => {
            // Undo the dedup entry so the redelivered event can mint.
            state.minted.lock().await.remove(&intent.id);
            error!(
                payment_intent = %intent.id,
                error = %e,
                "mint failed after retries, returning 500 for redelivery"
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Webhook Error: mint failed".to_string(),
            ))
        }
    }
}
