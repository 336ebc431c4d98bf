use axum::{
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::post,
    Json, Router,
};
use tracing::{error, info};
use validator::Validate;

use crate::models::{AppState, CreateIntentRequest, CreateIntentResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/stripe_intent", post(create_intent))
        .with_state(state)
}

/// Create a PaymentIntent for a checkout attempt. The domain and category ride
/// along as metadata so the webhook handler knows what to mint once the
/// payment settles.
async fn create_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<ResponseJson<CreateIntentResponse>, StatusCode> {
    if let Err(e) = request.validate() {
        info!(error = %e, "rejected payment intent request");
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let intent = state
        .stripe
        .create_payment_intent(
            state.config.pricing.amount_cents,
            &state.config.pricing.currency,
            &request.domain,
            &request.category,
        )
        .await
        .map_err(|e| {
            error!(error = %e, domain = %request.domain, "failed to create payment intent");
            StatusCode::BAD_GATEWAY
        })?;

    info!(
        payment_intent = %intent.id,
        domain = %request.domain,
        category = %request.category,
        "payment intent created"
    );

    Ok(Json(CreateIntentResponse {
        id: intent.id,
        client_secret: intent.client_secret,
        amount: intent.amount,
        currency: intent.currency,
    }))
}
