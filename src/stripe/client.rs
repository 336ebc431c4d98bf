// Stripe API client (form-encoded REST, Bearer auth)

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;

const STRIPE_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone)]
pub struct StripeClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl StripeClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, STRIPE_API_BASE.to_string())
    }

    /// Tests point this at a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a PaymentIntent carrying the domain and category as metadata.
    /// The metadata is what the webhook handler later reads back to know what
    /// to mint, so it must be attached here and nowhere else.
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        domain: &str,
        category: &str,
    ) -> Result<PaymentIntent> {
        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .form(&[
                ("amount", amount_cents.to_string()),
                ("currency", currency.to_string()),
                ("automatic_payment_methods[enabled]", "true".to_string()),
                ("metadata[domain]", domain.to_string()),
                ("metadata[category]", category.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Stripe API error: {}", error_text));
        }

        let payment_intent = response.json::<PaymentIntent>().await?;
        Ok(payment_intent)
    }

    pub async fn retrieve_payment_intent(&self, intent_id: &str) -> Result<PaymentIntent> {
        let url = format!("{}/v1/payment_intents/{}", self.base_url, intent_id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Stripe API error: {}", error_text));
        }

        let payment_intent = response.json::<PaymentIntent>().await?;
        Ok(payment_intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_payment_intent_sends_metadata() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/payment_intents")
            .match_header("authorization", "Bearer sk_test_123")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("amount".into(), "10000".into()),
                mockito::Matcher::UrlEncoded("currency".into(), "usd".into()),
                mockito::Matcher::UrlEncoded("metadata[domain]".into(), "alice".into()),
                mockito::Matcher::UrlEncoded("metadata[category]".into(), "Letter".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                    "id": "pi_123",
                    "client_secret": "pi_123_secret_456",
                    "amount": 10000,
                    "currency": "usd",
                    "status": "requires_payment_method",
                    "metadata": {"domain": "alice", "category": "Letter"}
                }"#,
            )
            .create_async()
            .await;

        let client = StripeClient::with_base_url("sk_test_123".to_string(), server.url());
        let intent = client
            .create_payment_intent(10000, "usd", "alice", "Letter")
            .await
            .expect("create should succeed");

        mock.assert_async().await;
        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.client_secret, "pi_123_secret_456");
        assert_eq!(intent.metadata.get("domain").map(String::as_str), Some("alice"));
    }

    #[tokio::test]
    async fn test_create_payment_intent_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/payment_intents")
            .with_status(402)
            .with_body(r#"{"error": {"message": "Your card was declined."}}"#)
            .create_async()
            .await;

        let client = StripeClient::with_base_url("sk_test_123".to_string(), server.url());
        let err = client
            .create_payment_intent(10000, "usd", "alice", "Letter")
            .await
            .expect_err("non-2xx should error");

        assert!(err.to_string().contains("declined"));
    }

    #[tokio::test]
    async fn test_retrieve_payment_intent() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/payment_intents/pi_123")
            .with_status(200)
            .with_body(
                r#"{
                    "id": "pi_123",
                    "client_secret": "pi_123_secret_456",
                    "amount": 10000,
                    "currency": "usd",
                    "status": "succeeded"
                }"#,
            )
            .create_async()
            .await;

        let client = StripeClient::with_base_url("sk_test_123".to_string(), server.url());
        let intent = client
            .retrieve_payment_intent("pi_123")
            .await
            .expect("retrieve should succeed");

        assert_eq!(intent.status, "succeeded");
        assert!(intent.metadata.is_empty());
    }
}
