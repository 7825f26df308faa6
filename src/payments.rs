use reqwest::Client;
use serde::Deserialize;

use crate::{config::AppConfig, error::AppResult};

/// Client for the hosted payment gateway. The backend only ever makes one
/// call against it: create a payment intent for an amount and hand the
/// resulting client secret back to the front end.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    http: Client,
    base_url: String,
    secret: String,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

impl PaymentsClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.payment_gateway_url.trim_end_matches('/').to_string(),
            secret: config.payment_gateway_secret.clone(),
            currency: config.payment_currency.clone(),
        }
    }

    /// Create a payment intent for `amount` (in cents) and return the
    /// client-usable secret unchanged.
    pub async fn create_intent(&self, amount: i64) -> AppResult<String> {
        let url = format!("{}/v1/payment_intents", self.base_url);
        let params = [
            ("amount", amount.to_string()),
            ("currency", self.currency.clone()),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        let intent: IntentResponse = response.json().await?;
        Ok(intent.client_secret)
    }
}
