/// Stripe client — the single point of entry for all Stripe API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Stripe API directly.
/// All transfer creation MUST go through this module.
///
/// Transfers are attempted exactly once. Failed payouts stay visible in
/// `failed` for manual retry; there is no automatic retry loop here.
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const STRIPE_API_URL: &str = "https://api.stripe.com/v1";

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// The subset of Stripe's transfer object we record.
#[derive(Debug, Clone, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub destination: String,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    error: StripeApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeApiErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            secret_key,
        }
    }

    /// Creates a transfer to a connected account. `amount` is in minor units.
    pub async fn create_transfer(
        &self,
        amount: i64,
        currency: &str,
        destination: &str,
        transfer_group: &str,
    ) -> Result<Transfer, StripeError> {
        let params = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("destination", destination.to_string()),
            ("transfer_group", transfer_group.to_string()),
        ];

        let response = self
            .client
            .post(format!("{STRIPE_API_URL}/transfers"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeApiError>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(body);
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let transfer: Transfer = response.json().await?;
        debug!(
            "Stripe transfer {} created: {} {} -> {}",
            transfer.id, transfer.amount, transfer.currency, transfer.destination
        );
        Ok(transfer)
    }
}
