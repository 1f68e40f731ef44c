use reqwest::Client;
use serde::Deserialize;

use crate::core::error::{AppError, Result};

/// Stripe's universal test card; always tokenizes successfully in sandbox.
pub const TEST_CARD_NUMBER: &str = "4242424242424242";

const TOKENS_URL: &str = "https://api.stripe.com/v1/tokens";

/// Request a token for the hardcoded test card from the Stripe sandbox.
///
/// Returns the token id (`tok_...`). Only ever pointed at a sandbox secret
/// key; the card data is Stripe's published test fixture.
pub async fn create_stripe_token(client: &Client, secret_key: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct TokenResponse {
        id: String,
    }

    let params = [
        ("card[number]", TEST_CARD_NUMBER),
        ("card[exp_month]", "12"),
        ("card[exp_year]", "2028"),
        ("card[cvc]", "222"),
    ];

    let response = client
        .post(TOKENS_URL)
        .basic_auth(secret_key, None::<&str>)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::delivery(format!("Stripe API error: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response.text().await.unwrap_or_default();
        return Err(AppError::delivery(format!(
            "Stripe API error {}: {}",
            status, error_body
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AppError::delivery(format!("Failed to parse Stripe response: {}", e)))?;

    Ok(token.id)
}
