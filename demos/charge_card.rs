//! Creates a sandbox token, charges a test card against it, then polls until paid.
//!
//! ```sh
//! DPO_COMPANY_TOKEN=... RUST_LOG=debug cargo run --example charge_card
//! ```

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dpo_kit::{
    api::Card, client::Client, config::ClientConfig, errors::Error, retry::Backoff,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let company_token = std::env::var("DPO_COMPANY_TOKEN").expect("DPO_COMPANY_TOKEN not set");

    let config = ClientConfig::builder()
        .company_token(company_token)
        .max_attempts(10)
        .backoff(Backoff::Fixed(Duration::from_secs(3)))
        .build();
    let client = Client::new(config)?;

    // Build the token request
    let service_date = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .expect("valid date");
    let mut request = client.new_create_token_request("USD", Decimal::new(100, 2))?;
    request
        .add_service("5525", "Demo purchase", service_date)
        .set_redirect_url("https://shop.example/paid")
        .set_back_url("https://shop.example/cart");

    let token = client.create_token(&request).await?;
    tracing::info!(
        "Created {} ({}); hosted page at {}",
        token.trans_token,
        token.trans_ref,
        client.payment_url(&token)?
    );

    let card = Card::builder()
        .holder_name("John Doe")
        .number("5436886269848367")
        .cvv("123")
        .expiry("12/30")
        .build();
    let charge = client.charge_credit_card(&token.trans_token, card).await?;
    tracing::info!("Charge answered {}: {}", charge.result, charge.explanation);

    // Give the gateway one minute to settle
    let verified = client
        .with_deadline(Instant::now() + Duration::from_secs(60))
        .verify_token(&token.trans_token)
        .await?;
    tracing::info!(
        "Paid {} {} by {}",
        verified.transaction_amount,
        verified.transaction_currency,
        verified.customer_name
    );

    Ok(())
}
