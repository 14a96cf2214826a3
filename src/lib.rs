//! # DPO Kit
//!
//! A typed client for the DPO (3G Direct Pay) `API3G` payment gateway.
//!
//! DPO Kit builds the gateway's XML documents, posts them, parses the answers,
//! and turns the gateway's three-digit result codes into typed successes or
//! errors. It is **not** a payment engine: it keeps no transaction history, and
//! the transaction token returned by [`Client::create_token`](client::Client::create_token)
//! must be threaded into later calls by the caller.
//!
//! ## Core Components Overview
//!
//! - **[`client`]**: The [`Client`](client::Client) and its operations.
//! - **[`api`]**: Request and response documents for every gateway operation.
//! - **[`codes`]**: Result codes and the `(operation, code) -> outcome` table.
//! - **[`retry`]**: The attempt state machine, backoff strategies, and clocks.
//! - **[`transport`]**: The [`Transport`](transport::Transport) seam and its `reqwest` implementation.
//! - **[`config`]**: Client configuration.
//! - **[`reference`]**: Company reference generators.
//!
//! ## Payment Flow
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use dpo_kit::{client::Client, config::ClientConfig};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> dpo_kit::errors::Result<()> {
//! let client = Client::new(ClientConfig::test("57466282-EBD7-4ED5-B699-8659330A6996"))?;
//!
//! let service_date = NaiveDate::from_ymd_opt(2025, 6, 1)
//!     .and_then(|date| date.and_hms_opt(10, 0, 0))
//!     .expect("valid date");
//!
//! let mut request = client.new_create_token_request("USD", Decimal::new(30, 2))?;
//! request
//!     .add_service("3854", "Ecommerce", service_date)
//!     .set_redirect_url("https://shop.example/paid")
//!     .set_back_url("https://shop.example/cart");
//!
//! let token = client.create_token(&request).await?;
//! println!("Send the customer to {}", client.payment_url(&token)?);
//!
//! let verified = client.verify_token(&token.trans_token).await?;
//! println!("Paid by {}", verified.customer_name);
//! # Ok(())
//! # }
//! ```
//!
//! ## Retries
//!
//! Only polling operations (`verifyToken`, `cancelToken`, `refundToken`) are
//! re-sent, and only while the gateway answers with a code that the
//! [`ClassificationTable`](codes::ClassificationTable) marks transient. Charges
//! and token creation are sent exactly once. HTTP errors, transport failures and
//! unparsable bodies are never retried.
//!
//! ```
//! use std::time::Duration;
//! use dpo_kit::{
//!     codes::{ClassificationTable, CodePartition, ResultCode},
//!     config::ClientConfig,
//!     core::Operation,
//!     retry::Backoff,
//! };
//!
//! // Treat "not paid yet" as pending while polling a token
//! let table = ClassificationTable::default().with(
//!     Operation::VerifyToken,
//!     CodePartition::new(
//!         &[ResultCode::TRANSACTION_CHARGED],
//!         &[ResultCode::PENDING_BANK, ResultCode::NOT_PAID_YET],
//!     ),
//! );
//!
//! let config = ClientConfig::builder()
//!     .company_token("57466282-EBD7-4ED5-B699-8659330A6996")
//!     .max_attempts(10)
//!     .backoff(Backoff::Fixed(Duration::from_secs(3)))
//!     .classification(table)
//!     .build();
//! # let _ = config;
//! ```

pub mod api;
pub mod client;
pub mod codes;
pub mod config;
pub mod core;
pub mod errors;
pub mod mask;
pub mod reference;
pub mod retry;
pub mod transport;
pub mod types;
pub mod xml;
