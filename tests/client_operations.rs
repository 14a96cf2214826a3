mod common;

use common::{COMPANY_TOKEN, ManualClock, MockTransport, client};
use dpo_kit::{
    api::{CreateTokenResponse, Refund},
    client::Client,
    config::ClientConfig,
    core::{Endpoints, Environment},
    errors::Error,
    reference::{ReferenceError, ReferenceGenerator, SequentialReference},
};
use chrono::NaiveDate;
use http::StatusCode;
use rust_decimal_macros::dec;

const CREATED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<API3G>
  <Result>000</Result>
  <ResultExplanation>Transaction created</ResultExplanation>
  <TransToken>72983CAC-5DB1-4C7F-BD88-352066B71592</TransToken>
  <TransRef>1285DB12G</TransRef>
</API3G>"#;

#[tokio::test]
async fn test_create_token_wire_format() {
    let transport = MockTransport::new().respond(StatusCode::OK, CREATED);
    let clock = ManualClock::new();
    let client = client(&transport, &clock, 5)
        .with_reference_generator(SequentialReference::new("order"));

    let mut request = client.new_create_token_request("USD", dec!(450.00)).unwrap();
    request
        .add_service(
            "45",
            "Flight from Nairobi to Diani",
            NaiveDate::from_ymd_opt(2013, 12, 20)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
        )
        .set_redirect_url("http://www.domain.com/payurl.php")
        .set_back_url("http://www.domain.com/backurl.php");

    let response = client.create_token(&request).await.unwrap();
    assert_eq!(response.trans_token, "72983CAC-5DB1-4C7F-BD88-352066B71592");
    assert_eq!(response.trans_ref, "1285DB12G");

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url.as_str(), Environment::TEST_API_URL);

    let body = &sent[0].body;
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<API3G>"), "{body}");
    // Sandbox traffic is pretty-printed
    assert!(
        body.contains(&format!("\n    <CompanyToken>{COMPANY_TOKEN}</CompanyToken>")),
        "{body}"
    );
    assert!(body.contains("<Request>createToken</Request>"), "{body}");
    assert!(body.contains("<PaymentAmount>450.00</PaymentAmount>"), "{body}");
    assert!(body.contains("<CompanyRef>order-1</CompanyRef>"), "{body}");
    assert!(body.contains("<ServiceDate>2013/12/20 19:00</ServiceDate>"), "{body}");
}

#[tokio::test]
async fn test_live_traffic_is_compact() {
    let transport = MockTransport::new().always_code("000", "Transaction Paid");
    let client = Client::with_transport(ClientConfig::live(COMPANY_TOKEN), transport.clone())
        .unwrap()
        .with_clock(ManualClock::new());

    client.verify_token("TOKEN").await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].url.as_str(), Environment::LIVE_API_URL);
    assert!(sent[0].body.ends_with(&format!(
        "<API3G><CompanyToken>{COMPANY_TOKEN}</CompanyToken><Request>verifyToken</Request><TransactionToken>TOKEN</TransactionToken></API3G>"
    )));
}

#[tokio::test]
async fn test_endpoint_override() {
    let endpoints = Endpoints {
        api: "http://localhost:9090/API/v6/".parse().unwrap(),
        pay: "http://localhost:9090/payv2.php".parse().unwrap(),
    };
    let config = ClientConfig::builder()
        .company_token(COMPANY_TOKEN)
        .endpoints(endpoints)
        .build();
    let transport = MockTransport::new().always_code("000", "Transaction cancelled");
    let client = Client::with_transport(config, transport.clone())
        .unwrap()
        .with_clock(ManualClock::new());

    client.cancel_token("TOKEN").await.unwrap();
    assert_eq!(
        transport.sent()[0].url.as_str(),
        "http://localhost:9090/API/v6/"
    );
}

#[tokio::test]
async fn test_mobile_new_invoice_is_success() {
    let transport = MockTransport::new().respond(
        StatusCode::OK,
        "<API3G><Code>130</Code><Explanation>New invoice</Explanation><Instructions>Dial *334#</Instructions><RedirectOption>0</RedirectOption></API3G>",
    );
    let clock = ManualClock::new();

    let response = client(&transport, &clock, 5)
        .charge_mobile("TOKEN", "254700000000", "mpesa", "kenya")
        .await
        .unwrap();

    assert_eq!(response.instructions, "Dial *334#");
    let body = &transport.sent()[0].body;
    assert!(body.contains("<PhoneNumber>254700000000</PhoneNumber>"), "{body}");
    assert!(body.contains("<MNO>mpesa</MNO>"), "{body}");
    assert!(body.contains("<MNOcountry>kenya</MNOcountry>"), "{body}");
}

#[tokio::test]
async fn test_refund_approval_flag() {
    let transport = MockTransport::new().always_code("000", "Refund successful");
    let clock = ManualClock::new();

    client(&transport, &clock, 5)
        .refund_token(
            "TOKEN",
            Refund::builder()
                .amount(dec!(5))
                .requires_approval(true)
                .build(),
        )
        .await
        .unwrap();

    let body = &transport.sent()[0].body;
    assert!(body.contains("<refundApproval>1</refundApproval>"), "{body}");
}

#[test]
fn test_payment_url() {
    let transport = MockTransport::new();
    let clock = ManualClock::new();
    let client = client(&transport, &clock, 5);

    let token = CreateTokenResponse {
        trans_token: "72983CAC-5DB1".into(),
        ..Default::default()
    };
    assert_eq!(
        client.payment_url(&token).unwrap().as_str(),
        "https://secure1.sandbox.directpay.online/payv2.php?ID=72983CAC-5DB1"
    );

    let blank = CreateTokenResponse::default();
    assert!(matches!(
        client.payment_url(&blank),
        Err(Error::Precondition(_))
    ));
}

#[test]
fn test_default_references_are_random() {
    let transport = MockTransport::new();
    let clock = ManualClock::new();
    let client = client(&transport, &clock, 5);

    let a = client.new_create_token_request("USD", dec!(1)).unwrap();
    let b = client.new_create_token_request("USD", dec!(1)).unwrap();
    assert_eq!(a.transaction.company_ref.len(), 43);
    assert_ne!(a.transaction.company_ref, b.transaction.company_ref);
}

#[test]
fn test_reference_failure_is_reported() {
    let transport = MockTransport::new();
    let clock = ManualClock::new();
    let client = client(&transport, &clock, 5)
        .with_reference_generator(|| -> Result<String, ReferenceError> {
            Err(ReferenceError::Entropy("no entropy".into()))
        });

    assert!(matches!(
        client.new_create_token_request("USD", dec!(1)),
        Err(Error::Reference(ReferenceError::Entropy(_)))
    ));

    let empty = client_with(|| -> Result<String, ReferenceError> { Ok(String::new()) });
    assert!(matches!(
        empty.new_create_token_request("USD", dec!(1)),
        Err(Error::Reference(ReferenceError::Empty))
    ));
}

#[test]
fn test_zero_attempts_rejected_at_construction() {
    let result = Client::with_transport(common::config(0), MockTransport::new());
    assert!(matches!(result, Err(Error::Precondition(_))));
}

fn client_with(
    generator: impl ReferenceGenerator + 'static,
) -> Client<MockTransport, ManualClock> {
    client(&MockTransport::new(), &ManualClock::new(), 5).with_reference_generator(generator)
}
