use std::borrow::Cow;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiRequest, ApiResponse, require},
    codes::ResultCode,
    core::Operation,
    errors::Result,
    mask,
    types::CardExpiry,
};

/// Card details for a direct charge.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Card {
    #[builder(into)]
    pub holder_name: String,
    #[builder(into)]
    pub number: String,
    #[builder(into)]
    pub cvv: String,
    /// `MM/YY` or `MMYY`.
    #[builder(into)]
    pub expiry: CardExpiry,
    #[builder(default)]
    pub three_d: ThreeDSecure,
}

/// Charges a card against an existing transaction token.
///
/// ```xml
/// <API3G>
///   <CompanyToken>57466282-EBD7-4ED5-B699-8659330A6996</CompanyToken>
///   <Request>chargeTokenCreditCard</Request>
///   <TransactionToken>72983CAC-5DB1-4C7F-BD88-352066B71592</TransactionToken>
///   <CreditCardNumber>123412341234</CreditCardNumber>
///   <CreditCardExpiry>1214</CreditCardExpiry>
///   <CreditCardCVV>333</CreditCardCVV>
///   <CardHolderName>John Doe</CardHolderName>
///   <ThreeD>...</ThreeD>
/// </API3G>
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChargeCreditCardRequest {
    pub company_token: String,
    pub request: Operation,
    pub transaction_token: String,
    pub credit_card_number: String,
    pub credit_card_expiry: CardExpiry,
    #[serde(rename = "CreditCardCVV")]
    pub credit_card_cvv: String,
    pub card_holder_name: String,
    pub three_d: ThreeDSecure,
}

/// 3-D Secure authentication data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThreeDSecure {
    pub enrolled: String,
    pub paresstatus: String,
    pub eci: String,
    pub xid: String,
    pub cavv: String,
    pub signature: String,
    pub veres: String,
    pub pares: String,
}

impl Default for ThreeDSecure {
    /// A frictionless, successfully authenticated card.
    fn default() -> Self {
        ThreeDSecure {
            enrolled: "Y".into(),
            paresstatus: "Y".into(),
            eci: "05".into(),
            xid: String::new(),
            cavv: String::new(),
            signature: "_".into(),
            veres: "AUTHENTICATION_SUCCESSFUL".into(),
            pares: String::new(),
        }
    }
}

impl ChargeCreditCardRequest {
    pub fn new(
        company_token: impl Into<String>,
        transaction_token: impl Into<String>,
        card: Card,
    ) -> Self {
        ChargeCreditCardRequest {
            company_token: company_token.into(),
            request: Operation::ChargeTokenCreditCard,
            transaction_token: transaction_token.into(),
            credit_card_number: card.number,
            credit_card_expiry: card.expiry,
            credit_card_cvv: card.cvv,
            card_holder_name: card.holder_name,
            three_d: card.three_d,
        }
    }
}

impl ApiRequest for ChargeCreditCardRequest {
    type Response = ChargeCreditCardResponse;

    fn operation(&self) -> Operation {
        self.request
    }

    fn validate(&self) -> Result<()> {
        require("TransactionToken", &self.transaction_token)?;
        require("CreditCardNumber", &self.credit_card_number)
    }

    fn redacted(&self) -> Cow<'_, Self> {
        let mut masked = self.clone();
        masked.credit_card_number = mask::mask_card_number(&self.credit_card_number);
        masked.credit_card_cvv = mask::mask_cvv(&self.credit_card_cvv);
        Cow::Owned(masked)
    }
}

/// The gateway has been seen to answer with either `Result` or `Code`.
///
/// ```xml
/// <API3G>
///   <Code>200</Code>
///   <Explanation>Transaction already paid</Explanation>
///   <RedirectUrl>https://redirect.com</RedirectUrl>
///   <BackUrl></BackUrl>
///   <declinedUrl></declinedUrl>
/// </API3G>
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChargeCreditCardResponse {
    #[serde(rename = "Result", alias = "Code")]
    pub result: ResultCode,
    #[serde(rename = "ResultExplanation", alias = "Explanation")]
    pub explanation: String,
    #[serde(rename = "RedirectUrl")]
    pub redirect_url: String,
    #[serde(rename = "BackUrl")]
    pub back_url: String,
    #[serde(rename = "declinedUrl")]
    pub declined_url: String,
}

impl ChargeCreditCardResponse {
    pub fn is_error(&self) -> bool {
        !self.result.is_success()
    }
}

impl ApiResponse for ChargeCreditCardResponse {
    fn result_code(&self) -> &ResultCode {
        &self.result
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}
