use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiRequest, ApiResponse, require},
    codes::ResultCode,
    core::Operation,
    errors::Result,
};

/// Polls the state of a transaction token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyTokenRequest {
    pub company_token: String,
    pub request: Operation,
    pub transaction_token: String,
}

impl VerifyTokenRequest {
    pub fn new(company_token: impl Into<String>, transaction_token: impl Into<String>) -> Self {
        VerifyTokenRequest {
            company_token: company_token.into(),
            request: Operation::VerifyToken,
            transaction_token: transaction_token.into(),
        }
    }
}

impl ApiRequest for VerifyTokenRequest {
    type Response = VerifyTokenResponse;

    fn operation(&self) -> Operation {
        self.request
    }

    fn validate(&self) -> Result<()> {
        require("TransactionToken", &self.transaction_token)
    }
}

/// Transaction state and payer details. Fields the gateway leaves out are empty.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VerifyTokenResponse {
    pub result: ResultCode,
    pub result_explanation: String,
    pub customer_name: String,
    pub customer_credit: String,
    pub customer_credit_type: String,
    pub transaction_approval: String,
    pub transaction_currency: String,
    pub transaction_amount: String,
    pub fraud_alert: String,
    // sic, the gateway's spelling
    #[serde(rename = "FraudExplnation", alias = "FraudExplanation")]
    pub fraud_explanation: String,
    pub transaction_net_amount: String,
    pub transaction_settlement_date: String,
    pub customer_phone: String,
    pub customer_country: String,
    pub acc_ref: String,
}

impl VerifyTokenResponse {
    pub fn is_paid(&self) -> bool {
        self.result.is_success()
    }
}

impl ApiResponse for VerifyTokenResponse {
    fn result_code(&self) -> &ResultCode {
        &self.result
    }

    fn explanation(&self) -> &str {
        &self.result_explanation
    }
}
