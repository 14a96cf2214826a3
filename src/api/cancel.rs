use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiRequest, ApiResponse, require},
    codes::ResultCode,
    core::Operation,
    errors::Result,
};

/// Cancels an unpaid transaction token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelTokenRequest {
    pub company_token: String,
    pub request: Operation,
    pub transaction_token: String,
}

impl CancelTokenRequest {
    pub fn new(company_token: impl Into<String>, transaction_token: impl Into<String>) -> Self {
        CancelTokenRequest {
            company_token: company_token.into(),
            request: Operation::CancelToken,
            transaction_token: transaction_token.into(),
        }
    }
}

impl ApiRequest for CancelTokenRequest {
    type Response = CancelTokenResponse;

    fn operation(&self) -> Operation {
        self.request
    }

    fn validate(&self) -> Result<()> {
        require("TransactionToken", &self.transaction_token)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CancelTokenResponse {
    pub result: ResultCode,
    pub result_explanation: String,
}

impl ApiResponse for CancelTokenResponse {
    fn result_code(&self) -> &ResultCode {
        &self.result
    }

    fn explanation(&self) -> &str {
        &self.result_explanation
    }
}
