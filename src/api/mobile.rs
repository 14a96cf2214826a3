use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiRequest, ApiResponse, require},
    codes::ResultCode,
    core::Operation,
    errors::Result,
};

/// Charges a subscriber's mobile money wallet against a transaction token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChargeMobileRequest {
    pub company_token: String,
    pub request: Operation,
    pub transaction_token: String,
    pub phone_number: String,
    /// Mobile network operator, e.g. `Airtel`.
    #[serde(rename = "MNO")]
    pub mno: String,
    #[serde(rename = "MNOcountry")]
    pub mno_country: String,
}

impl ChargeMobileRequest {
    pub fn new(
        company_token: impl Into<String>,
        transaction_token: impl Into<String>,
        phone_number: impl Into<String>,
        mno: impl Into<String>,
        mno_country: impl Into<String>,
    ) -> Self {
        ChargeMobileRequest {
            company_token: company_token.into(),
            request: Operation::ChargeTokenMobile,
            transaction_token: transaction_token.into(),
            phone_number: phone_number.into(),
            mno: mno.into(),
            mno_country: mno_country.into(),
        }
    }
}

impl ApiRequest for ChargeMobileRequest {
    type Response = ChargeMobileResponse;

    fn operation(&self) -> Operation {
        self.request
    }

    fn validate(&self) -> Result<()> {
        require("TransactionToken", &self.transaction_token)?;
        require("PhoneNumber", &self.phone_number)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChargeMobileResponse {
    #[serde(rename = "Code", alias = "Result")]
    pub code: ResultCode,
    #[serde(rename = "Explanation", alias = "ResultExplanation")]
    pub explanation: String,
    #[serde(rename = "RedirectUrl")]
    pub redirect_url: String,
    #[serde(rename = "declinedUrl")]
    pub declined_url: String,
    /// Steps the subscriber follows on the handset to approve the charge.
    #[serde(rename = "Instructions")]
    pub instructions: String,
    #[serde(rename = "RedirectOption")]
    pub redirect_option: String,
}

impl ApiResponse for ChargeMobileResponse {
    fn result_code(&self) -> &ResultCode {
        &self.code
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}
