use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiRequest, ApiResponse, require},
    codes::ResultCode,
    core::Operation,
    errors::Result,
    types::{Flag, PaymentAmount},
};

/// What to refund on a paid transaction.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Refund {
    #[builder(into)]
    pub amount: PaymentAmount,
    /// Merchant reference of the refund.
    #[builder(into, default)]
    pub reference: String,
    #[builder(into, default)]
    pub description: String,
    /// Hold the refund until it is approved in the merchant portal.
    #[builder(default)]
    pub requires_approval: bool,
}

/// Refunds all or part of a paid transaction token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefundTokenRequest {
    #[serde(rename = "CompanyToken")]
    pub company_token: String,
    #[serde(rename = "Request")]
    pub request: Operation,
    #[serde(rename = "TransactionToken")]
    pub transaction_token: String,
    #[serde(rename = "refundAmount")]
    pub refund_amount: PaymentAmount,
    #[serde(rename = "refundDetails")]
    pub refund_details: String,
    #[serde(rename = "refundRef")]
    pub refund_ref: String,
    #[serde(rename = "refundApproval")]
    pub refund_approval: Flag,
}

impl RefundTokenRequest {
    pub fn new(
        company_token: impl Into<String>,
        transaction_token: impl Into<String>,
        refund: Refund,
    ) -> Self {
        RefundTokenRequest {
            company_token: company_token.into(),
            request: Operation::RefundToken,
            transaction_token: transaction_token.into(),
            refund_amount: refund.amount,
            refund_details: refund.description,
            refund_ref: refund.reference,
            refund_approval: Flag(refund.requires_approval),
        }
    }
}

impl ApiRequest for RefundTokenRequest {
    type Response = RefundTokenResponse;

    fn operation(&self) -> Operation {
        self.request
    }

    fn validate(&self) -> Result<()> {
        require("TransactionToken", &self.transaction_token)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RefundTokenResponse {
    pub result: ResultCode,
    pub result_explanation: String,
}

impl ApiResponse for RefundTokenResponse {
    fn result_code(&self) -> &ResultCode {
        &self.result
    }

    fn explanation(&self) -> &str {
        &self.result_explanation
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::xml::to_xml;

    #[test]
    fn test_refund_amount_is_transmitted() {
        let refund = Refund::builder()
            .amount(dec!(12.50))
            .reference("RF-1")
            .description("Damaged goods")
            .requires_approval(true)
            .build();
        let xml = to_xml(&RefundTokenRequest::new("COMPANY", "TOKEN", refund), false).unwrap();
        for fragment in [
            "<Request>refundToken</Request>",
            "<refundAmount>12.50</refundAmount>",
            "<refundDetails>Damaged goods</refundDetails>",
            "<refundRef>RF-1</refundRef>",
            "<refundApproval>1</refundApproval>",
        ] {
            assert!(xml.contains(fragment), "missing {fragment} in {xml}");
        }
    }
}
