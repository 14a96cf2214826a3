use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiRequest, ApiResponse},
    codes::ResultCode,
    core::Operation,
    types::{Flag, PaymentAmount, ServiceDate},
};

/// Creates a transaction token, the first step of every payment.
///
/// ```xml
/// <?xml version="1.0" encoding="utf-8"?>
/// <API3G>
///   <CompanyToken>57466282-EBD7-4ED5-B699-8659330A6996</CompanyToken>
///   <Request>createToken</Request>
///   <Transaction>
///     <PaymentAmount>450.00</PaymentAmount>
///     <PaymentCurrency>USD</PaymentCurrency>
///     <CompanyRef>49FKEOA</CompanyRef>
///     <RedirectURL>http://www.domain.com/payurl.php</RedirectURL>
///     <BackURL>http://www.domain.com/backurl.php</BackURL>
///     <CompanyRefUnique>0</CompanyRefUnique>
///     <PTL>5</PTL>
///   </Transaction>
///   <Services>
///     <Service>
///       <ServiceType>45</ServiceType>
///       <ServiceDescription>Flight from Nairobi to Diani</ServiceDescription>
///       <ServiceDate>2013/12/20 19:00</ServiceDate>
///     </Service>
///   </Services>
/// </API3G>
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTokenRequest {
    pub company_token: String,
    pub request: Operation,
    pub transaction: CreateTokenTransaction,
    #[serde(skip_serializing_if = "Services::is_empty")]
    pub services: Services,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTokenTransaction {
    pub payment_amount: PaymentAmount,
    pub payment_currency: String,
    pub company_ref: String,
    #[serde(rename = "RedirectURL")]
    pub redirect_url: String,
    #[serde(rename = "BackURL")]
    pub back_url: String,
    pub company_ref_unique: Flag,
    /// Payment time limit in hours.
    #[serde(rename = "PTL")]
    pub ptl: u32,
}

/// Line items of a token request.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Services {
    #[serde(rename = "Service")]
    pub service: Vec<Service>,
}

impl Services {
    pub fn is_empty(&self) -> bool {
        self.service.is_empty()
    }

    pub fn len(&self) -> usize {
        self.service.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.service.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Service {
    pub service_type: String,
    pub service_description: String,
    pub service_date: ServiceDate,
}

impl CreateTokenRequest {
    pub const DEFAULT_PTL: u32 = 5;

    pub fn new(
        company_token: impl Into<String>,
        payment_currency: impl Into<String>,
        amount: impl Into<PaymentAmount>,
    ) -> Self {
        CreateTokenRequest {
            company_token: company_token.into(),
            request: Operation::CreateToken,
            transaction: CreateTokenTransaction {
                payment_amount: amount.into(),
                payment_currency: payment_currency.into(),
                company_ref: String::new(),
                redirect_url: String::new(),
                back_url: String::new(),
                company_ref_unique: Flag(false),
                ptl: Self::DEFAULT_PTL,
            },
            services: Services::default(),
        }
    }

    /// Append a line item. Items keep their call order.
    pub fn add_service(
        &mut self,
        type_code: impl Into<String>,
        description: impl Into<String>,
        service_date: NaiveDateTime,
    ) -> &mut Self {
        self.services.service.push(Service {
            service_type: type_code.into(),
            service_description: description.into(),
            service_date: ServiceDate(service_date),
        });
        self
    }

    pub fn set_redirect_url(&mut self, redirect_url: impl Into<String>) -> &mut Self {
        self.transaction.redirect_url = redirect_url.into();
        self
    }

    pub fn set_back_url(&mut self, back_url: impl Into<String>) -> &mut Self {
        self.transaction.back_url = back_url.into();
        self
    }

    pub fn set_company_ref(&mut self, company_ref: impl Into<String>) -> &mut Self {
        self.transaction.company_ref = company_ref.into();
        self
    }

    /// Ask the gateway to reject a second token with the same company reference.
    pub fn set_company_ref_unique(&mut self, unique: bool) -> &mut Self {
        self.transaction.company_ref_unique = Flag(unique);
        self
    }

    pub fn set_ptl(&mut self, hours: u32) -> &mut Self {
        self.transaction.ptl = hours;
        self
    }

    pub fn services(&self) -> &[Service] {
        &self.services.service
    }
}

impl ApiRequest for CreateTokenRequest {
    type Response = CreateTokenResponse;

    fn operation(&self) -> Operation {
        self.request
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateTokenResponse {
    pub result: ResultCode,
    pub result_explanation: String,
    /// Opaque token every later call for this transaction needs.
    pub trans_token: String,
    pub trans_ref: String,
    pub allocations: Allocations,
}

impl CreateTokenResponse {
    pub fn is_error(&self) -> bool {
        !self.result.is_success()
    }
}

impl ApiResponse for CreateTokenResponse {
    fn result_code(&self) -> &ResultCode {
        &self.result
    }

    fn explanation(&self) -> &str {
        &self.result_explanation
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Allocations {
    #[serde(rename = "Allocation")]
    pub allocation: Vec<Allocation>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Allocation {
    #[serde(rename = "AllocationID")]
    pub allocation_id: String,
    #[serde(rename = "AllocationCode")]
    pub allocation_code: String,
}
