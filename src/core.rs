//! Core types used across the DPO Kit: gateway operations and environments.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::Result;

/// A gateway operation, sent as the `Request` field of every `API3G` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateToken,
    VerifyToken,
    CancelToken,
    RefundToken,
    ChargeTokenCreditCard,
    ChargeTokenMobile,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::CreateToken,
        Operation::VerifyToken,
        Operation::CancelToken,
        Operation::RefundToken,
        Operation::ChargeTokenCreditCard,
        Operation::ChargeTokenMobile,
    ];

    /// The wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateToken => "createToken",
            Operation::VerifyToken => "verifyToken",
            Operation::CancelToken => "cancelToken",
            Operation::RefundToken => "refundToken",
            Operation::ChargeTokenCreditCard => "chargeTokenCreditCard",
            Operation::ChargeTokenMobile => "chargeTokenMobile",
        }
    }

    /// Whether re-polling the gateway with the same request is safe.
    ///
    /// Only these operations are driven through the bounded retry loop;
    /// every other operation gets exactly one attempt.
    pub fn is_idempotent(&self) -> bool {
        matches!(
            self,
            Operation::VerifyToken | Operation::CancelToken | Operation::RefundToken
        )
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operation {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                serde::de::Error::custom(format!("Unsupported DPO operation '{s}'"))
            })
    }
}

/// Which DPO deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Sandbox traffic. Request bodies are pretty-printed.
    #[default]
    Test,
    /// Production traffic.
    Live,
}

impl Environment {
    pub const TEST_API_URL: &str = "https://secure1.sandbox.directpay.online/API/v6/";
    pub const LIVE_API_URL: &str = "https://secure.3gdirectpay.com/API/v6/";
    pub const TEST_PAY_URL: &str = "https://secure1.sandbox.directpay.online/payv2.php";
    pub const LIVE_PAY_URL: &str = "https://secure.3gdirectpay.com/payv2.php";

    pub fn is_test(&self) -> bool {
        matches!(self, Environment::Test)
    }

    /// The default endpoints of this environment.
    pub fn endpoints(&self) -> Result<Endpoints> {
        let (api, pay) = match self {
            Environment::Test => (Self::TEST_API_URL, Self::TEST_PAY_URL),
            Environment::Live => (Self::LIVE_API_URL, Self::LIVE_PAY_URL),
        };
        Ok(Endpoints {
            api: Url::parse(api)?,
            pay: Url::parse(pay)?,
        })
    }
}

/// Gateway URLs for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Where `API3G` documents are posted.
    pub api: Url,
    /// Hosted payment page end users are redirected to.
    pub pay: Url,
}

impl Endpoints {
    /// Redirect URL of the hosted payment page for a transaction token.
    pub fn payment_url(&self, trans_token: &str) -> Url {
        let mut url = self.pay.clone();
        url.query_pairs_mut().clear().append_pair("ID", trans_token);
        url
    }
}
