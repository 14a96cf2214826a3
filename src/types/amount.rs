use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// A monetary amount, transmitted as its decimal string (e.g. `450.00`).
///
/// No sign or scale checks are made; the gateway validates amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentAmount(pub Decimal);

impl From<Decimal> for PaymentAmount {
    fn from(value: Decimal) -> Self {
        PaymentAmount(value)
    }
}

impl From<u32> for PaymentAmount {
    fn from(value: u32) -> Self {
        PaymentAmount(Decimal::from(value))
    }
}

impl From<u64> for PaymentAmount {
    fn from(value: u64) -> Self {
        PaymentAmount(Decimal::from(value))
    }
}

impl FromStr for PaymentAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::Precondition("payment amount must not be empty".into()));
        }
        Decimal::from_str(trimmed)
            .map(PaymentAmount)
            .map_err(|err| Error::Precondition(format!("invalid payment amount '{s}': {err}")))
    }
}

impl Display for PaymentAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PaymentAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PaymentAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let value = Decimal::from_str(s.trim()).map_err(serde::de::Error::custom)?;
        Ok(PaymentAmount(value))
    }
}
