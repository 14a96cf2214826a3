//! `API3G` request and response documents, one module per operation.

use std::borrow::Cow;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    codes::ResultCode,
    core::Operation,
    errors::{Error, Result},
};

mod cancel;
mod card;
mod mobile;
mod refund;
mod token;
mod verify;

pub use cancel::*;
pub use card::*;
pub use mobile::*;
pub use refund::*;
pub use token::*;
pub use verify::*;

/// A request document sent to the gateway.
pub trait ApiRequest: Serialize + Clone {
    /// The response document the gateway answers with.
    type Response: ApiResponse;

    fn operation(&self) -> Operation;

    /// Checks run before anything is sent.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// A copy safe to write to logs.
    fn redacted(&self) -> Cow<'_, Self> {
        Cow::Borrowed(self)
    }
}

/// A response document received from the gateway.
pub trait ApiResponse: DeserializeOwned {
    fn result_code(&self) -> &ResultCode;

    fn explanation(&self) -> &str;
}

/// Fails with [`Error::Precondition`] when `value` is blank.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Precondition(format!("{field} must not be empty")));
    }
    Ok(())
}
