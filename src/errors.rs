use http::StatusCode;

use crate::{codes::ResultCode, core::Operation, reference::ReferenceError};

/// Error types for DPO client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was missing or invalid. Raised before any network activity.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The reference generator could not produce a company reference.
    #[error("Reference generation error: {0}")]
    Reference(#[from] ReferenceError),

    /// The request could not be encoded as XML.
    #[error("XML serialization error: {0}")]
    Serialize(#[from] quick_xml::SeError),

    /// Connection, DNS or timeout failure in the underlying transport.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The gateway answered with a non-2xx HTTP status.
    #[error("Unexpected HTTP status {status}: {body}")]
    Protocol { status: StatusCode, body: String },

    /// The response body is not valid XML or does not match the expected shape.
    #[error("Failed to deserialize {operation} response: {source}")]
    Deserialize {
        operation: Operation,
        body: String,
        #[source]
        source: quick_xml::DeError,
    },

    /// The gateway returned a result code that will never succeed without caller intervention.
    #[error("DPO rejected {operation} with code {code}: {explanation}")]
    Gateway {
        operation: Operation,
        code: ResultCode,
        explanation: String,
    },

    /// The gateway kept returning transient codes until the attempt budget ran out.
    #[error(
        "{operation} did not complete after {attempts} attempts; last code {last_code}: {explanation}"
    )]
    AttemptsExhausted {
        operation: Operation,
        attempts: u32,
        last_code: ResultCode,
        explanation: String,
    },

    /// The whole-operation deadline passed before the gateway settled.
    #[error("{operation} deadline exceeded after {attempts} attempts")]
    DeadlineExceeded { operation: Operation, attempts: u32 },

    /// An endpoint URL could not be built.
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// The gateway result code attached to this error, if any.
    pub fn result_code(&self) -> Option<&ResultCode> {
        match self {
            Error::Gateway { code, .. } => Some(code),
            Error::AttemptsExhausted { last_code, .. } => Some(last_code),
            _ => None,
        }
    }

    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized `Result` type for DPO client operations.
pub type Result<T> = std::result::Result<T, Error>;
