//! Company reference generation.
//!
//! Every token request may carry a `CompanyRef`, the merchant's own id for the
//! transaction. The client asks a [`ReferenceGenerator`] for one when it builds
//! a request through [`Client::new_create_token_request`](crate::client::Client::new_create_token_request).

use std::sync::atomic::{AtomicU64, Ordering};

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

/// Reference generation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),
    #[error("Generated reference is empty")]
    Empty,
}

/// Produces merchant references for new transactions.
pub trait ReferenceGenerator: Send + Sync {
    fn generate(&self) -> Result<String, ReferenceError>;

    /// Use `fallback` whenever this generator fails.
    fn or_else<F>(self, fallback: F) -> Fallback<Self, F>
    where
        Self: Sized,
        F: ReferenceGenerator,
    {
        Fallback {
            primary: self,
            fallback,
        }
    }
}

impl<F> ReferenceGenerator for F
where
    F: Fn() -> Result<String, ReferenceError> + Send + Sync,
{
    fn generate(&self) -> Result<String, ReferenceError> {
        self()
    }
}

/// 32 bytes from the operating system RNG, URL-safe base64 without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReference;

impl RandomReference {
    pub const BYTES: usize = 32;
}

impl ReferenceGenerator for RandomReference {
    fn generate(&self) -> Result<String, ReferenceError> {
        let mut bytes = [0u8; Self::BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| ReferenceError::Entropy(err.to_string()))?;
        Ok(BASE64_URL_SAFE_NO_PAD.encode(bytes))
    }
}

/// Deterministic `<prefix>-<n>` references, counting up from 1.
#[derive(Debug, Default)]
pub struct SequentialReference {
    prefix: String,
    next: AtomicU64,
}

impl SequentialReference {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialReference {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl ReferenceGenerator for SequentialReference {
    fn generate(&self) -> Result<String, ReferenceError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Ok(format!("{}-{n}", self.prefix))
    }
}

/// See [`ReferenceGenerator::or_else`].
#[derive(Debug, Clone)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> ReferenceGenerator for Fallback<P, F>
where
    P: ReferenceGenerator,
    F: ReferenceGenerator,
{
    fn generate(&self) -> Result<String, ReferenceError> {
        match self.primary.generate() {
            Ok(reference) if !reference.is_empty() => Ok(reference),
            Ok(_) => self.fallback.generate(),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Primary reference generator failed: {_err}; using fallback");
                self.fallback.generate()
            }
        }
    }
}
