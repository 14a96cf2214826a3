use std::time::Duration;

use bon::Builder;

use crate::{
    codes::ClassificationTable,
    core::{Endpoints, Environment, Operation},
    errors::{Error, Result},
    retry::{Backoff, RetryPolicy},
};

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("dpo-kit/", env!("CARGO_PKG_VERSION"));

/// Immutable client configuration.
///
/// ```
/// use std::time::Duration;
/// use dpo_kit::{config::ClientConfig, core::Environment, retry::Backoff};
///
/// let config = ClientConfig::builder()
///     .company_token("57466282-EBD7-4ED5-B699-8659330A6996")
///     .environment(Environment::Live)
///     .max_attempts(10)
///     .backoff(Backoff::Fixed(Duration::from_secs(2)))
///     .user_agent("my-shop/1.0")
///     .build();
///
/// assert_eq!(config.retry_policy(dpo_kit::core::Operation::VerifyToken).max_attempts, 10);
/// ```
#[derive(Builder, Debug, Clone)]
pub struct ClientConfig {
    /// Merchant credential, sent as `CompanyToken`.
    #[builder(into)]
    pub company_token: String,
    /// Test or live traffic.
    #[builder(default)]
    pub environment: Environment,
    /// Overrides the environment's default URLs.
    pub endpoints: Option<Endpoints>,
    /// Per-attempt HTTP timeout.
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,
    /// Attempt budget of polling operations.
    #[builder(default = RetryPolicy::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    /// Delay between polling attempts.
    #[builder(default)]
    pub backoff: Backoff,
    #[builder(into, default = DEFAULT_USER_AGENT.to_string())]
    pub user_agent: String,
    /// Result code partitions per operation.
    #[builder(default)]
    pub classification: ClassificationTable,
}

impl ClientConfig {
    /// Sandbox configuration with defaults.
    pub fn test(company_token: impl Into<String>) -> Self {
        ClientConfig::builder()
            .company_token(company_token)
            .environment(Environment::Test)
            .build()
    }

    /// Production configuration with defaults.
    pub fn live(company_token: impl Into<String>) -> Self {
        ClientConfig::builder()
            .company_token(company_token)
            .environment(Environment::Live)
            .build()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::Precondition(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn resolved_endpoints(&self) -> Result<Endpoints> {
        match &self.endpoints {
            Some(endpoints) => Ok(endpoints.clone()),
            None => self.environment.endpoints(),
        }
    }

    /// Polling operations get the configured budget, everything else one attempt.
    pub fn retry_policy(&self, operation: Operation) -> RetryPolicy {
        if operation.is_idempotent() {
            RetryPolicy {
                max_attempts: self.max_attempts,
                backoff: self.backoff,
            }
        } else {
            RetryPolicy::once()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::test("TOKEN");
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_attempts, 5);
        assert!(config.user_agent.starts_with("dpo-kit/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_idempotent_operations_get_one_attempt() {
        let config = ClientConfig::live("TOKEN");
        assert_eq!(config.retry_policy(Operation::CreateToken), RetryPolicy::once());
        assert_eq!(
            config.retry_policy(Operation::ChargeTokenCreditCard),
            RetryPolicy::once()
        );
        assert_eq!(config.retry_policy(Operation::RefundToken).max_attempts, 5);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = ClientConfig::builder()
            .company_token("TOKEN")
            .max_attempts(0)
            .build();
        assert!(matches!(config.validate(), Err(Error::Precondition(_))));
    }

    #[test]
    fn test_endpoint_override() {
        let endpoints = Endpoints {
            api: "http://localhost:8080/API/v6/".parse().unwrap(),
            pay: "http://localhost:8080/payv2.php".parse().unwrap(),
        };
        let config = ClientConfig::builder()
            .company_token("TOKEN")
            .endpoints(endpoints.clone())
            .build();
        assert_eq!(config.resolved_endpoints().unwrap(), endpoints);
        assert_eq!(
            ClientConfig::live("TOKEN").resolved_endpoints().unwrap().api.as_str(),
            Environment::LIVE_API_URL
        );
    }
}
