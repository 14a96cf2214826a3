//! The DPO client.
//!
//! [`Client`] holds immutable configuration and a [`Transport`]; every
//! operation builds its own request, so one client can be cloned and shared
//! across tasks freely.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use url::Url;

use crate::{
    api::{
        ApiRequest, ApiResponse, CancelTokenRequest, CancelTokenResponse, Card,
        ChargeCreditCardRequest, ChargeCreditCardResponse, ChargeMobileRequest,
        ChargeMobileResponse, CreateTokenRequest, CreateTokenResponse, Refund,
        RefundTokenRequest, RefundTokenResponse, VerifyTokenRequest, VerifyTokenResponse,
        require,
    },
    config::ClientConfig,
    core::{Endpoints, Operation},
    errors::{Error, Result},
    reference::{RandomReference, ReferenceError, ReferenceGenerator},
    retry::{Clock, InFlight, Observed, TokioClock},
    transport::Transport,
    types::PaymentAmount,
    xml,
};

/// A client for the DPO `API3G` gateway.
///
/// # Type Parameters
///
/// - `T`: the [`Transport`] requests are posted with, [`HttpTransport`](crate::transport::HttpTransport) by default.
/// - `C`: the [`Clock`] the attempt loop sleeps on.
#[derive(Clone)]
pub struct Client<T, C = TokioClock> {
    config: Arc<ClientConfig>,
    endpoints: Endpoints,
    transport: T,
    clock: C,
    references: Arc<dyn ReferenceGenerator>,
    deadline: Option<Instant>,
}

impl<T, C> std::fmt::Debug for Client<T, C>
where
    T: std::fmt::Debug,
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("environment", &self.config.environment)
            .field("endpoints", &self.endpoints)
            .field("transport", &self.transport)
            .field("clock", &self.clock)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "http-client")]
impl Client<crate::transport::HttpTransport> {
    /// A client posting over HTTPS with the configured timeout and user agent.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport =
            crate::transport::HttpTransport::new(&config.user_agent, config.timeout)
                .map_err(|err| Error::Transport(Box::new(err)))?;
        Client::with_transport(config, transport)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let endpoints = config.resolved_endpoints()?;
        Ok(Client {
            config: Arc::new(config),
            endpoints,
            transport,
            clock: TokioClock,
            references: Arc::new(RandomReference),
            deadline: None,
        })
    }
}

impl<T, C> Client<T, C> {
    /// Replace the clock the attempt loop sleeps on.
    pub fn with_clock<NewC: Clock>(self, clock: NewC) -> Client<T, NewC> {
        Client {
            config: self.config,
            endpoints: self.endpoints,
            transport: self.transport,
            clock,
            references: self.references,
            deadline: self.deadline,
        }
    }

    /// Replace the generator used by [`new_create_token_request`](Client::new_create_token_request).
    pub fn with_reference_generator(mut self, generator: impl ReferenceGenerator + 'static) -> Self {
        self.references = Arc::new(generator);
        self
    }

    /// A copy of this client whose operations give up once `deadline` passes.
    ///
    /// The deadline spans every attempt and backoff of an operation, including
    /// a request still waiting for its response.
    pub fn with_deadline(&self, deadline: Instant) -> Self
    where
        T: Clone,
        C: Clone,
    {
        let mut client = self.clone();
        client.deadline = Some(deadline);
        client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Where to send the end user to pay for a created token.
    pub fn payment_url(&self, token: &CreateTokenResponse) -> Result<Url> {
        require("TransToken", &token.trans_token)?;
        Ok(self.endpoints.payment_url(&token.trans_token))
    }

    /// A token request carrying this client's credential and a fresh company reference.
    pub fn new_create_token_request(
        &self,
        payment_currency: impl Into<String>,
        amount: impl Into<PaymentAmount>,
    ) -> Result<CreateTokenRequest> {
        let company_ref = self.references.generate()?;
        if company_ref.is_empty() {
            return Err(ReferenceError::Empty.into());
        }
        let mut request = CreateTokenRequest::new(
            self.config.company_token.as_str(),
            payment_currency,
            amount,
        );
        request.set_company_ref(company_ref);
        Ok(request)
    }
}

impl<T: Transport, C: Clock> Client<T, C> {
    /// Create a transaction token. The first step of every payment.
    pub async fn create_token(&self, request: &CreateTokenRequest) -> Result<CreateTokenResponse> {
        self.execute(request).await
    }

    /// Poll a token until the gateway reports it paid.
    pub async fn verify_token(&self, transaction_token: &str) -> Result<VerifyTokenResponse> {
        let request =
            VerifyTokenRequest::new(self.config.company_token.as_str(), transaction_token);
        self.execute(&request).await
    }

    /// Charge a card directly. Sent once, never retried.
    pub async fn charge_credit_card(
        &self,
        transaction_token: &str,
        card: Card,
    ) -> Result<ChargeCreditCardResponse> {
        let request = ChargeCreditCardRequest::new(
            self.config.company_token.as_str(),
            transaction_token,
            card,
        );
        self.execute(&request).await
    }

    /// Push a mobile money charge to the subscriber's handset. Sent once, never retried.
    pub async fn charge_mobile(
        &self,
        transaction_token: &str,
        phone_number: &str,
        mno: &str,
        mno_country: &str,
    ) -> Result<ChargeMobileResponse> {
        let request = ChargeMobileRequest::new(
            self.config.company_token.as_str(),
            transaction_token,
            phone_number,
            mno,
            mno_country,
        );
        self.execute(&request).await
    }

    pub async fn cancel_token(&self, transaction_token: &str) -> Result<CancelTokenResponse> {
        let request =
            CancelTokenRequest::new(self.config.company_token.as_str(), transaction_token);
        self.execute(&request).await
    }

    pub async fn refund_token(
        &self,
        transaction_token: &str,
        refund: Refund,
    ) -> Result<RefundTokenResponse> {
        let request = RefundTokenRequest::new(
            self.config.company_token.as_str(),
            transaction_token,
            refund,
        );
        self.execute(&request).await
    }

    /// Send any request through the attempt loop.
    ///
    /// Polling operations are re-sent while the gateway answers with a
    /// transient code, up to the configured budget. A non-2xx status, a
    /// transport failure, or a body that does not parse ends the loop at once.
    /// With a deadline set, an attempt still in flight when it passes is
    /// abandoned.
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> Result<R::Response> {
        request.validate()?;

        let operation = request.operation();
        let policy = self.config.retry_policy(operation);
        let pretty = self.config.environment.is_test();
        let body = xml::to_xml(request, pretty)?;

        #[cfg(feature = "tracing")]
        if tracing::enabled!(tracing::Level::DEBUG) {
            let redacted = request.redacted();
            if let Ok(logged) = xml::to_xml(&*redacted, pretty) {
                tracing::debug!(%operation, url = %self.endpoints.api, body = %logged, "DPO request");
            }
        }

        let mut in_flight = InFlight::first();
        loop {
            self.check_deadline(operation, in_flight.attempt() - 1, Duration::ZERO)?;

            let sent = self.transport.post_xml(&self.endpoints.api, body.clone());
            let answer = match self.deadline {
                Some(deadline) => match self.clock.timeout(deadline, sent).await {
                    Some(answer) => answer,
                    None => {
                        let aborted = in_flight.abort();
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            %operation,
                            attempts = aborted.attempts(),
                            "DPO operation deadline exceeded while awaiting a response"
                        );
                        return Err(Error::DeadlineExceeded {
                            operation,
                            attempts: aborted.attempts(),
                        });
                    }
                },
                None => sent.await,
            };

            let raw = match answer {
                Ok(raw) => raw,
                Err(err) => {
                    let _aborted = in_flight.abort();
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        %operation,
                        attempts = _aborted.attempts(),
                        "DPO transport error: {err}"
                    );
                    return Err(Error::Transport(Box::new(err)));
                }
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(%operation, status = %raw.status, body = %raw.body, "DPO response");

            if !raw.status.is_success() {
                let _aborted = in_flight.abort();
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    %operation,
                    attempts = _aborted.attempts(),
                    "DPO answered with HTTP {}",
                    raw.status
                );
                return Err(Error::Protocol {
                    status: raw.status,
                    body: raw.body,
                });
            }

            let response: R::Response =
                xml::from_xml(&raw.body).map_err(|source| Error::Deserialize {
                    operation,
                    body: raw.body.clone(),
                    source,
                })?;

            let code = response.result_code().clone();
            let outcome = self.config.classification.classify(operation, &code);

            match in_flight.observe(outcome, policy.max_attempts) {
                Observed::Succeeded { .. } => return Ok(response),
                Observed::Retryable(retry) => {
                    let delay = policy.backoff.delay(retry.attempt());
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        %operation,
                        %code,
                        attempt = retry.attempt(),
                        ?delay,
                        "DPO reported a pending state; polling again"
                    );
                    self.check_deadline(operation, retry.attempt(), delay)?;
                    self.clock.sleep(delay).await;
                    in_flight = retry.send();
                }
                Observed::AttemptsExhausted { attempts } => {
                    return Err(Error::AttemptsExhausted {
                        operation,
                        attempts,
                        last_code: code,
                        explanation: response.explanation().to_string(),
                    });
                }
                Observed::TerminalFailure { .. } => {
                    return Err(Error::Gateway {
                        operation,
                        code,
                        explanation: response.explanation().to_string(),
                    });
                }
            }
        }
    }

    /// Fails when `upcoming` more time would run past the deadline.
    fn check_deadline(&self, operation: Operation, attempts: u32, upcoming: Duration) -> Result<()> {
        match self.deadline {
            Some(deadline) if self.clock.now() + upcoming >= deadline => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%operation, attempts, "DPO operation deadline exceeded");
                Err(Error::DeadlineExceeded {
                    operation,
                    attempts,
                })
            }
            _ => Ok(()),
        }
    }
}
