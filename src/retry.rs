//! The bounded attempt loop that drives polling operations.
//!
//! Every call runs through [`AttemptState`]:
//!
//! ```text
//! NotStarted -> AwaitingResponse -> Succeeded
//!                    |  ^       \-> TerminalFailure
//!                    v  |        \-> AttemptsExhausted
//!              RetryableFailure
//! ```
//!
//! Between a [`RetryableFailure`](AttemptState::RetryableFailure) and the next
//! attempt the [`Backoff`] strategy picks a delay and the [`Clock`] sleeps it.

use std::time::{Duration, Instant};

use crate::codes::Outcome;

/// Position of one operation in the attempt loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    NotStarted,
    /// Request `attempt` (1-based) is in flight.
    AwaitingResponse { attempt: u32 },
    /// Attempt `attempt` got a transient code and budget remains.
    RetryableFailure { attempt: u32 },
    Succeeded { attempts: u32 },
    TerminalFailure { attempts: u32 },
    AttemptsExhausted { attempts: u32 },
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptState::Succeeded { .. }
                | AttemptState::TerminalFailure { .. }
                | AttemptState::AttemptsExhausted { .. }
        )
    }

    /// Number of requests sent so far.
    pub fn attempts(&self) -> u32 {
        match *self {
            AttemptState::NotStarted => 0,
            AttemptState::AwaitingResponse { attempt }
            | AttemptState::RetryableFailure { attempt } => attempt,
            AttemptState::Succeeded { attempts }
            | AttemptState::TerminalFailure { attempts }
            | AttemptState::AttemptsExhausted { attempts } => attempts,
        }
    }

    /// A request was sent.
    ///
    /// Only valid from `NotStarted` or `RetryableFailure`; any other state is returned unchanged.
    pub fn send(self) -> Self {
        match self {
            AttemptState::NotStarted => InFlight::first().into(),
            AttemptState::RetryableFailure { attempt } => Retryable { attempt }.send().into(),
            other => other,
        }
    }

    /// A classified response arrived for the in-flight attempt.
    pub fn observe(self, outcome: Outcome, max_attempts: u32) -> Self {
        match self {
            AttemptState::AwaitingResponse { attempt } => {
                InFlight { attempt }.observe(outcome, max_attempts).into()
            }
            other => other,
        }
    }

    /// The attempt failed below the gateway, e.g. a 4xx status or a transport error.
    pub fn abort(self) -> Self {
        AttemptState::TerminalFailure {
            attempts: self.attempts(),
        }
    }
}

/// An attempt whose request is on the wire.
///
/// The attempt loop drives these typed steps directly so that only
/// transitions valid from each state can be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    attempt: u32,
}

impl InFlight {
    pub fn first() -> Self {
        InFlight { attempt: 1 }
    }

    /// 1-based number of this attempt.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn observe(self, outcome: Outcome, max_attempts: u32) -> Observed {
        let attempt = self.attempt;
        match outcome {
            Outcome::Success => Observed::Succeeded { attempts: attempt },
            Outcome::Terminal => Observed::TerminalFailure { attempts: attempt },
            Outcome::Transient if attempt < max_attempts => {
                Observed::Retryable(Retryable { attempt })
            }
            Outcome::Transient => Observed::AttemptsExhausted { attempts: attempt },
        }
    }

    pub fn abort(self) -> AttemptState {
        AttemptState::TerminalFailure {
            attempts: self.attempt,
        }
    }
}

/// Where an in-flight attempt lands once its response is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    Succeeded { attempts: u32 },
    Retryable(Retryable),
    TerminalFailure { attempts: u32 },
    AttemptsExhausted { attempts: u32 },
}

/// A transient answer with budget left for another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retryable {
    attempt: u32,
}

impl Retryable {
    /// Number of the attempt that failed.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn send(self) -> InFlight {
        InFlight {
            attempt: self.attempt + 1,
        }
    }
}

impl From<InFlight> for AttemptState {
    fn from(in_flight: InFlight) -> Self {
        AttemptState::AwaitingResponse {
            attempt: in_flight.attempt,
        }
    }
}

impl From<Observed> for AttemptState {
    fn from(observed: Observed) -> Self {
        match observed {
            Observed::Succeeded { attempts } => AttemptState::Succeeded { attempts },
            Observed::Retryable(Retryable { attempt }) => {
                AttemptState::RetryableFailure { attempt }
            }
            Observed::TerminalFailure { attempts } => AttemptState::TerminalFailure { attempts },
            Observed::AttemptsExhausted { attempts } => {
                AttemptState::AttemptsExhausted { attempts }
            }
        }
    }
}

/// Delay between two attempts of the same operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Poll again immediately.
    None,
    Fixed(Duration),
    /// `initial * factor^(n-1)` before attempt `n + 1`, capped at `max`.
    Exponential {
        initial: Duration,
        factor: u32,
        max: Duration,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Exponential {
            initial: Duration::from_millis(500),
            factor: 2,
            max: Duration::from_secs(8),
        }
    }
}

impl Backoff {
    /// Delay after the failed attempt number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential {
                initial,
                factor,
                max,
            } => {
                let exponent = attempt.saturating_sub(1);
                let multiplier = factor.max(1).checked_pow(exponent).unwrap_or(u32::MAX);
                initial
                    .checked_mul(multiplier)
                    .map_or(max, |delay| delay.min(max))
            }
        }
    }
}

/// Time source of the attempt loop.
pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;

    /// Runs `future` until `deadline`. `None` when the deadline passed first.
    fn timeout<F>(
        &self,
        deadline: Instant,
        future: F,
    ) -> impl Future<Output = Option<F::Output>> + Send
    where
        F: Future + Send,
        F::Output: Send;
}

/// Wall clock backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    async fn timeout<F>(&self, deadline: Instant, future: F) -> Option<F::Output>
    where
        F: Future + Send,
        F::Output: Send,
    {
        tokio::time::timeout_at(deadline.into(), future).await.ok()
    }
}

/// Per-operation attempt limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    /// Exactly one attempt.
    pub fn once() -> Self {
        RetryPolicy {
            max_attempts: 1,
            backoff: Backoff::None,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            backoff: Backoff::default(),
        }
    }
}
