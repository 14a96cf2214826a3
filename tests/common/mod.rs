#![allow(dead_code)]

use std::{
    collections::VecDeque,
    future::{Future, ready},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use dpo_kit::{
    client::Client,
    config::ClientConfig,
    retry::{Backoff, Clock},
    transport::{RawResponse, Transport},
};
use http::StatusCode;
use url::Url;

#[derive(Debug, thiserror::Error)]
#[error("mock transport: {0}")]
pub struct MockTransportError(pub String);

#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: Url,
    pub body: String,
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Result<RawResponse, String>>,
    repeat: Option<RawResponse>,
    latency: Option<(ManualClock, Duration)>,
    sent: Vec<SentRequest>,
}

/// Replays scripted answers in order, then `repeat` forever once the script runs dry.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn respond_code(self, code: &str, explanation: &str) -> Self {
        self.respond(StatusCode::OK, gateway_body(code, explanation))
    }

    pub fn fail(self, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(Err(message.to_string()));
        self
    }

    pub fn always_code(self, code: &str, explanation: &str) -> Self {
        self.state.lock().unwrap().repeat =
            Some(RawResponse::new(StatusCode::OK, gateway_body(code, explanation)));
        self
    }

    /// Every request moves `clock` forward by `latency` before it is answered.
    pub fn with_latency(self, clock: &ManualClock, latency: Duration) -> Self {
        self.state.lock().unwrap().latency = Some((clock.clone(), latency));
        self
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.state.lock().unwrap().sent.clone()
    }
}

impl Transport for MockTransport {
    type Error = MockTransportError;

    fn post_xml(
        &self,
        url: &Url,
        body: String,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send {
        let mut state = self.state.lock().unwrap();
        state.sent.push(SentRequest {
            url: url.clone(),
            body,
        });
        if let Some((clock, latency)) = &state.latency {
            clock.advance(*latency);
        }
        let answer = match state.script.pop_front() {
            Some(Ok(raw)) => Ok(raw),
            Some(Err(message)) => Err(MockTransportError(message)),
            None => state
                .repeat
                .clone()
                .ok_or_else(|| MockTransportError("script exhausted".into())),
        };
        ready(answer)
    }
}

#[derive(Debug)]
struct ClockState {
    now: Instant,
    sleeps: Vec<Duration>,
}

/// A clock that only moves when the client sleeps on it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            state: Arc::new(Mutex::new(ClockState {
                now: Instant::now(),
                sleeps: Vec::new(),
            })),
        }
    }

    pub fn now_plus(&self, duration: Duration) -> Instant {
        self.state.lock().unwrap().now + duration
    }

    pub fn advance(&self, duration: Duration) {
        self.state.lock().unwrap().now += duration;
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.lock().unwrap().sleeps.clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state.lock().unwrap().now
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        let mut state = self.state.lock().unwrap();
        state.now += duration;
        state.sleeps.push(duration);
        ready(())
    }

    fn timeout<F>(
        &self,
        deadline: Instant,
        future: F,
    ) -> impl Future<Output = Option<F::Output>> + Send
    where
        F: Future + Send,
        F::Output: Send,
    {
        let clock = self.clone();
        async move {
            let output = future.await;
            (clock.now() < deadline).then_some(output)
        }
    }
}

pub fn gateway_body(code: &str, explanation: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<API3G><Result>{code}</Result><ResultExplanation>{explanation}</ResultExplanation></API3G>"
    )
}

pub const COMPANY_TOKEN: &str = "57466282-EBD7-4ED5-B699-8659330A6996";

pub const BACKOFF: Duration = Duration::from_secs(1);

pub fn config(max_attempts: u32) -> ClientConfig {
    ClientConfig::builder()
        .company_token(COMPANY_TOKEN)
        .max_attempts(max_attempts)
        .backoff(Backoff::Fixed(BACKOFF))
        .build()
}

pub fn client(
    transport: &MockTransport,
    clock: &ManualClock,
    max_attempts: u32,
) -> Client<MockTransport, ManualClock> {
    Client::with_transport(config(max_attempts), transport.clone())
        .unwrap()
        .with_clock(clock.clone())
}
