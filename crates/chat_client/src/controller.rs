//! Chat controller: one submission in flight, animated placeholder, final answer.
//!
//! Per submission the controller moves `Idle -> Submitting -> AwaitingResponse -> Idle`.
//! A second `submit` while one is in flight is ignored outright.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::client::{ChatClient, ClientError};
use crate::transcript::{echo_line, Exchange, Transcript};
use crate::view::View;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(300);

/// What happens to the busy flag when a chat request fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Clear the flag so the next submission goes through.
    #[default]
    Release,
    /// Leave the flag set; every later submission is ignored.
    Lockout,
}

/// Outcome of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Another submission was in flight; nothing happened.
    Ignored,
    /// The server answered with this text.
    Answered(String),
}

#[derive(Debug, Default)]
struct Session {
    transcript: Transcript,
    sending: bool,
}

type SharedSession = Arc<Mutex<Session>>;

fn lock(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(|e| e.into_inner())
}

/// Owns the exchange list and the `sending` flag for one page session.
pub struct ChatController {
    client: ChatClient,
    view: Arc<dyn View>,
    session: SharedSession,
    tick_interval: Duration,
    failure_policy: FailurePolicy,
}

impl ChatController {
    pub fn new(client: ChatClient, view: Arc<dyn View>) -> Self {
        Self {
            client,
            view,
            session: Arc::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.session).sending
    }

    /// Snapshot of the exchanges, most recent first.
    pub fn exchanges(&self) -> Vec<Exchange> {
        lock(&self.session).transcript.iter().cloned().collect()
    }

    /// The transcript as it would be written to the log.
    pub fn render(&self) -> String {
        lock(&self.session).transcript.render()
    }

    /// Submit whatever is in the input binding, as the form handler does.
    pub async fn submit_from_input(&self) -> Result<Submission, ClientError> {
        let question = self.view.input_value();
        self.submit(&question).await
    }

    /// Send `question` as given (no trimming; empty is allowed).
    pub async fn submit(&self, question: &str) -> Result<Submission, ClientError> {
        {
            let mut session = lock(&self.session);
            if session.sending {
                tracing::debug!("submission ignored, another one is in flight");
                return Ok(Submission::Ignored);
            }
            session.sending = true;
            session.transcript.push_front(Exchange::pending(question));
        }

        // Clears `sending` however this call ends, including a dropped future.
        let mut in_flight = InFlight {
            session: Arc::clone(&self.session),
            release: self.failure_policy == FailurePolicy::Release,
        };

        let log = self.view.log_text();
        self.view.set_log(&format!("{}{}", echo_line(question), log));

        let ticker = Ticker::spawn(
            Arc::clone(&self.session),
            Arc::clone(&self.view),
            self.tick_interval,
        );
        let result = self.client.invoke(question).await;
        // No tick can land after this returns.
        ticker.cancel().await;

        match result {
            Ok(answer) => {
                let text = {
                    let mut session = lock(&self.session);
                    if let Some(exchange) = session.transcript.latest_mut() {
                        exchange.answer = answer.clone();
                    }
                    session.transcript.render()
                };
                self.view.set_log(&text);
                self.view.clear_input();
                in_flight.release = true;
                Ok(Submission::Answered(answer))
            }
            Err(e) => {
                if in_flight.release {
                    tracing::warn!(error = %e, "chat request failed");
                } else {
                    tracing::warn!(error = %e, "chat request failed, further submissions are blocked");
                }
                Err(e)
            }
        }
    }
}

/// Owns the `sending` flag for one submission.
struct InFlight {
    session: SharedSession,
    release: bool,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.release {
            lock(&self.session).sending = false;
        }
    }
}

/// Repeating placeholder animation for the most recent exchange.
struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    fn spawn(session: SharedSession, view: Arc<dyn View>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let text = {
                    let mut session = lock(&session);
                    if let Some(exchange) = session.transcript.latest_mut() {
                        exchange.tick();
                    }
                    session.transcript.render()
                };
                view.set_log(&text);
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the task and wait until it has stopped.
    async fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
