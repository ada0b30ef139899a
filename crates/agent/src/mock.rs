//! Mock AskAgent Service Implementation
//!
//! Programmable mock for testing chat sessions:
//! - `MockAgentService`: records every request, replays scripted outcomes
//! - `MockOutcome`: Answer, Fail, or Malformed
//! - Optional gate that holds requests pending until released

use crate::{AgentError, AskAgentService, AskRequest, AskResponse};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Notify, Semaphore};

/// What a scripted call should produce
#[derive(Debug, Clone, PartialEq)]
pub enum MockOutcome {
    /// Resolve with this response
    Answer(AskResponse),
    /// Reject as a transport failure
    Fail(String),
    /// Reject as an undecodable reply
    Malformed(String),
}

/// Mock AskAgent service with programmable behavior
#[derive(Debug, Clone)]
pub struct MockAgentService {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    history: Arc<Mutex<Vec<AskRequest>>>,
    gate: Option<Arc<Semaphore>>,
    called: Arc<Notify>,
}

impl MockAgentService {
    /// Create a mock that answers immediately
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            history: Arc::new(Mutex::new(Vec::new())),
            gate: None,
            called: Arc::new(Notify::new()),
        }
    }

    /// Create a mock whose calls stay pending until `release` is called
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new()
        }
    }

    /// Queue the outcome for the next unscripted call
    pub fn push_outcome(&self, outcome: MockOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Queue a successful answer
    pub fn push_answer(&self, response: AskResponse) {
        self.push_outcome(MockOutcome::Answer(response));
    }

    /// Queue a transport failure
    pub fn push_failure(&self, message: impl Into<String>) {
        self.push_outcome(MockOutcome::Fail(message.into()));
    }

    /// Let `count` pending calls settle. No-op for ungated mocks.
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    /// Return all recorded requests
    pub fn recorded_requests(&self) -> Vec<AskRequest> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Wait until at least `count` calls have been received
    pub async fn wait_for_calls(&self, count: usize) {
        loop {
            let notified = self.called.notified();
            if self.call_count() >= count {
                return;
            }
            notified.await;
        }
    }

    fn next_outcome(&self, request: &AskRequest) -> Result<MockOutcome, AgentError> {
        let scripted = self
            .outcomes
            .lock()
            .map_err(|e| AgentError::Request(format!("outcomes lock poisoned: {e}")))?
            .pop_front();

        Ok(scripted.unwrap_or_else(|| {
            MockOutcome::Answer(
                AskResponse::new(format!("Mock answer to: {}", request.question))
                    .with_route("mock"),
            )
        }))
    }
}

impl Default for MockAgentService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AskAgentService for MockAgentService {
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, AgentError> {
        tracing::debug!(
            history_len = request.chat_history.len(),
            "Mock AskAgent: recording request"
        );

        let outcome = self.next_outcome(&request)?;
        self.history
            .lock()
            .map_err(|e| AgentError::Request(format!("history lock poisoned: {e}")))?
            .push(request);
        self.called.notify_waiters();

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| AgentError::Request(format!("mock gate closed: {e}")))?;
            permit.forget();
        }

        match outcome {
            MockOutcome::Answer(response) => Ok(response),
            MockOutcome::Fail(message) => Err(AgentError::Request(message)),
            MockOutcome::Malformed(message) => Err(AgentError::Malformed(message)),
        }
    }

    async fn health_check(&self) -> Result<(), AgentError> {
        Ok(())
    }
}
