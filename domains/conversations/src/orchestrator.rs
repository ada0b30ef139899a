//! Request orchestration for one conversational turn
//!
//! A turn is: validate input, take the loading flag, echo the user message,
//! ask the agent with the history as it stood before the echo, append exactly
//! one assistant message, release the flag.

use std::sync::Arc;

use supportchat_agent::{AgentError, AskAgentService, AskRequest};
use thiserror::Error;

use crate::domain::entities::{timestamp_now, Message};
use crate::store::ConversationStore;

/// Why a submission did not produce an answer
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("Submission is empty or whitespace-only")]
    InvalidInput,

    #[error("A turn is already in progress")]
    TurnInProgress,

    #[error("Turn failed: {0}")]
    TurnFailed(#[from] AgentError),
}

/// Releases the loading flag when dropped, whichever way the turn ends
struct LoadingGuard {
    store: ConversationStore,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store.finish_turn();
    }
}

/// An accepted turn waiting on the agent
struct PendingTurn {
    request: AskRequest,
    guard: LoadingGuard,
}

/// Drives turns between a conversation store and the AskAgent service
#[derive(Clone)]
pub struct RequestOrchestrator {
    store: ConversationStore,
    agent: Arc<dyn AskAgentService>,
}

impl std::fmt::Debug for RequestOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOrchestrator")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl RequestOrchestrator {
    pub fn new(store: ConversationStore, agent: Arc<dyn AskAgentService>) -> Self {
        Self { store, agent }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Submit one user turn and wait for it to settle.
    ///
    /// Empty input and submissions while a turn is pending are ignored
    /// without touching state. An accepted turn always ends with exactly one
    /// assistant message: the agent's answer, or the fallback text if the
    /// call failed for any reason.
    pub async fn submit_turn(&self, raw_input: &str) {
        let PendingTurn { request, guard } = match self.begin_turn(raw_input) {
            Ok(turn) => turn,
            Err(err) => {
                tracing::debug!(error = %err, "Submission ignored");
                return;
            }
        };

        tracing::debug!(
            history_len = request.chat_history.len(),
            "Turn accepted, asking agent"
        );

        let reply = match self.agent.ask(request).await {
            Ok(response) => {
                tracing::debug!(route = ?response.route, "Turn answered");
                Message::assistant(response, timestamp_now())
            }
            Err(err) => {
                let err = TurnError::from(err);
                tracing::warn!(error = %err, "Turn failed, appending fallback message");
                Message::fallback(timestamp_now())
            }
        };

        self.store.append(reply);
        drop(guard);
    }

    fn begin_turn(&self, raw_input: &str) -> Result<PendingTurn, TurnError> {
        if raw_input.trim().is_empty() {
            return Err(TurnError::InvalidInput);
        }

        let history = self
            .store
            .begin_turn(Message::user(raw_input, timestamp_now()))
            .map_err(|_| TurnError::TurnInProgress)?;

        let guard = LoadingGuard {
            store: self.store.clone(),
        };

        Ok(PendingTurn {
            request: AskRequest {
                question: raw_input.to_string(),
                chat_history: history.iter().map(Message::history_entry).collect(),
            },
            guard,
        })
    }
}
