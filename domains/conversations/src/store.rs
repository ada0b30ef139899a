//! Conversation store: append-only message log plus widget flags
//!
//! The store is shared between the orchestrator, the visibility controller
//! and readers through cheap clones. The lock is never held across an
//! `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::entities::Message;
use crate::domain::state::{StateError, TurnEvent, TurnState, TurnStateMachine, VisibilityState};

/// Everything a renderer needs to draw the widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Chronological turn order; never reordered or edited
    pub messages: Vec<Message>,
    pub is_open: bool,
    pub is_loading: bool,
}

impl ConversationState {
    pub fn turn_state(&self) -> TurnState {
        TurnState::from_loading(self.is_loading)
    }

    pub fn visibility(&self) -> VisibilityState {
        VisibilityState::from_open(self.is_open)
    }
}

/// Shared handle to one session's conversation state
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    inner: Arc<Mutex<ConversationState>>,
}

impl ConversationStore {
    /// Create an empty, closed, idle store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        // Every critical section leaves the state consistent, so a poisoned
        // lock still guards valid data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a message to the end of the log
    pub fn append(&self, message: Message) {
        self.lock().messages.push(message);
    }

    /// Copy of the current messages
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    /// Copy of the full state for rendering
    pub fn state(&self) -> ConversationState {
        self.lock().clone()
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.lock().is_loading = is_loading;
    }

    pub fn set_open(&self, is_open: bool) {
        self.lock().is_open = is_open;
    }

    /// Read-modify-write of the open flag in one critical section.
    /// `f` sees the current flag and returns the next one, or an error that
    /// leaves the flag unchanged.
    pub fn update_open<E>(&self, f: impl FnOnce(bool) -> Result<bool, E>) -> Result<bool, E> {
        let mut state = self.lock();
        let next = f(state.is_open)?;
        state.is_open = next;
        Ok(next)
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open
    }

    pub fn len(&self) -> usize {
        self.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().messages.is_empty()
    }

    /// Start a turn in one critical section: take the loading flag, capture
    /// the history as it stood before this turn, then append the user echo.
    ///
    /// Returns the pre-append snapshot. Fails without touching state when a
    /// turn is already pending.
    pub fn begin_turn(&self, user_message: Message) -> Result<Vec<Message>, StateError> {
        let mut state = self.lock();
        TurnStateMachine::transition(state.turn_state(), TurnEvent::Submit)?;

        state.is_loading = true;
        let history = state.messages.clone();
        state.messages.push(user_message);
        Ok(history)
    }

    /// Release the loading flag taken by [`begin_turn`](Self::begin_turn)
    pub fn finish_turn(&self) {
        let mut state = self.lock();
        if let Err(err) = TurnStateMachine::transition(state.turn_state(), TurnEvent::Resolve) {
            tracing::debug!(error = %err, "Loading flag already released");
        }
        state.is_loading = false;
    }
}
