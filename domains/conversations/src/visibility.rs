//! Widget visibility controller
//!
//! Open/closed is orthogonal to the message flow: nothing here reads or
//! writes messages or the loading flag.

use crate::domain::state::{StateError, VisibilityEvent, VisibilityState, VisibilityStateMachine};
use crate::store::ConversationStore;

#[derive(Debug, Clone)]
pub struct WidgetVisibilityController {
    store: ConversationStore,
}

impl WidgetVisibilityController {
    pub fn new(store: ConversationStore) -> Self {
        Self { store }
    }

    pub fn state(&self) -> VisibilityState {
        VisibilityState::from_open(self.store.is_open())
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Flip between open and closed; returns the new state
    pub fn toggle(&self) -> VisibilityState {
        // Toggle is valid from both states
        let next = self
            .apply(VisibilityEvent::Toggle)
            .unwrap_or_else(|_| self.state());
        tracing::debug!(visibility = %next, "Widget toggled");
        next
    }

    /// Open the widget; no-op if already open
    pub fn open(&self) {
        if let Err(err) = self.apply(VisibilityEvent::Open) {
            tracing::trace!(error = %err, "Widget already open");
        }
    }

    /// Close the widget; no-op if already closed
    pub fn close(&self) {
        if let Err(err) = self.apply(VisibilityEvent::Close) {
            tracing::trace!(error = %err, "Widget already closed");
        }
    }

    fn apply(&self, event: VisibilityEvent) -> Result<VisibilityState, StateError> {
        self.store
            .update_open(|open| {
                VisibilityStateMachine::transition(VisibilityState::from_open(open), event)
                    .map(|next| next.is_open())
            })
            .map(VisibilityState::from_open)
    }
}
