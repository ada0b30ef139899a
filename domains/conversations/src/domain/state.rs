//! State machines for a chat session
//!
//! Turn lifecycle: Idle → Pending → Idle (one turn in flight at most)
//! Widget visibility: Closed ↔ Open

pub use supportchat_common::StateError;
use serde::{Deserialize, Serialize};

/// Turn lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TurnState {
    #[default]
    Idle,
    Pending,
}

impl TurnState {
    /// Derive the turn state from the store's loading flag
    pub fn from_loading(is_loading: bool) -> Self {
        if is_loading {
            Self::Pending
        } else {
            Self::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Events that drive the turn lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// A non-empty submission was accepted and dispatched
    Submit,
    /// The agent call settled (answer or fallback)
    Resolve,
}

impl std::fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::Resolve => write!(f, "resolve"),
        }
    }
}

/// Turn state machine. Submissions while pending are rejected, never queued.
pub struct TurnStateMachine;

impl TurnStateMachine {
    /// Attempt a state transition
    pub fn transition(current: TurnState, event: TurnEvent) -> Result<TurnState, StateError> {
        match (current, event) {
            (TurnState::Idle, TurnEvent::Submit) => Ok(TurnState::Pending),
            (TurnState::Pending, TurnEvent::Resolve) => Ok(TurnState::Idle),
            _ => Err(StateError::invalid(current, event)),
        }
    }
}

/// Widget visibility states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityState {
    #[default]
    Closed,
    Open,
}

impl VisibilityState {
    pub fn from_open(is_open: bool) -> Self {
        if is_open {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// Events that change widget visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    Toggle,
    Open,
    Close,
}

impl std::fmt::Display for VisibilityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toggle => write!(f, "toggle"),
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// Visibility state machine
pub struct VisibilityStateMachine;

impl VisibilityStateMachine {
    /// Attempt a state transition. `Toggle` is always valid.
    pub fn transition(
        current: VisibilityState,
        event: VisibilityEvent,
    ) -> Result<VisibilityState, StateError> {
        match (current, event) {
            (VisibilityState::Closed, VisibilityEvent::Toggle | VisibilityEvent::Open) => {
                Ok(VisibilityState::Open)
            }
            (VisibilityState::Open, VisibilityEvent::Toggle | VisibilityEvent::Close) => {
                Ok(VisibilityState::Closed)
            }
            _ => Err(StateError::invalid(current, event)),
        }
    }
}
