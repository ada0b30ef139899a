//! Conversations domain: the chat-widget session state machine
//!
//! Owns message ordering, the request/response lifecycle of a turn,
//! optimistic local echo, single-flight gating, and failure fallback.

pub mod domain;
pub mod orchestrator;
pub mod session;
pub mod store;
pub mod visibility;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    display_timestamp, timestamp_now, Message, MessageRole, FALLBACK_MESSAGE,
};
pub use domain::state::{
    StateError, TurnEvent, TurnState, TurnStateMachine, VisibilityEvent, VisibilityState,
    VisibilityStateMachine,
};

pub use orchestrator::{RequestOrchestrator, TurnError};
pub use session::ChatSession;
pub use store::{ConversationState, ConversationStore};
pub use visibility::WidgetVisibilityController;
