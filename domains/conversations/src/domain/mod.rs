//! Conversations domain layer: entities and state machines

pub mod entities;
pub mod state;
