//! Domain entities for the Conversations domain
//!
//! A chat session is a sequence of immutable [`Message`]s. User messages are
//! echoed locally when a turn starts; assistant messages arrive when the turn
//! settles, either as the agent's answer or as the fixed fallback text.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use supportchat_agent::{AgentRole, AskResponse, HistoryEntry};

/// Text appended in place of an answer when a turn fails
pub const FALLBACK_MESSAGE: &str =
    "I apologize, but I encountered an error processing your request. Please try again later.";

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<MessageRole> for AgentRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => AgentRole::User,
            MessageRole::Assistant => AgentRole::Assistant,
        }
    }
}

/// Format a wall-clock time the way bubbles display it (`HH:MM`)
pub fn display_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M").to_string()
}

/// Display timestamp for the current local time
pub fn timestamp_now() -> String {
    display_timestamp(&Local::now())
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl Message {
    /// Create the local echo of a user submission. Content is kept verbatim.
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Message {
            role: MessageRole::User,
            content: content.into(),
            timestamp: timestamp.into(),
            route: None,
            sources: None,
        }
    }

    /// Create an assistant message from a successful agent answer
    pub fn assistant(response: AskResponse, timestamp: impl Into<String>) -> Self {
        Message {
            role: MessageRole::Assistant,
            content: response.answer,
            timestamp: timestamp.into(),
            route: response.route,
            sources: response.sources,
        }
    }

    /// Create the fallback assistant message for a failed turn
    pub fn fallback(timestamp: impl Into<String>) -> Self {
        Message {
            role: MessageRole::Assistant,
            content: FALLBACK_MESSAGE.to_string(),
            timestamp: timestamp.into(),
            route: None,
            sources: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Project to the `{role, content}` pair sent as chat history
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            role: self.role.into(),
            content: self.content.clone(),
        }
    }
}
