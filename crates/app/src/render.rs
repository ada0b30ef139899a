//! Plain-text rendering of a chat session
//!
//! Reads `ConversationState` copies and turns them into terminal lines.
//! Never writes back into the session.

use supportchat_conversations::{ConversationState, Message, MessageRole};

pub const EMPTY_STATE: &str = "Start a conversation with our support assistant!";
pub const TYPING_INDICATOR: &str = "Assistant is typing...";

/// Render one message bubble as one or more lines
pub fn render_message(message: &Message) -> Vec<String> {
    let timestamp = if message.timestamp.is_empty() {
        "Just now"
    } else {
        message.timestamp.as_str()
    };
    let speaker = match message.role {
        MessageRole::User => "You",
        MessageRole::Assistant => "Assistant",
    };

    let mut lines = vec![format!("[{}] {}: {}", timestamp, speaker, message.content)];
    if let Some(route) = &message.route {
        lines.push(format!("    route: {}", route));
    }
    if let Some(sources) = message.sources.as_ref().filter(|s| !s.is_empty()) {
        lines.push(format!("    sources: {}", sources.join(", ")));
    }
    lines
}

/// Incremental renderer: redraws the whole panel when the widget opens,
/// afterwards only the messages appended since the last frame.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    title: String,
    rendered: usize,
    was_open: bool,
}

impl TerminalRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Lines to print for the current state
    pub fn frame(&mut self, state: &ConversationState) -> Vec<String> {
        if !state.is_open {
            self.was_open = false;
            return Vec::new();
        }

        let mut lines = Vec::new();
        let start = if self.was_open {
            self.rendered.min(state.messages.len())
        } else {
            lines.push(format!("=== {} ===", self.title));
            if state.messages.is_empty() {
                lines.push(EMPTY_STATE.to_string());
            }
            0
        };

        for message in &state.messages[start..] {
            lines.extend(render_message(message));
        }

        self.rendered = state.messages.len();
        self.was_open = true;
        lines
    }
}
