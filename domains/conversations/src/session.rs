//! One chat session: a store plus the two controllers that mutate it
//!
//! Created when the widget is first mounted and dropped when the session
//! ends. Nothing is persisted.

use std::sync::Arc;

use supportchat_agent::AskAgentService;
use uuid::Uuid;

use crate::domain::entities::Message;
use crate::domain::state::VisibilityState;
use crate::orchestrator::RequestOrchestrator;
use crate::store::{ConversationState, ConversationStore};
use crate::visibility::WidgetVisibilityController;

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    store: ConversationStore,
    orchestrator: RequestOrchestrator,
    visibility: WidgetVisibilityController,
}

impl ChatSession {
    /// Start a new, empty, closed session backed by `agent`
    pub fn new(agent: Arc<dyn AskAgentService>) -> Self {
        let store = ConversationStore::new();
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, "Chat session started");

        Self {
            id,
            orchestrator: RequestOrchestrator::new(store.clone(), agent),
            visibility: WidgetVisibilityController::new(store.clone()),
            store,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submit a user turn; see [`RequestOrchestrator::submit_turn`]
    pub async fn submit_turn(&self, raw_input: &str) {
        if !self.visibility.is_open() {
            tracing::debug!(session_id = %self.id, "Turn submitted while widget is closed");
        }
        self.orchestrator.submit_turn(raw_input).await;
    }

    pub fn toggle(&self) -> VisibilityState {
        self.visibility.toggle()
    }

    pub fn open(&self) {
        self.visibility.open();
    }

    pub fn close(&self) {
        self.visibility.close();
    }

    /// Read-only copy of everything the renderer needs
    pub fn state(&self) -> ConversationState {
        self.store.state()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store.snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }
}
