//! Common test utilities for integration tests
//!
//! Spins up a wiremock server standing in for the answering service and
//! builds chat sessions wired to it through the real HTTP client.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use supportchat_agent::client::HttpAgentClient;
use supportchat_agent::AgentConfig;
use supportchat_conversations::ChatSession;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address nothing listens on; connections are refused
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Open session wired over HTTP to `base_url`
pub fn session_for(base_url: &str) -> ChatSession {
    session_with(AgentConfig {
        provider: "http".to_string(),
        base_url: base_url.to_string(),
        timeout: None,
    })
}

fn session_with(config: AgentConfig) -> ChatSession {
    let client = HttpAgentClient::new(config).expect("HTTP client should build in tests");
    let session = ChatSession::new(Arc::new(client));
    session.open();
    session
}

/// Fake answering service
pub struct TestAgentServer {
    pub server: MockServer,
}

impl TestAgentServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn agent_config(&self, timeout: Option<Duration>) -> AgentConfig {
        AgentConfig {
            provider: "http".to_string(),
            base_url: self.server.uri(),
            timeout,
        }
    }

    /// Session talking to this server over HTTP, widget already open
    pub fn session(&self) -> ChatSession {
        self.session_with_timeout(None)
    }

    pub fn session_with_timeout(&self, timeout: Option<Duration>) -> ChatSession {
        session_with(self.agent_config(timeout))
    }

    /// Answer every `/ask` with `body`
    pub async fn answer_with(&self, body: Value) {
        self.respond_with(ResponseTemplate::new(200).set_body_json(body))
            .await;
    }

    /// Answer the next `/ask` with `body`, once
    pub async fn answer_once(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }

    pub async fn respond_with(&self, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every `/ask` request received, in order
    pub async fn ask_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/ask")
            .map(|r| serde_json::from_slice(&r.body).expect("request body should be JSON"))
            .collect()
    }
}
