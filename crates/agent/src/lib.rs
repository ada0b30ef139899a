//! Supportchat AskAgent Service
//!
//! Contract for the remote answering service a chat session talks to:
//! - HTTP binding that POSTs questions to `{base_url}/ask`
//! - Programmable mock service for testing and development
//! - Configurable provider, base URL, and optional transport timeout

pub mod client;
pub mod mock;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("AskAgent configuration error: {0}")]
    Configuration(String),

    #[error("AskAgent request error: {0}")]
    Request(String),

    #[error("AskAgent response error: {0}")]
    Response(String),

    #[error("AskAgent malformed response: {0}")]
    Malformed(String),
}

/// Role of a prior message in the chat history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    User,
    Assistant,
}

/// One prior message, reduced to what the answering service needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: AgentRole,
    pub content: String,
}

/// Outbound payload for a single turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub chat_history: Vec<HistoryEntry>,
}

/// Answer returned by the service. Only `answer` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl AskResponse {
    /// Create a response carrying only an answer
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            route: None,
            sources: None,
        }
    }

    /// Attach the routing decision made by the service
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Attach the references the answer was built from
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// AskAgent service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// AskAgent provider (http, mock)
    pub provider: String,
    /// Base URL of the answering service
    pub base_url: String,
    /// Transport timeout; `None` leaves a turn pending until the server settles it
    pub timeout: Option<Duration>,
}

impl AgentConfig {
    /// Create AskAgent config from environment variables
    pub fn from_env() -> Result<Self, AgentError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("ASK_AGENT_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let base_url = std::env::var("ASK_AGENT_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let timeout = match std::env::var("ASK_AGENT_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AgentError::Configuration(format!(
                        "ASK_AGENT_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(AgentError::Configuration(
                        "ASK_AGENT_TIMEOUT_SECS must be at least 1; unset it for no timeout"
                            .to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        if provider == "http" && base_url.trim().is_empty() {
            return Err(AgentError::Configuration(
                "ASK_AGENT_BASE_URL is required for http provider".to_string(),
            ));
        }

        Ok(Self {
            provider,
            base_url,
            timeout,
        })
    }
}

/// AskAgent service trait for different implementations
#[async_trait::async_trait]
pub trait AskAgentService: Send + Sync {
    /// Ask a question with the prior conversation as context.
    /// Called once per turn; callers never retry.
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, AgentError>;

    /// Probe whether the answering service is reachable
    async fn health_check(&self) -> Result<(), AgentError>;
}

/// Factory for creating AskAgentService implementations
pub struct AgentServiceFactory;

impl AgentServiceFactory {
    /// Create an AskAgentService based on configuration
    pub fn create(config: AgentConfig) -> Result<Box<dyn AskAgentService>, AgentError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating HTTP AskAgent client");
                Ok(Box::new(client::HttpAgentClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock AskAgent service");
                Ok(Box::new(mock::MockAgentService::new()))
            }
            provider => Err(AgentError::Configuration(format!(
                "Unknown AskAgent provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
