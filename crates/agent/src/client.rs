//! HTTP AskAgent Client Implementation
//!
//! POSTs `{question, chat_history}` as JSON to `{base_url}/ask` and decodes
//! `{answer, route?, sources?}` from the reply.

use crate::{AgentConfig, AgentError, AskAgentService, AskRequest, AskResponse};

/// HTTP client for the answering service
#[derive(Debug)]
pub struct HttpAgentClient {
    http: reqwest::Client,
    ask_url: String,
    health_url: String,
}

impl HttpAgentClient {
    /// Create a new client from configuration
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AgentError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/');

        Ok(Self {
            http,
            ask_url: format!("{}/ask", base_url),
            health_url: format!("{}/", base_url),
        })
    }

    /// Endpoint questions are posted to
    pub fn ask_url(&self) -> &str {
        &self.ask_url
    }
}

#[async_trait::async_trait]
impl AskAgentService for HttpAgentClient {
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, AgentError> {
        tracing::debug!(
            history_len = request.chat_history.len(),
            url = %self.ask_url,
            "Sending AskAgent request"
        );

        let response = self
            .http
            .post(&self.ask_url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(AgentError::Response(format!(
                "AskAgent returned {}: {}",
                status, body
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AgentError::Request(format!("Failed to read response body: {}", e)))?;

        let answer: AskResponse = serde_json::from_slice(&body)
            .map_err(|e| AgentError::Malformed(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(route = ?answer.route, "AskAgent request succeeded");
        Ok(answer)
    }

    async fn health_check(&self) -> Result<(), AgentError> {
        let response = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| AgentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AgentError::Response(format!(
                "Health check returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
