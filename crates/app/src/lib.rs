//! Supportchat application composition root
//!
//! Wires configuration, the AskAgent service and a chat session together.

pub mod render;

use std::future::Future;
use std::sync::Arc;

use supportchat_agent::{AgentConfig, AgentServiceFactory, AskAgentService};
use supportchat_common::Config;
use supportchat_conversations::ChatSession;

/// Create a chat session backed by the configured AskAgent provider
pub async fn create_session(
    config: &Config,
    agent_config: AgentConfig,
) -> Result<ChatSession, anyhow::Error> {
    let agent: Arc<dyn AskAgentService> = Arc::from(AgentServiceFactory::create(agent_config)?);

    // Unreachable agents are not fatal: each turn falls back on its own
    match agent.health_check().await {
        Ok(()) => tracing::info!("AskAgent service is reachable"),
        Err(e) => tracing::warn!(error = %e, "AskAgent health check failed"),
    }

    let session = ChatSession::new(agent);
    if config.start_open {
        session.open();
    }

    Ok(session)
}

/// How a foreground turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Settled,
    Interrupted,
}

/// Drive one turn until it settles or `shutdown` fires.
///
/// `on_pending` runs once if the turn is still waiting on the agent after
/// its first poll, by which point the user echo is already in the log.
/// An interrupted turn is dropped, which releases the loading flag.
pub async fn drive_turn<S>(
    session: &ChatSession,
    input: &str,
    shutdown: S,
    on_pending: impl FnOnce(),
) -> TurnOutcome
where
    S: Future<Output = ()>,
{
    let pending = session.submit_turn(input);
    tokio::pin!(pending);
    tokio::pin!(shutdown);

    tokio::select! {
        biased;
        _ = &mut pending => return TurnOutcome::Settled,
        _ = std::future::ready(()) => {}
    }

    on_pending();

    tokio::select! {
        _ = &mut pending => TurnOutcome::Settled,
        _ = &mut shutdown => {
            tracing::info!(session_id = %session.id(), "Abandoning pending turn");
            TurnOutcome::Interrupted
        }
    }
}
