//! End-to-end chat turns against an HTTP answering service

mod common;

use std::time::Duration;

use serde_json::json;
use supportchat_agent::AgentConfig;
use supportchat_common::Config;
use supportchat_conversations::{MessageRole, FALLBACK_MESSAGE};
use wiremock::ResponseTemplate;

use crate::common::{TestAgentServer, UNREACHABLE_URL};

mod test_successful_turns {
    use super::*;

    #[tokio::test]
    async fn test_order_status_scenario() {
        let agent = TestAgentServer::start().await;
        agent
            .answer_with(json!({"answer": "Your order ships tomorrow.", "route": "orders"}))
            .await;
        let session = agent.session();

        session.submit_turn("What is my order status?").await;

        let state = session.state();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, MessageRole::User);
        assert_eq!(state.messages[0].content, "What is my order status?");
        assert_eq!(state.messages[1].role, MessageRole::Assistant);
        assert_eq!(state.messages[1].content, "Your order ships tomorrow.");
        assert_eq!(state.messages[1].route.as_deref(), Some("orders"));
        assert!(state.messages[1].sources.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_sources_are_kept_in_order() {
        let agent = TestAgentServer::start().await;
        agent
            .answer_with(json!({
                "answer": "Section 80C covers it.",
                "route": "vector_db",
                "sources": ["tax_guide.pdf", "faq.pdf"]
            }))
            .await;
        let session = agent.session();

        session.submit_turn("Which deductions apply?").await;

        let reply = &session.messages()[1];
        assert_eq!(
            reply.sources,
            Some(vec!["tax_guide.pdf".to_string(), "faq.pdf".to_string()])
        );
    }

    #[tokio::test]
    async fn test_history_payload_per_turn() {
        let agent = TestAgentServer::start().await;
        agent.answer_once(json!({"answer": "A1", "route": "general"})).await;
        agent.answer_once(json!({"answer": "A2"})).await;
        agent.answer_once(json!({"answer": "A3"})).await;
        let session = agent.session();

        session.submit_turn("Q1").await;
        session.submit_turn("Q2").await;
        session.submit_turn("Q3").await;

        let bodies = agent.ask_bodies().await;
        assert_eq!(bodies.len(), 3);

        let messages = session.messages();
        assert_eq!(messages.len(), 6);

        for (k, body) in bodies.iter().enumerate() {
            let expected: Vec<_> = messages[..2 * k]
                .iter()
                .map(|m| json!({"role": m.role.to_string(), "content": m.content}))
                .collect();
            assert_eq!(body["question"], format!("Q{}", k + 1));
            assert_eq!(body["chat_history"], json!(expected), "turn {}", k + 1);
        }
    }
}

mod test_failed_turns {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_server_error_appends_fallback() {
        let agent = TestAgentServer::start().await;
        agent
            .respond_with(ResponseTemplate::new(500).set_body_json(
                json!({"detail": "Internal server error: graph failed"}),
            ))
            .await;
        let session = agent.session();

        session.submit_turn("What is my order status?").await;

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, FALLBACK_MESSAGE);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_missing_answer_appends_fallback() {
        let agent = TestAgentServer::start().await;
        agent.answer_with(json!({"route": "orders", "sources": []})).await;
        let session = agent.session();

        session.submit_turn("Hello").await;

        assert_eq!(session.messages()[1].content, FALLBACK_MESSAGE);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_unreachable_service_appends_fallback() {
        let session = common::session_for(UNREACHABLE_URL);

        session.submit_turn("Anyone there?").await;

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, FALLBACK_MESSAGE);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_transport_timeout_appends_fallback() {
        let agent = TestAgentServer::start().await;
        agent
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"answer": "too late"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .await;
        let session = agent.session_with_timeout(Some(Duration::from_millis(100)));

        session.submit_turn("Quick question").await;

        assert_eq!(session.messages()[1].content, FALLBACK_MESSAGE);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_failed_turn_does_not_block_next_turn() {
        let agent = TestAgentServer::start().await;
        agent.respond_with(ResponseTemplate::new(503)).await;
        let session = agent.session();
        session.submit_turn("first").await;

        agent.server.reset().await;
        agent.answer_with(json!({"answer": "Back online."})).await;
        session.submit_turn("second").await;

        let contents: Vec<_> = session.messages().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["first", FALLBACK_MESSAGE, "second", "Back online."]);

        let bodies = agent.ask_bodies().await;
        assert_eq!(bodies.len(), 1);
        assert_eq!(
            bodies[0]["chat_history"][1]["content"],
            json!(FALLBACK_MESSAGE)
        );
    }
}

mod test_gating {
    use super::*;

    #[tokio::test]
    async fn test_second_submission_while_pending_is_dropped() {
        let agent = TestAgentServer::start().await;
        agent
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"answer": "Done."}))
                    .set_delay(Duration::from_millis(200)),
            )
            .await;
        let session = agent.session();

        tokio::join!(session.submit_turn("first"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            assert!(session.is_loading());
            session.submit_turn("second").await;
        });

        assert_eq!(agent.ask_bodies().await.len(), 1);
        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].content, "Done.");
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_blank_submission_sends_nothing() {
        let agent = TestAgentServer::start().await;
        agent.answer_with(json!({"answer": "unused"})).await;
        let session = agent.session();
        let before = session.state();

        session.submit_turn(" \t ").await;

        assert_eq!(session.state(), before);
        assert!(agent.ask_bodies().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggling_mid_conversation_keeps_messages() {
        let agent = TestAgentServer::start().await;
        agent.answer_with(json!({"answer": "Sure."})).await;
        let session = agent.session();

        session.submit_turn("Can you help?").await;
        let before = session.messages();
        for _ in 0..4 {
            session.toggle();
        }
        session.close();

        assert_eq!(session.messages(), before);
        assert!(!session.is_open());
    }
}

mod test_composition_root {
    use super::*;

    #[tokio::test]
    async fn test_create_session_uses_http_provider() {
        let agent = TestAgentServer::start().await;
        agent.answer_with(json!({"answer": "Wired up."})).await;

        let config = Config {
            start_open: true,
            ..Config::default()
        };
        let agent_config = agent.agent_config(None);
        let session = supportchat_app::create_session(&config, agent_config)
            .await
            .unwrap();

        assert!(session.is_open());
        session.submit_turn("ping").await;
        assert_eq!(session.messages()[1].content, "Wired up.");
    }

    #[tokio::test]
    async fn test_create_session_tolerates_unhealthy_agent() {
        let agent_config = AgentConfig {
            provider: "http".to_string(),
            base_url: UNREACHABLE_URL.to_string(),
            timeout: None,
        };

        let session = supportchat_app::create_session(&Config::default(), agent_config)
            .await
            .unwrap();

        session.submit_turn("hello?").await;
        assert_eq!(session.messages()[1].content, FALLBACK_MESSAGE);
    }
}
