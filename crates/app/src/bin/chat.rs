// Supportchat - Terminal Chat Front End

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info};

use supportchat_agent::AgentConfig;
use supportchat_app::render::{TerminalRenderer, TYPING_INDICATOR};
use supportchat_app::{drive_turn, TurnOutcome};
use supportchat_common::config::Config;
use supportchat_conversations::ChatSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Supportchat terminal front end");

    let agent_config = AgentConfig::from_env().map_err(|e| {
        error!("Failed to load AskAgent configuration: {}", e);
        anyhow::anyhow!("AskAgent configuration failed: {}", e)
    })?;

    let session = supportchat_app::create_session(&config, agent_config)
        .await
        .map_err(|e| {
            error!("Failed to create chat session: {}", e);
            e
        })?;

    let mut renderer = TerminalRenderer::new(config.widget_title.clone());
    println!("Commands: /toggle, /open, /close, /quit");
    print_frame(&mut renderer, &session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown => break,
        };

        let Some(line) = line else {
            break;
        };

        match line.trim() {
            "/quit" => break,
            "/toggle" => {
                session.toggle();
            }
            "/open" => session.open(),
            "/close" => session.close(),
            _ if !session.is_open() => {
                println!("(chat is closed, type /open to start)");
                continue;
            }
            _ => {
                let outcome = drive_turn(&session, &line, shutdown.as_mut(), || {
                    print_frame(&mut renderer, &session);
                    println!("{}", TYPING_INDICATOR);
                })
                .await;
                if outcome == TurnOutcome::Interrupted {
                    break;
                }
            }
        }

        print_frame(&mut renderer, &session);
    }

    info!(session_id = %session.id(), "Chat session ended");
    Ok(())
}

fn print_frame(renderer: &mut TerminalRenderer, session: &ChatSession) {
    for line in renderer.frame(&session.state()) {
        println!("{}", line);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, ending session");
        },
        _ = terminate => {
            info!("Received terminate signal, ending session");
        },
    }
}
