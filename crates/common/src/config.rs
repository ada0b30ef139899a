//! Configuration management following 12-factor app principles
//!
//! Runtime settings for the chat front end are loaded from environment
//! variables. The AskAgent collaborator carries its own configuration in
//! `supportchat-agent`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_RUST_LOG: &str = "supportchat=info";
const DEFAULT_WIDGET_TITLE: &str = "Support";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter directive, e.g. `supportchat=debug`
    pub rust_log: String,

    /// Header shown above the conversation
    pub widget_title: String,

    /// Whether the widget starts open instead of collapsed
    pub start_open: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: DEFAULT_RUST_LOG.to_string(),
            widget_title: DEFAULT_WIDGET_TITLE.to_string(),
            start_open: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let start_open = match env::var("SUPPORTCHAT_START_OPEN") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("SUPPORTCHAT_START_OPEN must be a boolean, got {:?}", raw)
            })?,
            Err(_) => false,
        };

        let config = Self {
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
            widget_title: env::var("SUPPORTCHAT_WIDGET_TITLE")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_WIDGET_TITLE.to_string()),
            start_open,
        };

        tracing::debug!(
            widget_title = %config.widget_title,
            start_open = config.start_open,
            "Loaded chat configuration"
        );

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
