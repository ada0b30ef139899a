//! Shared utilities for Supportchat
//!
//! This crate provides common functionality used across the workspace:
//! - Runtime configuration loaded from the environment
//! - State machine error types shared by the domain crates

pub mod config;
pub mod state;

pub use config::Config;
pub use state::StateError;
