//! jnana-engine: Headless core of the jnana chat client
//!
//! This crate provides everything that does not touch a terminal:
//! - The conversation store and its pending-turn state machine
//! - The chat client for the remote `/api/chat` endpoint
//! - Configuration loading
//! - An awaited turn driver for line-oriented front ends

pub mod client;
pub mod config;
pub mod conversation;
pub mod message;
pub mod turn;

// Re-export commonly used types
pub use client::{ChatClient, ChatError, HttpChatClient};
pub use config::{Config, ConfigError, ThemeMode, ENDPOINT_ENV};
pub use conversation::{Conversation, TurnRequest, CLEARED_GREETING, WELCOME_GREETING};
pub use message::{
    mentions_france, timestamp_now, ChatMessage, Role, ERROR_PREFIX, FRANCE_IMAGE, FRANCE_SUFFIX,
    GREETING_IMAGE,
};
pub use turn::{run_turn, TurnOutcome};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
