//! Message types for the conversation thread.
//!
//! These are the values stored in the [`Conversation`](crate::Conversation)
//! and sent verbatim to the chat endpoint as the `messages` array.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Image attached to the greeting messages.
pub const GREETING_IMAGE: &str = "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60";

/// Image attached to replies about France.
pub const FRANCE_IMAGE: &str = "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60";

/// Suffix appended to replies about France.
pub const FRANCE_SUFFIX: &str = " 🇫🇷";

/// Prefix for assistant messages that report a failed request.
pub const ERROR_PREFIX: &str = "Error: ";

/// Role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message.
    User,
    /// Assistant response (or a synthetic greeting / error report).
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author.
    pub role: Role,
    /// Message content.
    pub content: String,
    /// Illustrative image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Local time the message was created, as `HH:MM`.
    pub timestamp: String,
}

impl ChatMessage {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            image: None,
            timestamp: timestamp_now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            image: None,
            timestamp: timestamp_now(),
        }
    }

    /// Attach an image to this message.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// The image URL, if one is attached and non-empty.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }

    /// Build the assistant reply for a successful turn.
    ///
    /// Replies to user text mentioning France (any case) get the flag suffix
    /// and the Paris image. Other replies carry an empty image, so the field
    /// is still present when the history is sent back to the endpoint.
    pub fn reply_to(user_text: &str, reply: impl Into<String>) -> Self {
        let reply = reply.into();
        if mentions_france(user_text) {
            Self::assistant(format!("{reply}{FRANCE_SUFFIX}")).with_image(FRANCE_IMAGE)
        } else {
            Self::assistant(reply).with_image("")
        }
    }

    /// Build the assistant message reporting a failed turn.
    pub fn error_report(detail: &str) -> Self {
        Self::assistant(format!("{ERROR_PREFIX}{detail}"))
    }

    /// Whether this message reports a failed request.
    pub fn is_error(&self) -> bool {
        self.role == Role::Assistant && self.content.starts_with(ERROR_PREFIX)
    }
}

/// Case-insensitive check for "france" in user text.
pub fn mentions_france(text: &str) -> bool {
    text.to_lowercase().contains("france")
}

/// Current local time formatted as hour:minute.
pub fn timestamp_now() -> String {
    Local::now().format("%H:%M").to_string()
}
