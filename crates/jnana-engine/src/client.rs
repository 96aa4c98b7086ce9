//! Chat client for the remote chat endpoint.
//!
//! One request per turn: `POST` the prior history plus the new text, read
//! back `{ "message": ... }`. Every failure collapses into
//! [`ChatError::RequestFailed`] with a human-readable detail.

use crate::config::{Config, ConfigError};
use crate::message::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Something that can answer a chat turn.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the prior history and the new user text, returning the reply text.
    async fn send_message(
        &self,
        history: &[ChatMessage],
        new_text: &str,
    ) -> Result<String, ChatError>;
}

/// Request body for the chat endpoint.
#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    messages: &'a [ChatMessage],
    new_message: &'a str,
}

/// Successful response body.
#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    message: String,
}

/// Error response body. `detail` is optional and only used when it is a string.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// HTTP implementation of [`ChatClient`].
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpChatClient {
    /// Create a client for the given endpoint URL.
    ///
    /// No request timeout is configured; a slow server keeps the turn pending.
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = crate::config::parse_endpoint(endpoint)?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { http, endpoint })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.endpoint)
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn send_message(
        &self,
        history: &[ChatMessage],
        new_text: &str,
    ) -> Result<String, ChatError> {
        let body = ChatRequestBody {
            messages: history,
            new_message: new_text,
        };

        debug!(
            endpoint = %self.endpoint,
            history_len = history.len(),
            "Sending chat request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat request failed to send");
                ChatError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChatError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Chat endpoint returned an error");
            return Err(ChatError::RequestFailed(error_detail(status.as_u16(), &text)));
        }

        parse_reply(&text)
    }
}

/// Extract the reply text from a successful response body.
fn parse_reply(text: &str) -> Result<String, ChatError> {
    serde_json::from_str::<ChatResponseBody>(text)
        .map(|body| body.message)
        .map_err(|e| ChatError::RequestFailed(format!("Malformed response: {e}")))
}

/// Derive the failure detail for a non-2xx response.
///
/// Uses the body's `detail` field when it is a string, otherwise a
/// status-code message.
fn error_detail(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| match b.detail {
            Some(serde_json::Value::String(detail)) => Some(detail),
            _ => None,
        })
        .unwrap_or_else(|| format!("Request failed with status code {status}"))
}

/// Errors from a chat request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The request failed: transport error, non-2xx response, or bad payload.
    #[error("{0}")]
    RequestFailed(String),
}

impl ChatError {
    /// Human-readable failure detail.
    pub fn detail(&self) -> &str {
        match self {
            Self::RequestFailed(detail) => detail,
        }
    }
}
