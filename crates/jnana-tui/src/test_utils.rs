//! Test utilities for jnana-tui rendering and integration tests.

use crate::app::App;
use crate::screens::render_app;
use async_trait::async_trait;
use jnana_engine::{ChatClient, ChatError, ChatMessage, Config};
use ratatui::{buffer::Buffer, layout::Rect};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Create a test app with default configuration.
pub fn create_test_app() -> App {
    App::new(&Config::default())
}

/// Convert a buffer to a string, one line per row with trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the whole app at the given size and return it as a string.
pub fn render_app_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    render_app(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

/// Chat client that answers from a script and records what it was sent.
///
/// With a gate, each call waits for `gate.notify_one()` before answering.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, ChatError>>>,
    pub seen: Mutex<Vec<(Vec<ChatMessage>, String)>>,
    pub gate: Option<Arc<Notify>>,
}

impl ScriptedClient {
    /// Client answering with `replies` in order.
    pub fn new(replies: Vec<Result<String, ChatError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// Hold every answer until the gate is notified.
    #[must_use]
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn send_message(&self, history: &[ChatMessage], new_text: &str) -> Result<String, ChatError> {
        self.seen
            .lock()
            .unwrap()
            .push((history.to_vec(), new_text.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::RequestFailed("script exhausted".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.assistant_name, "VIGNAN JnanaMitra");
    }

    #[tokio::test]
    async fn test_scripted_client_replies_in_order() {
        let client = ScriptedClient::new(vec![Ok("one".into())]);
        assert_eq!(client.send_message(&[], "a").await.unwrap(), "one");
        assert!(client.send_message(&[], "b").await.is_err());
        assert_eq!(client.seen.lock().unwrap().len(), 2);
    }
}
