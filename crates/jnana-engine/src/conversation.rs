//! Conversation store.
//!
//! Owns the ordered message list and the pending flag. A turn moves the
//! store from idle to pending on [`Conversation::submit_user_text`] and back
//! to idle on [`Conversation::on_chat_result`]; there is no other state.
//!
//! The store never performs I/O. Submitting returns a [`TurnRequest`] that
//! the caller hands to a [`ChatClient`](crate::ChatClient), and the caller
//! feeds the outcome back in.

use crate::client::ChatError;
use crate::message::{ChatMessage, GREETING_IMAGE};
use tracing::{info, warn};

/// Greeting shown when the conversation starts.
pub const WELCOME_GREETING: &str =
    "Hello! I’m VIGNAN JnanaMitra, here to assist you. What would you like to talk about? 😊";

/// Greeting shown after the conversation is cleared.
pub const CLEARED_GREETING: &str = "Chat cleared! How can I assist you now? 😊";

/// A request produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    /// Messages as they were before the user message was appended.
    pub history: Vec<ChatMessage>,
    /// The submitted user text.
    pub new_message: String,
}

/// Conversation state: messages plus the outstanding turn, if any.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    /// User text of the in-flight turn.
    in_flight: Option<String>,
}

impl Conversation {
    /// Create a conversation holding only the welcome greeting.
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            in_flight: None,
        };
        conversation.initialize();
        conversation
    }

    /// Reset the history to the welcome greeting.
    pub fn initialize(&mut self) {
        self.reset_with(WELCOME_GREETING);
    }

    /// Discard the history, leaving only the cleared greeting.
    ///
    /// An in-flight turn stays in flight; its reply lands after the greeting.
    pub fn clear(&mut self) {
        self.reset_with(CLEARED_GREETING);
        info!(pending = self.is_pending(), "Conversation cleared");
    }

    fn reset_with(&mut self, greeting: &str) {
        self.messages.clear();
        self.messages
            .push(ChatMessage::assistant(greeting).with_image(GREETING_IMAGE));
    }

    /// Submit user text.
    ///
    /// Returns `None` without touching state when the text is empty or a turn
    /// is already pending. Otherwise appends the user message, enters the
    /// pending state, and returns the request to dispatch.
    pub fn submit_user_text(&mut self, text: &str) -> Option<TurnRequest> {
        if text.is_empty() {
            return None;
        }
        if self.is_pending() {
            warn!("Submission rejected: a turn is already pending");
            return None;
        }

        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(text));
        self.in_flight = Some(text.to_string());

        Some(TurnRequest {
            history,
            new_message: text.to_string(),
        })
    }

    /// Resolve the pending turn with the chat outcome.
    ///
    /// Appends exactly one assistant message and leaves the pending state.
    /// Returns `false` if no turn was pending, in which case nothing changes.
    pub fn on_chat_result(&mut self, result: Result<String, ChatError>) -> bool {
        let Some(user_text) = self.in_flight.take() else {
            warn!("Chat result arrived with no pending turn");
            return false;
        };

        let message = match result {
            Ok(reply) => {
                info!("Chat turn completed");
                ChatMessage::reply_to(&user_text, reply)
            }
            Err(e) => {
                warn!(error = %e, "Chat turn failed");
                ChatMessage::error_report(e.detail())
            }
        };
        self.messages.push(message);
        true
    }

    /// Messages in order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the greeting is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether a turn is in flight.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The last message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// The most recent image URL in the conversation.
    pub fn last_image(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(ChatMessage::image_url)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Role, FRANCE_IMAGE};

    fn failed(detail: &str) -> Result<String, ChatError> {
        Err(ChatError::RequestFailed(detail.into()))
    }

    #[test]
    fn test_new_has_single_greeting() {
        let conv = Conversation::new();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role, Role::Assistant);
        assert_eq!(conv.messages()[0].content, WELCOME_GREETING);
        assert_eq!(conv.messages()[0].image_url(), Some(GREETING_IMAGE));
        assert!(!conv.is_pending());
    }

    #[test]
    fn test_submit_empty_is_noop() {
        let mut conv = Conversation::new();
        assert!(conv.submit_user_text("").is_none());
        assert_eq!(conv.len(), 1);
        assert!(!conv.is_pending());
    }

    #[test]
    fn test_submit_appends_user_and_sets_pending() {
        let mut conv = Conversation::new();
        let request = conv.submit_user_text("Hello").unwrap();

        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages()[1].role, Role::User);
        assert_eq!(conv.messages()[1].content, "Hello");
        assert!(conv.is_pending());

        assert_eq!(request.new_message, "Hello");
    }

    #[test]
    fn test_request_carries_pre_turn_history() {
        let mut conv = Conversation::new();
        let request = conv.submit_user_text("Hello").unwrap();
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.history[0].content, WELCOME_GREETING);

        conv.on_chat_result(Ok("Hi there".into()));
        let request = conv.submit_user_text("Again").unwrap();
        let contents: Vec<&str> = request.history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec![WELCOME_GREETING, "Hello", "Hi there"]);
    }

    #[test]
    fn test_submit_while_pending_is_noop() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Hello").unwrap();

        for text in ["Hi", "", "Another", "france"] {
            assert!(conv.submit_user_text(text).is_none());
            assert_eq!(conv.len(), 2);
            assert!(conv.is_pending());
        }
    }

    #[test]
    fn test_hello_scenario() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Hello").unwrap();
        assert!(conv.on_chat_result(Ok("Hi there".into())));

        assert_eq!(conv.len(), 3);
        assert!(!conv.is_pending());
        let roles: Vec<Role> = conv.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(conv.messages()[1].content, "Hello");
        assert_eq!(conv.messages()[2].content, "Hi there");
        assert!(conv.messages()[2].image_url().is_none());
    }

    #[test]
    fn test_france_scenario() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Tell me about France").unwrap();
        conv.on_chat_result(Ok("Paris is lovely".into()));

        let reply = conv.last().unwrap();
        assert_eq!(reply.content, "Paris is lovely 🇫🇷");
        assert_eq!(reply.image_url(), Some(FRANCE_IMAGE));
    }

    #[test]
    fn test_france_case_variants() {
        for text in ["FRANCE", "la france", "FrAnCe trip"] {
            let mut conv = Conversation::new();
            conv.submit_user_text(text).unwrap();
            conv.on_chat_result(Ok("ok".into()));
            let reply = conv.last().unwrap();
            assert!(reply.image_url().is_some(), "{text}");
            assert!(reply.content.ends_with("🇫🇷"), "{text}");
        }
    }

    #[test]
    fn test_failure_appends_error_message() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Hello").unwrap();
        conv.on_chat_result(failed("Network Error"));

        assert_eq!(conv.len(), 3);
        assert!(!conv.is_pending());
        let reply = conv.last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Error: Network Error");
        assert!(reply.image.is_none());
    }

    #[test]
    fn test_failure_about_france_has_no_image() {
        let mut conv = Conversation::new();
        conv.submit_user_text("France?").unwrap();
        conv.on_chat_result(failed("boom"));
        let reply = conv.last().unwrap();
        assert!(reply.content.starts_with("Error: "));
        assert!(reply.image_url().is_none());
    }

    #[test]
    fn test_result_without_pending_turn_is_ignored() {
        let mut conv = Conversation::new();
        assert!(!conv.on_chat_result(Ok("stray".into())));
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn test_resend_after_failure() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Hello").unwrap();
        conv.on_chat_result(failed("down"));
        assert!(conv.submit_user_text("Hello").is_some());
        assert_eq!(conv.len(), 4);
    }

    #[test]
    fn test_clear_resets_to_greeting() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Hello").unwrap();
        conv.on_chat_result(Ok("Hi".into()));

        conv.clear();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role, Role::Assistant);
        assert_eq!(conv.messages()[0].content, CLEARED_GREETING);
        assert_eq!(conv.last_image(), Some(GREETING_IMAGE));
    }

    #[test]
    fn test_clear_keeps_in_flight_turn() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Hello").unwrap();
        conv.clear();

        assert_eq!(conv.len(), 1);
        assert!(conv.is_pending());
        assert!(conv.submit_user_text("Again").is_none());

        conv.on_chat_result(Ok("Hi".into()));
        assert_eq!(conv.len(), 2);
        assert!(!conv.is_pending());
    }

    #[test]
    fn test_initialize_after_turns() {
        let mut conv = Conversation::new();
        conv.submit_user_text("Hello").unwrap();
        conv.on_chat_result(Ok("Hi".into()));
        conv.initialize();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].content, WELCOME_GREETING);
    }

    #[test]
    fn test_last_image_prefers_latest() {
        let mut conv = Conversation::new();
        conv.submit_user_text("France").unwrap();
        conv.on_chat_result(Ok("Paris".into()));
        assert_eq!(conv.last_image(), Some(FRANCE_IMAGE));

        conv.submit_user_text("Hello").unwrap();
        conv.on_chat_result(Ok("Hi".into()));
        assert_eq!(conv.last_image(), Some(FRANCE_IMAGE));
    }
}
