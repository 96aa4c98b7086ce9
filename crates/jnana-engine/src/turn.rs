//! Awaited turn driver for line-oriented front ends.

use crate::client::ChatClient;
use crate::conversation::Conversation;
use crate::message::ChatMessage;

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The store rejected the submission (empty text or a turn already pending).
    Rejected,
    /// The server replied.
    Replied(ChatMessage),
    /// The request failed; the message is the error report.
    Failed(ChatMessage),
}

/// Run one full turn: submit, await the client, resolve.
pub async fn run_turn(
    conversation: &mut Conversation,
    client: &dyn ChatClient,
    text: &str,
) -> TurnOutcome {
    let Some(request) = conversation.submit_user_text(text) else {
        return TurnOutcome::Rejected;
    };

    let result = client
        .send_message(&request.history, &request.new_message)
        .await;
    let failed = result.is_err();
    if !conversation.on_chat_result(result) {
        return TurnOutcome::Rejected;
    }

    match conversation.last().cloned() {
        Some(message) if failed => TurnOutcome::Failed(message),
        Some(message) => TurnOutcome::Replied(message),
        None => TurnOutcome::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests and answers from a fixed result.
    struct FakeClient {
        result: Result<String, ChatError>,
        seen: Mutex<Vec<(usize, String)>>,
    }

    impl FakeClient {
        fn new(result: Result<String, ChatError>) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for FakeClient {
        async fn send_message(
            &self,
            history: &[ChatMessage],
            new_text: &str,
        ) -> Result<String, ChatError> {
            self.seen
                .lock()
                .unwrap()
                .push((history.len(), new_text.to_string()));
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_run_turn_success() {
        let client = FakeClient::new(Ok("Hi there".into()));
        let mut conv = Conversation::new();

        let outcome = run_turn(&mut conv, &client, "Hello").await;
        assert!(matches!(outcome, TurnOutcome::Replied(ref m) if m.content == "Hi there"));
        assert_eq!(conv.len(), 3);
        assert!(!conv.is_pending());
        assert_eq!(*client.seen.lock().unwrap(), vec![(1, "Hello".to_string())]);
    }

    #[tokio::test]
    async fn test_run_turn_failure() {
        let client = FakeClient::new(Err(ChatError::RequestFailed("offline".into())));
        let mut conv = Conversation::new();

        let outcome = run_turn(&mut conv, &client, "Hello").await;
        assert!(matches!(outcome, TurnOutcome::Failed(ref m) if m.content == "Error: offline"));
        assert_eq!(conv.len(), 3);
        assert!(!conv.is_pending());
    }

    #[tokio::test]
    async fn test_run_turn_empty_text_rejected() {
        let client = FakeClient::new(Ok("unused".into()));
        let mut conv = Conversation::new();

        assert_eq!(run_turn(&mut conv, &client, "").await, TurnOutcome::Rejected);
        assert_eq!(conv.len(), 1);
        assert!(client.seen.lock().unwrap().is_empty());
    }
}
