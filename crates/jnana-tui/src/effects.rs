//! Performs the effects `App` asks for.

use crate::app::{App, Effect};
use crate::clipboard::ClipboardProvider;
use jnana_engine::{ChatClient, ChatError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type ChatTask = JoinHandle<Result<String, ChatError>>;

/// Owns the outstanding chat task and the clipboard.
pub(crate) struct EffectRunner {
    client: Arc<dyn ChatClient>,
    clipboard: Box<dyn ClipboardProvider>,
    chat: Option<ChatTask>,
}

impl EffectRunner {
    pub(crate) fn new(client: Arc<dyn ChatClient>, clipboard: Box<dyn ClipboardProvider>) -> Self {
        Self {
            client,
            clipboard,
            chat: None,
        }
    }

    /// Carry out an effect returned by [`App::handle_action`].
    pub(crate) fn perform(&mut self, app: &mut App, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::SendChat(request) => {
                if self.chat.is_some() {
                    warn!("Chat request refused: another request is outstanding");
                    app.on_chat_result(Err(ChatError::RequestFailed(
                        "another request is still outstanding".into(),
                    )));
                    return;
                }
                debug!(history = request.history.len(), "Spawning chat request");
                let client = Arc::clone(&self.client);
                self.chat = Some(tokio::spawn(async move {
                    client
                        .send_message(&request.history, &request.new_message)
                        .await
                }));
            }
            Effect::Copy(text) => {
                let result = self.clipboard.set_text(&text);
                app.copy_finished(result);
            }
        }
    }

    /// Feed a finished chat task back into the app. Never blocks.
    pub(crate) async fn poll_chat(&mut self, app: &mut App) {
        if !self.chat.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        if let Some(handle) = self.chat.take() {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ChatError::RequestFailed(e.to_string())),
            };
            app.on_chat_result(result);
        }
    }

    /// Whether a chat task is outstanding.
    pub(crate) fn chat_in_flight(&self) -> bool {
        self.chat.is_some()
    }

    /// Abort the outstanding chat task, if any.
    pub(crate) fn shutdown(&mut self) {
        if let Some(handle) = self.chat.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, ScriptedClient};
    use std::time::Duration;

    async fn wait_for_chat(runner: &mut EffectRunner, app: &mut App) {
        for _ in 0..100 {
            runner.poll_chat(app).await;
            if !runner.chat_in_flight() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("chat task did not finish");
    }

    #[tokio::test]
    async fn test_send_chat_round_trip() {
        let client = Arc::new(ScriptedClient::new(vec![Ok("Hi there".into())]));
        let mut runner = EffectRunner::new(client.clone(), Box::new(MemoryClipboard::default()));
        let mut app = create_test_app();

        for c in "Hello".chars() {
            app.handle_action(Action::Insert(c));
        }
        let effect = app.handle_action(Action::Submit);
        runner.perform(&mut app, effect);
        assert!(runner.chat_in_flight());
        assert!(app.is_pending());

        wait_for_chat(&mut runner, &mut app).await;
        assert!(!app.is_pending());
        assert_eq!(app.conversation.len(), 3);
        assert_eq!(app.conversation.last().unwrap().content, "Hi there");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.len(), 1);
        assert_eq!(seen[0].1, "Hello");
    }

    #[tokio::test]
    async fn test_copy_effect_uses_clipboard() {
        let client = Arc::new(ScriptedClient::default());
        let mut runner = EffectRunner::new(
            client,
            Box::new(MemoryClipboard {
                fail_with: Some("no display".into()),
                ..MemoryClipboard::default()
            }),
        );
        let mut app = create_test_app();

        let effect = app.handle_action(Action::Copy);
        runner.perform(&mut app, effect);
        assert_eq!(
            app.overlay,
            Some(crate::app::Overlay::CopyAck(Err("no display".into())))
        );
    }

    #[tokio::test]
    async fn test_second_request_resolves_instead_of_hanging() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let client = Arc::new(ScriptedClient::new(vec![Ok("first".into())]).gated(gate));
        let mut runner = EffectRunner::new(client, Box::new(MemoryClipboard::default()));
        let mut app = create_test_app();

        app.handle_action(Action::Insert('a'));
        let effect = app.handle_action(Action::Submit);
        runner.perform(&mut app, effect);

        // The conversation settles while the task is still running.
        assert!(app.on_chat_result(Ok("settled".into())));

        app.handle_action(Action::Insert('b'));
        let effect = app.handle_action(Action::Submit);
        assert!(matches!(effect, Effect::SendChat(_)));
        runner.perform(&mut app, effect);

        assert!(!app.is_pending());
        assert_eq!(app.conversation.len(), 5);
        assert_eq!(
            app.conversation.last().unwrap().content,
            "Error: another request is still outstanding"
        );
        assert!(runner.chat_in_flight());
        runner.shutdown();
    }

    #[tokio::test]
    async fn test_shutdown_aborts_chat() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let client = Arc::new(ScriptedClient::new(vec![Ok("late".into())]).gated(gate));
        let mut runner = EffectRunner::new(client, Box::new(MemoryClipboard::default()));
        let mut app = create_test_app();

        app.handle_action(Action::Insert('x'));
        let effect = app.handle_action(Action::Submit);
        runner.perform(&mut app, effect);

        runner.poll_chat(&mut app).await;
        assert!(app.is_pending());

        runner.shutdown();
        assert!(!runner.chat_in_flight());
    }
}
