//! Application state and update logic for the jnana TUI.
//!
//! `App` never performs I/O. Actions that need the outside world return an
//! [`Effect`], which the event loop carries out and feeds back through
//! [`App::on_chat_result`] or [`App::copy_finished`].

use crate::emoji::EmojiPicker;
use crate::event::Action;
use crate::screens::chat::{transcript, transcript_inner};
use crate::starfield::Starfield;
use crate::theme::Theme;
use crate::ui::chat_layout;
use crate::ui::widgets::TextInputState;
use jnana_engine::{ChatError, ChatMessage, Config, Conversation, ThemeMode, TurnRequest};
use ratatui::layout::Rect;
use tracing::{debug, info};

/// Lines moved per PageUp/PageDown.
pub const SCROLL_STEP: usize = 5;

/// Ticks a notification stays visible (~3 seconds at 250ms).
const NOTIFICATION_TICKS: u8 = 12;

/// Work the event loop must perform on behalf of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Dispatch a chat request; the result goes to [`App::on_chat_result`].
    SendChat(TurnRequest),
    /// Copy text to the clipboard; the outcome goes to [`App::copy_finished`].
    Copy(String),
}

/// Modal overlay drawn over the chat screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    EmojiPicker,
    /// Full-size view of an image URL.
    ImageViewer(String),
    /// Clipboard acknowledgment; `Err` carries the failure reason.
    CopyAck(Result<(), String>),
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// The conversation being displayed.
    pub conversation: Conversation,

    /// Message input buffer.
    pub input: TextInputState,

    /// Active overlay, if any.
    pub overlay: Option<Overlay>,

    /// Emoji picker selection, kept across openings.
    pub emoji: EmojiPicker,

    /// Current theme mode and its palette.
    pub theme_mode: ThemeMode,
    pub theme: Theme,

    /// Display name for assistant messages.
    pub assistant_name: String,

    /// Transcript lines scrolled back from the bottom (0 = following).
    pub scroll_back: usize,

    /// Message that copy and image viewing act on; `None` means the latest.
    pub selected: Option<usize>,

    /// Notification message.
    pub notification: Option<String>,
    notification_ttl: u8,

    /// Tick counter for animations.
    pub tick: usize,

    /// Header decoration.
    pub starfield: Starfield,

    /// Last known terminal size.
    pub viewport: Rect,
}

impl App {
    /// Create a new app from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            conversation: Conversation::new(),
            input: TextInputState::new(),
            overlay: None,
            emoji: EmojiPicker::new(),
            theme_mode: config.theme,
            theme: Theme::for_mode(config.theme),
            assistant_name: config.assistant_name.clone(),
            scroll_back: 0,
            selected: None,
            notification: None,
            notification_ttl: 0,
            tick: 0,
            starfield: Starfield::new(),
            viewport: Rect::new(0, 0, 80, 24),
        }
    }

    /// Whether a chat request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.conversation.is_pending()
    }

    /// Record the terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
    }

    /// Handle an action, returning any effect the event loop must perform.
    pub fn handle_action(&mut self, action: Action) -> Effect {
        if action == Action::None {
            return Effect::None;
        }

        if let Some(overlay) = self.overlay.take() {
            self.handle_overlay_action(overlay, action);
            return Effect::None;
        }

        let pending = self.is_pending();
        match action {
            Action::Back if self.selected.is_some() => self.select_latest(),
            Action::Quit | Action::Back => self.should_quit = true,
            Action::Help => self.overlay = Some(Overlay::Help),
            Action::Submit => return self.submit(),
            Action::Insert(c) if !pending => self.input.insert(c),
            Action::Backspace if !pending => self.input.backspace(),
            Action::Delete if !pending => self.input.delete(),
            Action::Left if !pending => self.input.move_left(),
            Action::Right if !pending => self.input.move_right(),
            Action::Home if !pending => self.input.move_home(),
            Action::End if !pending => self.input.move_end(),
            Action::Up if !pending => self.input.history_prev(),
            Action::Down if !pending => self.input.history_next(),
            Action::ToggleEmoji if !pending => self.overlay = Some(Overlay::EmojiPicker),
            Action::ScrollUp => {
                self.scroll_back = (self.scroll_back + SCROLL_STEP).min(self.max_scroll());
            }
            Action::ScrollDown => self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP),
            Action::ScrollBottom => self.select_latest(),
            Action::SelectPrev => self.select_prev(),
            Action::SelectNext => self.select_next(),
            Action::Clear => {
                self.conversation.clear();
                self.select_latest();
            }
            Action::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggle();
                self.theme = Theme::for_mode(self.theme_mode);
                let name = match self.theme_mode {
                    ThemeMode::Light => "Light",
                    ThemeMode::Dark => "Dark",
                };
                self.set_notification(format!("{name} theme"));
            }
            Action::ViewImage => {
                let url = match self.selected_message() {
                    Some(message) => message.image_url(),
                    None => self.conversation.last_image(),
                };
                match url {
                    Some(url) => self.overlay = Some(Overlay::ImageViewer(url.to_string())),
                    None => self.set_notification("No image to view".to_string()),
                }
            }
            Action::Copy => match self.selected_message().or_else(|| self.conversation.last()) {
                Some(message) => return Effect::Copy(message.content.clone()),
                None => self.set_notification("Nothing to copy".to_string()),
            },
            _ => {}
        }
        Effect::None
    }

    fn handle_overlay_action(&mut self, overlay: Overlay, action: Action) {
        match overlay {
            // Any key dismisses these.
            Overlay::Help | Overlay::CopyAck(_) => {}
            Overlay::EmojiPicker => match action {
                Action::Left => self.keep(overlay, |app| app.emoji.left()),
                Action::Right => self.keep(overlay, |app| app.emoji.right()),
                Action::Up => self.keep(overlay, |app| app.emoji.up()),
                Action::Down => self.keep(overlay, |app| app.emoji.down()),
                Action::Submit => {
                    let mut buf = [0u8; 4];
                    self.input.append(self.emoji.selected().encode_utf8(&mut buf));
                }
                Action::Back | Action::Quit | Action::ToggleEmoji => {}
                _ => self.overlay = Some(overlay),
            },
            Overlay::ImageViewer(_) => match action {
                Action::Back | Action::Submit | Action::Quit | Action::ViewImage => {}
                _ => self.overlay = Some(overlay),
            },
        }
    }

    fn keep(&mut self, overlay: Overlay, f: impl FnOnce(&mut Self)) {
        f(self);
        self.overlay = Some(overlay);
    }

    fn submit(&mut self) -> Effect {
        if self.is_pending() {
            debug!("Submit ignored while a turn is pending");
            return Effect::None;
        }
        let text = self.input.content().to_string();
        match self.conversation.submit_user_text(&text) {
            Some(request) => {
                self.input.submit();
                self.select_latest();
                Effect::SendChat(request)
            }
            None => Effect::None,
        }
    }

    /// Feed the outcome of a dispatched chat request back into the conversation.
    ///
    /// New replies scroll to the bottom unless a message is selected.
    pub fn on_chat_result(&mut self, result: Result<String, ChatError>) -> bool {
        let resolved = self.conversation.on_chat_result(result);
        if resolved && self.selected.is_none() {
            self.scroll_back = 0;
        }
        resolved
    }

    /// The selected message, if the selection is set and still valid.
    pub fn selected_message(&self) -> Option<&ChatMessage> {
        self.selected
            .and_then(|index| self.conversation.messages().get(index))
    }

    fn select_prev(&mut self) {
        let len = self.conversation.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => index.min(len - 1).saturating_sub(1),
            None => len - 1,
        });
        self.reveal_selected();
    }

    fn select_next(&mut self) {
        match self.selected {
            Some(index) if index + 1 < self.conversation.len() => {
                self.selected = Some(index + 1);
                self.reveal_selected();
            }
            Some(_) => self.select_latest(),
            None => {}
        }
    }

    /// Drop the selection and follow the newest message again.
    fn select_latest(&mut self) {
        self.selected = None;
        self.scroll_back = 0;
    }

    /// Scroll so the selected message's header line is on screen.
    fn reveal_selected(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        let inner = transcript_inner(chat_layout(self.viewport).transcript);
        let view = transcript(self, inner.width);
        let Some(&start) = view.starts.get(index) else {
            return;
        };

        let height = usize::from(inner.height);
        let max = view.lines.len().saturating_sub(height);
        let offset = self.scroll_back.min(max);
        let top = max - offset;
        if start < top || start >= top + height {
            self.scroll_back = max.saturating_sub(start);
        }
    }

    /// Record the outcome of a clipboard copy and show the acknowledgment.
    pub fn copy_finished(&mut self, result: Result<(), String>) {
        match &result {
            Ok(()) => info!("Copied message to clipboard"),
            Err(e) => info!(error = %e, "Clipboard copy failed"),
        }
        self.overlay = Some(Overlay::CopyAck(result));
    }

    /// Largest useful `scroll_back` for the current viewport.
    pub fn max_scroll(&self) -> usize {
        let inner = transcript_inner(chat_layout(self.viewport).transcript);
        transcript(self, inner.width)
            .lines
            .len()
            .saturating_sub(usize::from(inner.height))
    }

    /// Set a temporary notification message.
    fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    /// Increment tick counter and update time-based state.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }
}
