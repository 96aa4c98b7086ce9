//! Single-line text input widget.
//!
//! The cursor is a byte offset that always sits on a char boundary, so
//! multi-byte input such as emoji from the picker edits cleanly.

use crate::text::visual_width;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Prompt prefix drawn before the input text.
const PROMPT: &str = "> ";

/// A single-line text input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    content: &'a str,
    cursor: usize,
    focused: bool,
    placeholder: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> TextInput<'a> {
    /// Create a new text input.
    pub fn new(content: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            content,
            cursor: cursor.min(content.len()),
            focused: true,
            placeholder: None,
            theme,
        }
    }

    /// Set focus state. Unfocused inputs draw no cursor.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let prompt = Span::styled(PROMPT, self.theme.title());

        if self.content.is_empty() {
            let mut spans = vec![prompt];
            if self.focused {
                spans.push(Span::styled("_", self.theme.text_style()));
            }
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, self.theme.dim()));
            }
            Paragraph::new(Line::from(spans))
                .style(self.theme.text_style())
                .render(area, buf);
            return;
        }

        let (before, after) = self.content.split_at(self.cursor);

        // Keep the cursor in view by dropping text from the left.
        let budget = (area.width as usize).saturating_sub(PROMPT.len() + 1);
        let mut visible_before = before;
        while visual_width(visible_before) > budget {
            let mut chars = visible_before.chars();
            chars.next();
            visible_before = chars.as_str();
        }

        let mut spans = vec![
            prompt,
            Span::styled(visible_before, self.theme.text_style()),
        ];
        if self.focused {
            let marker = if after.is_empty() { "_" } else { "|" };
            spans.push(Span::styled(marker, self.theme.title()));
        }
        spans.push(Span::styled(after, self.theme.text_style()));

        Paragraph::new(Line::from(spans))
            .style(self.theme.text_style())
            .render(area, buf);
    }
}

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (byte offset on a char boundary).
    cursor: usize,
    /// Submitted inputs, oldest first.
    history: Vec<String>,
    /// Position in history while navigating (0 = most recent).
    history_index: Option<usize>,
    /// Input being edited before history navigation started.
    saved_input: String,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        self.content.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Append a string at the end, moving the cursor there.
    pub fn append(&mut self, s: &str) {
        self.content.push_str(s);
        self.cursor = self.content.len();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.content.replace_range(self.cursor..next, "");
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }

    /// Take the content, recording it in history and clearing the input.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Navigate to previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let next_index = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };

        self.history_index = Some(next_index);
        self.content = self.history[self.history.len() - 1 - next_index].clone();
        self.cursor = self.content.len();
    }

    /// Navigate to next history entry, restoring the saved input past the end.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.content = std::mem::take(&mut self.saved_input);
                self.cursor = self.content.len();
                self.history_index = None;
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                self.content = self.history[self.history.len() - i].clone();
                self.cursor = self.content.len();
            }
        }
    }

    /// Create a widget from this state.
    pub fn widget<'a>(&'a self, theme: &'a Theme) -> TextInput<'a> {
        TextInput::new(&self.content, self.cursor, theme)
    }
}
