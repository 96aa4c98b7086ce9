//! Emoji picker state.
//!
//! A fixed grid of single-codepoint emoji. Selecting one emits exactly one
//! `char`, which the app appends to the input buffer.

/// Emoji offered by the picker.
pub const EMOJI: [char; 24] = [
    '😊', '😂', '😍', '🤔', '😎', '😢', '😮', '😴', //
    '👍', '👏', '🙏', '👋', '💪', '🎉', '🔥', '✨', //
    '💡', '📚', '🌍', '🗼', '🥐', '🧀', '🍷', '🚀',
];

/// Number of columns in the picker grid.
pub const COLUMNS: usize = 8;

/// Picker selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmojiPicker {
    selected: usize,
}

impl EmojiPicker {
    /// Create a picker with the first emoji selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected emoji.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected emoji.
    pub fn selected(&self) -> char {
        EMOJI[self.selected]
    }

    /// Move selection left, wrapping to the previous row.
    pub fn left(&mut self) {
        self.selected = (self.selected + EMOJI.len() - 1) % EMOJI.len();
    }

    /// Move selection right, wrapping to the next row.
    pub fn right(&mut self) {
        self.selected = (self.selected + 1) % EMOJI.len();
    }

    /// Move selection up one row; stays put on the first row.
    pub fn up(&mut self) {
        if self.selected >= COLUMNS {
            self.selected -= COLUMNS;
        }
    }

    /// Move selection down one row; stays put on the last row.
    pub fn down(&mut self) {
        if self.selected + COLUMNS < EMOJI.len() {
            self.selected += COLUMNS;
        }
    }

    /// Number of rows in the grid.
    pub fn rows() -> usize {
        EMOJI.len().div_ceil(COLUMNS)
    }
}
