//! Catppuccin color palettes for the TUI.
//!
//! Latte is the light theme (default), Mocha the dark one. Widgets take a
//! `&Theme` and build their styles from the helpers below, so toggling the
//! theme restyles everything on the next frame.

use jnana_engine::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Theme color palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Speakers
    pub user: Color,
    pub assistant: Color,

    // Decoration
    pub star: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::latte()
    }
}

impl Theme {
    /// Theme for the given mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::latte(),
            ThemeMode::Dark => Self::mocha(),
        }
    }

    /// Catppuccin Mocha theme (dark).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            success: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
            warning: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            error: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
            info: Color::Rgb(137, 180, 250),    // #89b4fa (blue)

            user: Color::Rgb(250, 179, 135),      // #fab387 (peach)
            assistant: Color::Rgb(137, 180, 250), // #89b4fa (blue)

            star: Color::Rgb(249, 226, 175), // #f9e2af

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Catppuccin Latte theme (light).
    pub fn latte() -> Self {
        Self {
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(230, 233, 239), // #e6e9ef

            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            primary: Color::Rgb(114, 135, 253),  // #7287fd (lavender)
            secondary: Color::Rgb(23, 146, 153), // #179299 (teal)

            success: Color::Rgb(64, 160, 43), // #40a02b (green)
            warning: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
            error: Color::Rgb(210, 15, 57),   // #d20f39 (red)
            info: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)

            user: Color::Rgb(254, 100, 11),     // #fe640b (peach)
            assistant: Color::Rgb(30, 102, 245), // #1e66f5 (blue)

            star: Color::Rgb(114, 135, 253), // #7287fd

            border: Color::Rgb(188, 192, 204),         // #bcc0cc
            border_focused: Color::Rgb(114, 135, 253), // #7287fd (lavender)
        }
    }

    /// Default text style.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.base)
    }

    /// Dimmed text for secondary information.
    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted).bg(self.base)
    }

    /// Title style.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Speaker label for user messages.
    pub fn user_label(&self) -> Style {
        Style::default()
            .fg(self.user)
            .bg(self.base)
            .add_modifier(Modifier::BOLD)
    }

    /// Speaker label for assistant messages.
    pub fn assistant_label(&self) -> Style {
        Style::default()
            .fg(self.assistant)
            .bg(self.base)
            .add_modifier(Modifier::BOLD)
    }

    /// Error text.
    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error).bg(self.base)
    }

    /// Link-like text (image URLs).
    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .bg(self.base)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Key hint style (for status bar).
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.base)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style.
    pub fn key_label(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Status bar background style.
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.subtext).bg(self.surface)
    }

    /// Border style, highlighted when focused.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Selected item in a picker.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.base)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}
