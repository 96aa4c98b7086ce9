//! Screen and overlay rendering for the jnana TUI.

pub mod chat;

use crate::app::{App, Overlay};
use crate::emoji::{EmojiPicker, COLUMNS, EMOJI};
use crate::text::wrap_text;
use crate::ui::centered_fixed;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the chat screen plus whichever overlay is open.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    chat::ChatScreen.render(app, area, buf);

    match &app.overlay {
        None => {}
        Some(Overlay::Help) => render_help_overlay(app, area, buf),
        Some(Overlay::EmojiPicker) => render_emoji_overlay(app, area, buf),
        Some(Overlay::ImageViewer(url)) => render_image_overlay(app, url, area, buf),
        Some(Overlay::CopyAck(result)) => render_copy_overlay(app, result, area, buf),
    }
}

fn overlay_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(app.theme.title())
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .style(app.theme.text_style())
}

/// Render the help overlay.
fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let help_text = r"
  Chat
    Enter             Send message
    Up/Down           Input history
    PageUp/PageDown   Scroll transcript
    Tab/Shift+Tab     Select older/newer message
    Ctrl+B            Jump to latest
    Ctrl+L            Clear chat

  Extras
    Ctrl+E            Emoji picker
    Ctrl+P            View image of selection
    Ctrl+Y            Copy selected message
    Ctrl+T            Toggle light/dark

    Esc / Ctrl+C      Quit

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 20.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);
    Paragraph::new(help_text)
        .block(overlay_block(app, " Help "))
        .style(app.theme.text_style())
        .render(overlay_area, buf);
}

#[allow(clippy::cast_possible_truncation)]
fn render_emoji_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    // Each emoji cell is " X " with X two columns wide.
    let width = (COLUMNS * 4 + 2) as u16;
    let height = (EmojiPicker::rows() + 4) as u16;
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);
    let block = overlay_block(app, " Emoji ");
    let inner = block.inner(overlay_area);
    block.render(overlay_area, buf);

    let mut lines: Vec<Line<'_>> = EMOJI
        .chunks(COLUMNS)
        .enumerate()
        .map(|(row, chunk)| {
            let spans: Vec<Span<'_>> = chunk
                .iter()
                .enumerate()
                .map(|(col, emoji)| {
                    let style = if row * COLUMNS + col == app.emoji.selected_index() {
                        app.theme.selected()
                    } else {
                        app.theme.text_style()
                    };
                    Span::styled(format!(" {emoji} "), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Arrows  Enter insert  Esc close",
        app.theme.dim(),
    )));

    Paragraph::new(lines).render(inner, buf);
}

#[allow(clippy::cast_possible_truncation)]
fn render_image_overlay(app: &App, url: &str, area: Rect, buf: &mut Buffer) {
    let width = area.width.saturating_sub(8).max(20).min(area.width);
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let url_lines = wrap_text(url, text_width);
    let height = (url_lines.len() + 6).min(usize::from(area.height)) as u16;
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let mut lines = vec![Line::from("")];
    lines.extend(
        url_lines
            .into_iter()
            .map(|l| Line::from(Span::styled(format!(" {l}"), app.theme.link()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Open the link in a browser to see the picture.",
        app.theme.dim(),
    )));
    lines.push(Line::from(Span::styled(
        " [Enter/Esc to close]",
        app.theme.dim(),
    )));

    Paragraph::new(lines)
        .block(overlay_block(app, " Image "))
        .render(overlay_area, buf);
}

fn render_copy_overlay(app: &App, result: &Result<(), String>, area: Rect, buf: &mut Buffer) {
    let (message, style) = match result {
        Ok(()) => (
            "Copied to clipboard!".to_string(),
            Style::default()
                .fg(app.theme.success)
                .add_modifier(Modifier::BOLD),
        ),
        Err(e) => (format!("Copy failed: {e}"), app.theme.error_text()),
    };

    let width = 44.min(area.width);
    let overlay_area = centered_fixed(width, 6, area);

    Clear.render(overlay_area, buf);
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, style)),
        Line::from(""),
        Line::from(Span::styled("[Press any key]", app.theme.dim())),
    ])
    .alignment(Alignment::Center)
    .block(overlay_block(app, " Clipboard "))
    .render(overlay_area, buf);
}
