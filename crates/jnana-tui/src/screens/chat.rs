//! The chat screen: starfield header, transcript, input box, status bar.

use super::Screen;
use crate::app::App;
use crate::text::{truncate_to_width, wrap_text};
use crate::ui::chat_layout;
use crate::ui::widgets::{KeyHint, StatusBar};
use jnana_engine::Role;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Indent for message bodies.
const INDENT: &str = "  ";

/// Label shown before image links.
const IMAGE_LABEL: &str = "[image] ";

/// The main (and only) screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let layout = chat_layout(area);

        Block::default()
            .style(app.theme.text_style())
            .render(area, buf);

        render_header(app, layout.header, buf);
        render_transcript(app, layout.transcript, buf);
        render_input(app, layout.input, buf);
        render_status(app, layout.status, buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!(" {} ", app.assistant_name))
        .title_style(app.theme.title())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false))
        .style(app.theme.text_style());
    let inner = block.inner(area);
    block.render(area, buf);

    app.starfield.widget(app.tick, &app.theme).render(inner, buf);
}

/// Transcript text area inside its border.
pub(crate) fn transcript_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Label shown before the selected message.
const SELECTED_MARKER: &str = "▶ ";

/// Transcript rendered for a given text width.
pub(crate) struct Transcript {
    /// All lines, oldest first, including the typing indicator while pending.
    pub lines: Vec<Line<'static>>,
    /// Index of each message's first line.
    pub starts: Vec<usize>,
}

/// Lay out the whole transcript for a text width.
pub(crate) fn transcript(app: &App, width: u16) -> Transcript {
    let theme = &app.theme;
    let body_width = usize::from(width).saturating_sub(INDENT.len()).max(1);
    let mut lines = Vec::new();
    let mut starts = Vec::with_capacity(app.conversation.len());

    for (index, msg) in app.conversation.messages().iter().enumerate() {
        starts.push(lines.len());

        let (label, label_style) = match msg.role {
            Role::User => ("You".to_string(), theme.user_label()),
            Role::Assistant => (app.assistant_name.clone(), theme.assistant_label()),
        };
        let mut header = Vec::with_capacity(3);
        if app.selected == Some(index) {
            header.push(Span::styled(SELECTED_MARKER, theme.selected()));
        }
        header.push(Span::styled(label, label_style));
        header.push(Span::styled(format!("  {}", msg.timestamp), theme.dim()));
        lines.push(Line::from(header));

        let body_style = if msg.is_error() {
            theme.error_text()
        } else {
            theme.text_style()
        };
        for line in wrap_text(&msg.content, body_width) {
            lines.push(Line::from(Span::styled(format!("{INDENT}{line}"), body_style)));
        }

        if let Some(url) = msg.image_url() {
            let room = body_width.saturating_sub(IMAGE_LABEL.len());
            lines.push(Line::from(vec![
                Span::styled(format!("{INDENT}{IMAGE_LABEL}"), theme.dim()),
                Span::styled(truncate_to_width(url, room), theme.link()),
            ]));
        }

        lines.push(Line::from(""));
    }

    if app.is_pending() {
        let dots = ".".repeat(app.tick % 3 + 1);
        lines.push(Line::from(Span::styled(
            format!("{INDENT}{} is typing{dots}", app.assistant_name),
            Style::default()
                .fg(theme.info)
                .bg(theme.base)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    Transcript { lines, starts }
}

fn render_transcript(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Conversation ")
        .title_style(app.theme.title())
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .style(app.theme.text_style());
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = transcript(app, inner.width).lines;
    let height = usize::from(inner.height);
    let max_scroll = lines.len().saturating_sub(height);
    let offset = app.scroll_back.min(max_scroll);
    let start = lines.len().saturating_sub(height + offset);

    let visible: Vec<Line<'_>> = lines.into_iter().skip(start).take(height).collect();
    Paragraph::new(visible)
        .style(app.theme.text_style())
        .render(inner, buf);
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let pending = app.is_pending();
    let block = Block::default()
        .title(" Message ")
        .title_style(app.theme.title())
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(!pending))
        .style(app.theme.text_style());
    let inner = block.inner(area);
    block.render(area, buf);

    if pending {
        Paragraph::new(Line::from(vec![
            Span::styled("> ", app.theme.dim()),
            Span::styled("Sending...", app.theme.dim()),
        ]))
        .render(inner, buf);
    } else {
        app.input
            .widget(&app.theme)
            .focused(app.overlay.is_none())
            .placeholder("Type your message...")
            .render(inner, buf);
    }
}

fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let mode = if app.is_pending() { "Sending" } else { "Chat" };
    let count = match (app.selected, app.conversation.len()) {
        (Some(index), total) => format!("message {} of {total}", index + 1),
        (None, 1) => "1 message".to_string(),
        (None, total) => format!("{total} messages"),
    };
    let right = app.notification.as_deref().unwrap_or(&count);

    StatusBar::new(mode, &app.theme)
        .hints(vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("^E", "Emoji"),
            KeyHint::new("^L", "Clear"),
            KeyHint::new("F1", "Help"),
        ])
        .right(right)
        .render(area, buf);

    // Scroll position marker when not following.
    if app.scroll_back > 0 && area.width > 0 {
        buf.set_string(area.x, area.y, "↑", Style::default().fg(app.theme.warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, render_app_to_string};
    use jnana_engine::{ChatError, GREETING_IMAGE, WELCOME_GREETING};

    #[test]
    fn test_chat_screen_shows_greeting() {
        let app = create_test_app();
        let out = render_app_to_string(&app, 100, 24);

        assert!(out.contains("VIGNAN JnanaMitra"));
        assert!(out.contains("Hello! I’m VIGNAN JnanaMitra"));
        assert!(out.contains("[image]"));
        assert!(out.contains("Type your message..."));
        assert!(out.contains("1 message"));
        assert!(!out.contains("1 messages"));
    }

    #[test]
    fn test_transcript_lines_for_greeting() {
        let app = create_test_app();
        let view = transcript(&app, 200);
        let lines = view.lines;
        // header, body, image, blank
        assert_eq!(lines.len(), 4);
        assert_eq!(view.starts, vec![0]);
        let body: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(body, format!("{INDENT}{WELCOME_GREETING}"));
        let image: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(image, format!("{INDENT}{IMAGE_LABEL}{GREETING_IMAGE}"));
    }

    #[test]
    fn test_pending_shows_typing_and_sending() {
        let mut app = create_test_app();
        app.conversation.submit_user_text("Hello");
        let out = render_app_to_string(&app, 80, 24);

        assert!(out.contains("is typing"));
        assert!(out.contains("Sending..."));
        assert!(!out.contains("Type your message..."));
    }

    #[test]
    fn test_error_message_rendered() {
        let mut app = create_test_app();
        app.conversation.submit_user_text("Hello");
        app.on_chat_result(Err(ChatError::RequestFailed("Network Error".into())));
        let out = render_app_to_string(&app, 80, 24);

        assert!(out.contains("You"));
        assert!(out.contains("Error: Network Error"));
        assert!(!out.contains("is typing"));
    }

    #[test]
    fn test_transcript_follows_bottom() {
        let mut app = create_test_app();
        for i in 0..8 {
            app.conversation.submit_user_text(&format!("question {i}"));
            app.on_chat_result(Ok(format!("answer {i}")));
        }
        let out = render_app_to_string(&app, 80, 24);
        assert!(out.contains("answer 7"));
        assert!(!out.contains("answer 0"));
    }

    #[test]
    fn test_scrolled_back_shows_older_messages() {
        let mut app = create_test_app();
        for i in 0..8 {
            app.conversation.submit_user_text(&format!("question {i}"));
            app.on_chat_result(Ok(format!("answer {i}")));
        }
        app.scroll_back = usize::MAX;
        let out = render_app_to_string(&app, 80, 24);
        assert!(out.contains("Hello! I’m"));
        assert!(!out.contains("answer 7"));
    }

    #[test]
    fn test_long_message_wraps() {
        let mut app = create_test_app();
        app.conversation.submit_user_text(&"word ".repeat(40));
        let lines = transcript(&app, 40).lines;
        let user_body = lines
            .iter()
            .filter(|l| l.spans.iter().any(|s| s.content.contains("word")))
            .count();
        assert!(user_body > 1);
    }

    #[test]
    fn test_message_starts_track_each_header() {
        let mut app = create_test_app();
        app.conversation.submit_user_text("Tell me about France");
        app.on_chat_result(Ok("Paris".into()));
        let view = transcript(&app, 200);

        // greeting: header, body, image, blank; user: header, body, blank
        assert_eq!(view.starts, vec![0, 4, 7]);
        let header: String = view.lines[7].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(header.starts_with("VIGNAN JnanaMitra"));
    }

    #[test]
    fn test_selected_message_is_marked() {
        let mut app = create_test_app();
        app.conversation.submit_user_text("Hello");
        app.on_chat_result(Ok("Hi".into()));
        app.selected = Some(1);
        let view = transcript(&app, 200);

        let header: String = view.lines[view.starts[1]]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(header.starts_with("▶ You"));
        let others = view
            .lines
            .iter()
            .filter(|l| l.spans.iter().any(|s| s.content == SELECTED_MARKER))
            .count();
        assert_eq!(others, 1);

        let out = render_app_to_string(&app, 80, 24);
        assert!(out.contains("message 2 of 3"));
    }

    #[test]
    fn test_status_counts_plural() {
        let mut app = create_test_app();
        app.conversation.submit_user_text("Hello");
        let out = render_app_to_string(&app, 80, 24);
        assert!(out.contains("2 messages"));
    }
}
