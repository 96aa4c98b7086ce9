//! jnana-tui: Terminal UI for the jnana chat client
//!
//! This crate provides the interactive front end, including:
//! - The chat screen with a starfield header and scrolling transcript
//! - Emoji picker, image viewer, clipboard and help overlays
//! - Light/dark themes
//! - Headless mode for testing and automation

mod app;
mod clipboard;
mod effects;
mod emoji;
mod event;
pub mod headless;
mod screens;
mod starfield;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod ui;

pub use app::{App, Effect, Overlay};
pub use clipboard::{ClipboardProvider, MemoryClipboard, SystemClipboard};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use jnana_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use effects::EffectRunner;
use jnana_engine::{ChatClient, Config};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit (including on error).
pub async fn run_tui(
    config: &Config,
    client: Arc<dyn ChatClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let mut runner = EffectRunner::new(client, Box::new(SystemClipboard::new()));
    let mut events = EventHandler::new(config.tick_rate_ms);

    info!("TUI started");
    let result = run_loop(&mut terminal, &mut app, &mut runner, &mut events).await;
    runner.shutdown();

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runner: &mut EffectRunner,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::render_app(app, area, frame.buffer_mut());
        })?;

        if let Some(event) = events.next().await {
            let action = match event {
                Event::Key(key) => key_to_action(key),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => Action::ScrollUp,
                    MouseEventKind::ScrollDown => Action::ScrollDown,
                    _ => Action::None,
                },
                Event::Tick => {
                    app.tick();
                    Action::None
                }
                Event::Resize(width, height) => {
                    app.resize(width, height);
                    Action::None
                }
            };
            let effect = app.handle_action(action);
            runner.perform(app, effect);
        }

        runner.poll_chat(app).await;

        if app.should_quit {
            info!("TUI exiting");
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
