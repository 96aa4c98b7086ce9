//! System clipboard access.

use tracing::warn;

/// Something that can receive copied text.
pub trait ClipboardProvider: Send {
    /// Copy `text`, returning a human-readable reason on failure.
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// The system clipboard, backed by `arboard`.
///
/// The handle is kept alive for the whole session; on Wayland the copied
/// contents vanish when the owning handle is dropped.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Open the system clipboard. A missing clipboard is reported on first use.
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!(error = %e, "System clipboard unavailable");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| "clipboard unavailable".to_string())?;
        clipboard.set_text(text).map_err(|e| e.to_string())
    }
}

/// In-memory clipboard for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    /// Everything copied so far, oldest first.
    pub copied: Vec<String>,
    /// When set, every copy fails with this reason.
    pub fail_with: Option<String>,
}

impl ClipboardProvider for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone());
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}
