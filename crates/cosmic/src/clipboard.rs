//! Copying text to the clipboard, with a terminal escape-sequence fallback.

use std::io::Write;

use crossterm::ExecutableCommand;
use crossterm::clipboard::CopyToClipboard;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a clipboard backend.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display
    /// server, permission denied).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard was opened but refused the text.
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// A place text can be copied to.
pub trait ClipboardBackend {
    fn name(&self) -> &'static str;

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard via `arboard`.
///
/// The handle is kept open after the first copy; on Linux the copied text
/// only survives while its owner is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };
        self.clipboard
            .insert(clipboard)
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Asks the terminal emulator to set its clipboard with an OSC 52 escape.
///
/// The terminal gives no acknowledgement, so a successful write only means
/// the sequence left the process.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out
            .execute(CopyToClipboard::to_clipboard_from(text))
            .map(|_| ())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Which path ended up handling a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    /// Both paths failed. The UI still confirms the copy.
    Failed,
}

/// Copy `text` with `primary`, falling back to `fallback` on any error.
pub fn copy_with_fallback(
    primary: &mut dyn ClipboardBackend,
    fallback: &mut dyn ClipboardBackend,
    text: &str,
) -> CopyOutcome {
    match primary.copy_text(text) {
        Ok(()) => {
            debug!(backend = primary.name(), "copied to clipboard");
            CopyOutcome::Primary
        }
        Err(err) => {
            debug!(backend = primary.name(), %err, "primary clipboard failed, falling back");
            match fallback.copy_text(text) {
                Ok(()) => CopyOutcome::Fallback,
                Err(err) => {
                    warn!(backend = fallback.name(), %err, "fallback clipboard failed");
                    CopyOutcome::Failed
                }
            }
        }
    }
}
