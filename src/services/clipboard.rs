use clipboard::{ClipboardContext, ClipboardProvider};
use thiserror::Error;

/// Errors that can occur while writing to the clipboard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Capability to put text on a clipboard.
///
/// The copy action only depends on this trait, so tests can substitute a
/// recording or failing implementation for the system clipboard.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The host system clipboard.
///
/// A fresh clipboard context is opened for every write, which keeps this type
/// `Send + Sync` on every platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut ctx: ClipboardContext =
            ClipboardProvider::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        ctx.set_contents(text.to_owned())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}
