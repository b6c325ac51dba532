//! Clipboard Module - where a paused duration gets copied.
//!
//! The widget only ever writes. [`Clipboard`] is the narrow interface it
//! writes through:
//!
//! - [`SystemClipboard`] - the host's clipboard, through `cli-clipboard`
//! - [`BufferClipboard`] - a process-local buffer, for tests and headless runs
//!
//! # Example
//!
//! ```
//! use spark_stopwatch::state::clipboard::{BufferClipboard, Clipboard};
//!
//! let clipboard = BufferClipboard::new();
//! clipboard.write_text("00:01:30").unwrap();
//! assert_eq!(clipboard.paste(), Some("00:01:30".to_string()));
//! ```

use std::cell::RefCell;
use std::fmt;

use crate::error::{Error, Result};

// =============================================================================
// Interface
// =============================================================================

/// A text sink for copy operations.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> Result<()>;
}

// =============================================================================
// System Clipboard
// =============================================================================

/// The host clipboard. Fails when no clipboard provider is reachable
/// (no display server, no pasteboard).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        cli_clipboard::set_contents(text.to_string()).map_err(rejected)
    }
}

fn rejected(err: impl fmt::Display) -> Error {
    Error::Clipboard(err.to_string())
}

// =============================================================================
// Internal Buffer
// =============================================================================

/// Clipboard backed by a process-local buffer.
#[derive(Debug, Default)]
pub struct BufferClipboard {
    buffer: RefCell<Option<String>>,
}

impl BufferClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written text, or None if nothing was written.
    pub fn paste(&self) -> Option<String> {
        self.buffer.borrow().clone()
    }
}

impl Clipboard for BufferClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        *self.buffer.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
