//! State Module - runtime state the widget owns or writes to.
//!
//! - **Display** - the status and formatted duration currently rendered
//! - **Clipboard** - where a paused duration is copied

pub mod clipboard;
mod display;

pub use clipboard::{BufferClipboard, Clipboard, SystemClipboard};
pub use display::{DisplayPatch, DisplayState};
