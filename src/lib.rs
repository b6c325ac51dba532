//! # spark-stopwatch
//!
//! A stopwatch widget rendered from an HTML-like template.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! reactive bits (render generation, display mirror).
//!
//! ## Architecture
//!
//! Templates carry inline handlers (`onClick={startStop}`). The compiler
//! rewrites each one to a binding id and records `(id, event) → handler` in a
//! table. One delegated listener per event kind sits on the root and routes
//! events back to named handlers.
//!
//! ```text
//! DisplayState → template → Compiler → CompiledTemplate → bind → MountPoint
//!      ↑                                                            │
//!      └────── Timer ticks / click handlers ◄── delegated events ◄──┘
//! ```
//!
//! ## Modules
//!
//! - [`format`] - seconds to `HH:MM:SS`
//! - [`dom`] - in-memory element tree with bubbling events
//! - [`template`] - template compiler and event delegation
//! - [`timer`] - clocks, event loop, drift-compensated timer
//! - [`state`] - display state and clipboard
//! - [`widget`] - the stopwatch itself
//! - [`pipeline`] - mount point and terminal host
//! - [`config`], [`logging`], [`error`] - ambient plumbing

pub mod config;
pub mod dom;
pub mod error;
pub mod format;
pub mod logging;
pub mod pipeline;
pub mod state;
pub mod template;
pub mod timer;
pub mod types;
pub mod widget;

// Re-export commonly used items
pub use types::*;

pub use config::{StopwatchConfig, StyleConfig, TimerConfig};
pub use error::{Error, Result};
pub use format::{format_duration, ZERO_DURATION};

pub use dom::{Element, Event, Node};

pub use template::{bind, CompiledTemplate, Compiler, HandlerSet, HandlerTable, BINDING_ATTRIBUTE};

pub use timer::{
    Clock, EventLoop, Interval, IntervalId, ManualClock, Scheduler, SystemClock, Timer, TimerEnv,
    TimerState,
};

pub use state::{BufferClipboard, Clipboard, DisplayPatch, DisplayState, SystemClipboard};

pub use pipeline::{HostAction, MountPoint, TerminalHost};

pub use widget::{render_template, Stopwatch};
