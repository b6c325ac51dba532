//! Pipeline - getting a rendered tree in front of someone.
//!
//! ```text
//! widget render → MountPoint::mount → generation signal → host effect (draw)
//!                                                              │
//!                      keys → HostAction → Element::dispatch ◄─┘
//! ```
//!
//! - [`MountPoint`] - the container a widget renders into
//! - [`TerminalHost`] - draws the mounted tree with crossterm and feeds keys back

pub mod mount;
pub mod terminal;

pub use mount::MountPoint;
pub use terminal::{controls, map_key, modifiers_from, render_line, HostAction, TerminalHost};
