//! Widgets - rendered from templates, driven by timers.
//!
//! - [`Stopwatch`] - start/stop and reset buttons over a [`crate::timer::Timer`]

mod style;
mod stopwatch;

pub use style::button_style;
pub use stopwatch::{render_template, Stopwatch, RESET, START_STOP};
