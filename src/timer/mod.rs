//! Timer Core - clocks, periodic callbacks and elapsed-time accumulation.
//!
//! - [`Clock`] - wall-clock readings ([`SystemClock`], [`ManualClock`])
//! - [`EventLoop`] - single-threaded [`Scheduler`] for periodic callbacks
//! - [`Interval`] - idempotent start/stop of one callback
//! - [`Timer`] - Idle/Running state machine with drift-compensated totals

mod clock;
mod accumulator;
mod event_loop;
mod interval;

pub use clock::{Clock, ManualClock, SystemClock};
pub use accumulator::{Timer, TimerEnv, TimerState, DEFAULT_CADENCE};
pub use event_loop::{EventLoop, IntervalId, Scheduler, TickFn, MIN_PERIOD};
pub use interval::Interval;
