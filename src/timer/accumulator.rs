//! Timer - drift-compensated elapsed time with play/pause.
//!
//! While running, every tick reads the clock and adds the real time since the
//! previous sample to the total. A tick delivered late therefore adds more,
//! and the total keeps tracking wall-clock time however irregular delivery is.
//!
//! Pausing copies the formatted total to the clipboard and stops ticking.
//! Time between the last tick and the pause is not added.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::format::format_duration;
use crate::state::clipboard::Clipboard;
use crate::types::TimerStatus;

use super::clock::Clock;
use super::event_loop::Scheduler;
use super::interval::Interval;

/// Default tick cadence.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(1000);

/// Collaborators a timer reaches the outside world through.
#[derive(Clone)]
pub struct TimerEnv {
    pub scheduler: Rc<dyn Scheduler>,
    pub clock: Rc<dyn Clock>,
    pub clipboard: Rc<dyn Clipboard>,
}

impl TimerEnv {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        clock: Rc<dyn Clock>,
        clipboard: Rc<dyn Clipboard>,
    ) -> Self {
        Self {
            scheduler,
            clock,
            clipboard,
        }
    }
}

impl fmt::Debug for TimerEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEnv").finish_non_exhaustive()
    }
}

/// Snapshot of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimerState {
    pub status: TimerStatus,
    pub elapsed_seconds: f64,
}

/// Accumulates elapsed seconds between `play` and `pause`.
pub struct Timer {
    env: TimerEnv,
    cadence: Duration,
    interval: Interval,
    accumulated: Rc<Cell<f64>>,
    last_sample: Rc<Cell<Duration>>,
}

impl Timer {
    /// A stopped timer holding `initial_seconds`.
    pub fn new(initial_seconds: f64, cadence: Duration, env: TimerEnv) -> Self {
        let interval = Interval::new(env.scheduler.clone());
        Self {
            env,
            cadence,
            interval,
            accumulated: Rc::new(Cell::new(initial_seconds.max(0.0))),
            last_sample: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Start ticking, calling `on_tick` with the new total after each tick.
    ///
    /// Returns false without doing anything when already running.
    pub fn play<F>(&mut self, on_tick: F) -> bool
    where
        F: Fn(f64) + 'static,
    {
        if self.interval.is_active() {
            return false;
        }

        let clock = self.env.clock.clone();
        let accumulated = self.accumulated.clone();
        let last_sample = self.last_sample.clone();
        let tick = Rc::new(move || {
            let now = clock.now();
            // A clock stepping backwards contributes nothing.
            let delta = now.saturating_sub(last_sample.get());
            let total = accumulated.get() + delta.as_secs_f64();
            accumulated.set(total);
            last_sample.set(now);
            on_tick(total);
        });

        self.last_sample.set(self.env.clock.now());
        self.interval.start(tick, self.cadence);
        tracing::debug!(
            elapsed = self.accumulated.get(),
            cadence_ms = self.cadence.as_millis() as u64,
            "timer started"
        );
        true
    }

    /// Stop ticking and copy the formatted total to the clipboard.
    ///
    /// Safe to call while stopped. The clipboard write is fire-and-forget.
    pub fn pause(&mut self) {
        let formatted = format_duration(self.accumulated.get(), true);
        if let Err(err) = self.env.clipboard.write_text(&formatted) {
            tracing::debug!(error = %err, "clipboard write failed");
        }
        self.interval.stop();
        tracing::debug!(elapsed = self.accumulated.get(), "timer paused");
    }

    pub fn status(&self) -> TimerStatus {
        if self.interval.is_active() {
            TimerStatus::Running
        } else {
            TimerStatus::Idle
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.accumulated.get()
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            status: self.status(),
            elapsed_seconds: self.elapsed_seconds(),
        }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("status", &self.status())
            .field("elapsed_seconds", &self.elapsed_seconds())
            .field("cadence", &self.cadence)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
