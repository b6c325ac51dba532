//! Event Loop - single-threaded periodic callbacks.
//!
//! The loop never sleeps on its own. Hosts ask [`EventLoop::time_until_next`]
//! how long they may wait for input, then call [`EventLoop::run_due`].
//!
//! # Late delivery
//!
//! An interval whose deadline has passed fires once per `run_due`, however
//! late it is, and its next deadline is measured from that delivery. A tick
//! scheduled at 1s but delivered at 1.4s therefore happens once, and the
//! following one is due at 2.4s. Consumers must measure elapsed time from the
//! clock rather than count ticks.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use super::clock::Clock;

/// Shortest period an interval may have.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies a registered interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalId(u64);

/// Callback fired on every interval tick.
pub type TickFn = Rc<dyn Fn()>;

/// Something that can run a callback periodically.
pub trait Scheduler {
    /// Register `callback` to run every `period`, first after one period.
    fn set_interval(&self, period: Duration, callback: TickFn) -> IntervalId;

    /// Cancel an interval. Unknown or already-cleared ids are ignored.
    fn clear_interval(&self, id: IntervalId);
}

struct IntervalEntry {
    period: Duration,
    next_due: Duration,
    callback: TickFn,
}

/// Cooperative scheduler driven by an injectable [`Clock`].
pub struct EventLoop {
    clock: Rc<dyn Clock>,
    intervals: RefCell<BTreeMap<IntervalId, IntervalEntry>>,
    next_id: Cell<u64>,
}

impl EventLoop {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            intervals: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn clock(&self) -> Rc<dyn Clock> {
        self.clock.clone()
    }

    /// Fire every interval whose deadline has passed, each at most once.
    ///
    /// Callbacks run with no internal borrow held and may register or clear
    /// intervals. An interval cleared by an earlier callback in the same pass
    /// does not fire. Returns how many callbacks ran.
    pub fn run_due(&self) -> usize {
        let now = self.clock.now();
        let due: Vec<(IntervalId, TickFn)> = {
            let mut intervals = self.intervals.borrow_mut();
            intervals
                .iter_mut()
                .filter(|(_, entry)| entry.next_due <= now)
                .map(|(id, entry)| {
                    entry.next_due = now + entry.period;
                    (*id, entry.callback.clone())
                })
                .collect()
        };

        let mut fired = 0;
        for (id, callback) in due {
            if self.is_active(id) {
                callback();
                fired += 1;
            }
        }
        fired
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.intervals.borrow().values().map(|entry| entry.next_due).min()
    }

    /// How long until the earliest deadline (zero when already due).
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    pub fn active_intervals(&self) -> usize {
        self.intervals.borrow().len()
    }

    pub fn is_active(&self, id: IntervalId) -> bool {
        self.intervals.borrow().contains_key(&id)
    }
}

impl Scheduler for EventLoop {
    fn set_interval(&self, period: Duration, callback: TickFn) -> IntervalId {
        let period = period.max(MIN_PERIOD);
        let id = IntervalId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let next_due = self.clock.now() + period;
        self.intervals.borrow_mut().insert(
            id,
            IntervalEntry {
                period,
                next_due,
                callback,
            },
        );
        tracing::trace!(?id, ?period, "interval registered");
        id
    }

    fn clear_interval(&self, id: IntervalId) {
        if self.intervals.borrow_mut().remove(&id).is_some() {
            tracing::trace!(?id, "interval cleared");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::ManualClock;

    fn setup() -> (Rc<ManualClock>, Rc<EventLoop>) {
        let clock = Rc::new(ManualClock::new());
        let event_loop = Rc::new(EventLoop::new(clock.clone()));
        (clock, event_loop)
    }

    fn counting(count: &Rc<Cell<u32>>) -> TickFn {
        let count = count.clone();
        Rc::new(move || count.set(count.get() + 1))
    }

    #[test]
    fn test_fires_after_each_period() {
        let (clock, event_loop) = setup();
        let count = Rc::new(Cell::new(0));
        event_loop.set_interval(Duration::from_secs(1), counting(&count));

        assert_eq!(event_loop.run_due(), 0);
        clock.advance(Duration::from_millis(999));
        assert_eq!(event_loop.run_due(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(event_loop.run_due(), 1);
        clock.advance(Duration::from_secs(1));
        assert_eq!(event_loop.run_due(), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_late_delivery_fires_once() {
        let (clock, event_loop) = setup();
        let count = Rc::new(Cell::new(0));
        event_loop.set_interval(Duration::from_secs(1), counting(&count));

        clock.advance(Duration::from_millis(3500));
        assert_eq!(event_loop.run_due(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(event_loop.next_deadline(), Some(Duration::from_millis(4500)));
        assert_eq!(event_loop.time_until_next(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_clear_interval() {
        let (clock, event_loop) = setup();
        let count = Rc::new(Cell::new(0));
        let id = event_loop.set_interval(Duration::from_secs(1), counting(&count));
        assert!(event_loop.is_active(id));

        event_loop.clear_interval(id);
        event_loop.clear_interval(id);
        clock.advance(Duration::from_secs(5));

        assert_eq!(event_loop.run_due(), 0);
        assert_eq!(event_loop.active_intervals(), 0);
        assert_eq!(event_loop.next_deadline(), None);
    }

    #[test]
    fn test_callback_may_clear_other_interval() {
        let (clock, event_loop) = setup();
        let count = Rc::new(Cell::new(0));

        let victim: Rc<Cell<Option<IntervalId>>> = Rc::new(Cell::new(None));
        let victim_clone = victim.clone();
        let loop_clone = event_loop.clone();
        event_loop.set_interval(
            Duration::from_secs(1),
            Rc::new(move || {
                if let Some(id) = victim_clone.get() {
                    loop_clone.clear_interval(id);
                }
            }),
        );
        victim.set(Some(event_loop.set_interval(Duration::from_secs(1), counting(&count))));

        clock.advance(Duration::from_secs(1));
        assert_eq!(event_loop.run_due(), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(event_loop.active_intervals(), 1);
    }

    #[test]
    fn test_callback_may_register_interval() {
        let (clock, event_loop) = setup();
        let loop_clone = event_loop.clone();
        event_loop.set_interval(
            Duration::from_secs(1),
            Rc::new(move || {
                loop_clone.set_interval(Duration::from_secs(1), Rc::new(|| {}));
            }),
        );

        clock.advance(Duration::from_secs(1));
        assert_eq!(event_loop.run_due(), 1);
        assert_eq!(event_loop.active_intervals(), 2);
    }

    #[test]
    fn test_zero_period_clamped() {
        let (clock, event_loop) = setup();
        let count = Rc::new(Cell::new(0));
        event_loop.set_interval(Duration::ZERO, counting(&count));

        assert_eq!(event_loop.run_due(), 0);
        clock.advance(MIN_PERIOD);
        assert_eq!(event_loop.run_due(), 1);
    }
}
