//! Interval - at most one active periodic callback.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::event_loop::{IntervalId, Scheduler, TickFn};

/// Owns zero or one registration on a [`Scheduler`].
///
/// Starting while active does nothing. Stopping while stopped does nothing.
/// Dropping an active interval cancels it.
pub struct Interval {
    scheduler: Rc<dyn Scheduler>,
    active: Option<IntervalId>,
}

impl Interval {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            active: None,
        }
    }

    /// Start `callback` every `period`. Returns false if already running.
    pub fn start(&mut self, callback: TickFn, period: Duration) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(self.scheduler.set_interval(period, callback));
        true
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.active.take() {
            self.scheduler.clear_interval(id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn id(&self) -> Option<IntervalId> {
        self.active
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interval").field("active", &self.active).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::ManualClock;
    use crate::timer::event_loop::EventLoop;

    fn setup() -> Rc<EventLoop> {
        Rc::new(EventLoop::new(Rc::new(ManualClock::new())))
    }

    #[test]
    fn test_start_is_idempotent() {
        let event_loop = setup();
        let mut interval = Interval::new(event_loop.clone());

        assert!(interval.start(Rc::new(|| {}), Duration::from_secs(1)));
        assert!(!interval.start(Rc::new(|| {}), Duration::from_secs(1)));
        assert_eq!(event_loop.active_intervals(), 1);
    }

    #[test]
    fn test_stop_tolerates_stopped() {
        let event_loop = setup();
        let mut interval = Interval::new(event_loop.clone());

        interval.stop();
        interval.start(Rc::new(|| {}), Duration::from_secs(1));
        interval.stop();
        interval.stop();

        assert!(!interval.is_active());
        assert_eq!(event_loop.active_intervals(), 0);
    }

    #[test]
    fn test_restart_after_stop() {
        let event_loop = setup();
        let mut interval = Interval::new(event_loop.clone());

        interval.start(Rc::new(|| {}), Duration::from_secs(1));
        let first = interval.id();
        interval.stop();
        assert!(interval.start(Rc::new(|| {}), Duration::from_secs(1)));
        assert_ne!(interval.id(), first);
        assert_eq!(event_loop.active_intervals(), 1);
    }

    #[test]
    fn test_drop_cancels() {
        let event_loop = setup();
        {
            let mut interval = Interval::new(event_loop.clone());
            interval.start(Rc::new(|| {}), Duration::from_secs(1));
            assert_eq!(event_loop.active_intervals(), 1);
        }
        assert_eq!(event_loop.active_intervals(), 0);
    }
}
