//! Stopwatch - the render loop tying template, timer and mount together.
//!
//! ```text
//! update_state(patch) → merge into DisplayState → compile template → bind → mount
//!        ↑                                                                   │
//!        └──── startStop / reset handlers ◄── click ◄── mounted tree ◄──────┘
//!        └──── Timer on-tick (formatted duration) ◄── event loop
//! ```
//!
//! Every state change re-renders the whole template. The widget is two
//! buttons, so there is nothing to gain from patching.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

use crate::config::StopwatchConfig;
use crate::dom::Event;
use crate::error::Result;
use crate::format::format_duration;
use crate::pipeline::MountPoint;
use crate::state::{DisplayPatch, DisplayState};
use crate::template::{bind, CompiledTemplate, Compiler, HandlerSet};
use crate::timer::{Timer, TimerEnv, TimerState};

use super::style::button_style;

/// Handler name toggling between running and idle.
pub const START_STOP: &str = "startStop";

/// Handler name zeroing the stopwatch.
pub const RESET: &str = "reset";

/// Markup for one render of `state`.
pub fn render_template(state: &DisplayState, config: &StopwatchConfig) -> String {
    let timer_style = button_style(&config.style, state.status.is_running());
    let control_style = button_style(&config.style, false);
    format!(
        r#"
      <div>
        <button id="timer" data-status="{status}" style="{timer_style}" onClick={{{START_STOP}}}>{duration}</button>
        <button id="reset" onClick={{{RESET}}} style="{control_style}">x</button>
      </div>
    "#,
        status = state.status,
        duration = state.duration,
    )
}

// =============================================================================
// Stopwatch
// =============================================================================

struct Inner {
    config: StopwatchConfig,
    env: TimerEnv,
    compiler: Compiler,
    mount: MountPoint,
    state: RefCell<DisplayState>,
    display: Signal<DisplayState>,
    timer: RefCell<Timer>,
    handlers: RefCell<HandlerSet>,
    compiled: RefCell<Option<CompiledTemplate>>,
}

/// A mounted stopwatch widget.
pub struct Stopwatch {
    inner: Rc<Inner>,
}

impl Stopwatch {
    /// Build the widget and render it once with `{ Idle, "00:00:00" }`.
    pub fn new(mount: MountPoint, env: TimerEnv, config: StopwatchConfig) -> Result<Self> {
        let timer = Timer::new(0.0, config.cadence(), env.clone());
        let state = DisplayState::default();
        let inner = Rc::new(Inner {
            config,
            env,
            compiler: Compiler::new(),
            mount,
            display: signal(state.clone()),
            state: RefCell::new(state),
            timer: RefCell::new(timer),
            handlers: RefCell::new(HandlerSet::new()),
            compiled: RefCell::new(None),
        });

        *inner.handlers.borrow_mut() = dom_handlers(Rc::downgrade(&inner));

        let initial = inner.state.borrow().clone();
        inner.render(&initial)?;
        Ok(Self { inner })
    }

    /// Merge `patch` into the display state and re-render.
    pub fn update_state(&self, patch: DisplayPatch) -> Result<()> {
        self.inner.update_state(patch)
    }

    /// What clicking the duration button does.
    pub fn start_stop(&self) -> Result<()> {
        self.inner.start_stop()
    }

    /// What clicking the reset button does.
    pub fn reset(&self) -> Result<()> {
        self.inner.reset()
    }

    pub fn display_state(&self) -> DisplayState {
        self.inner.state.borrow().clone()
    }

    /// Reactive mirror of the display state, updated after each render.
    pub fn display_signal(&self) -> Signal<DisplayState> {
        self.inner.display.clone()
    }

    pub fn timer_state(&self) -> TimerState {
        self.inner.timer.borrow().state()
    }

    /// The compiled template of the latest render.
    pub fn compiled(&self) -> Option<CompiledTemplate> {
        self.inner.compiled.borrow().clone()
    }

    pub fn mount_point(&self) -> &MountPoint {
        &self.inner.mount
    }

    pub fn handlers(&self) -> HandlerSet {
        self.inner.handlers.borrow().clone()
    }

    pub fn config(&self) -> &StopwatchConfig {
        &self.inner.config
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("state", &*self.inner.state.borrow())
            .field("timer", &*self.inner.timer.borrow())
            .finish()
    }
}

/// Handlers the template references. They hold the widget weakly so the
/// mounted tree never keeps it alive.
fn dom_handlers(weak: Weak<Inner>) -> HandlerSet {
    let on_start_stop = weak.clone();
    let on_reset = weak;
    HandlerSet::new()
        .with(START_STOP, move |_: &Event| {
            if let Some(inner) = on_start_stop.upgrade() {
                if let Err(err) = inner.start_stop() {
                    tracing::warn!(error = %err, "start/stop render failed");
                }
            }
        })
        .with(RESET, move |_: &Event| {
            if let Some(inner) = on_reset.upgrade() {
                if let Err(err) = inner.reset() {
                    tracing::warn!(error = %err, "reset render failed");
                }
            }
        })
}

impl Inner {
    fn update_state(&self, patch: DisplayPatch) -> Result<()> {
        self.state.borrow_mut().apply(patch);
        let snapshot = self.state.borrow().clone();
        self.render(&snapshot)?;
        self.display.set(snapshot);
        Ok(())
    }

    fn render(&self, state: &DisplayState) -> Result<()> {
        let template = render_template(state, &self.config);
        let compiled = self.compiler.compile(&template)?;
        let handlers = self.handlers.borrow().clone();
        bind(&compiled, &handlers);

        let root = compiled.root().clone();
        *self.compiled.borrow_mut() = Some(compiled);
        self.mount.mount(root);
        tracing::debug!(status = %state.status, duration = %state.duration, "rendered");
        Ok(())
    }

    fn start_stop(self: &Rc<Self>) -> Result<()> {
        let next = self.state.borrow().status.toggled();
        if next.is_running() {
            let weak = Rc::downgrade(self);
            self.timer.borrow_mut().play(move |seconds| {
                let Some(inner) = weak.upgrade() else { return };
                let patch = DisplayPatch::duration(format_duration(seconds, true));
                if let Err(err) = inner.update_state(patch) {
                    tracing::warn!(error = %err, "tick render failed");
                }
            });
        } else {
            self.timer.borrow_mut().pause();
        }
        self.update_state(DisplayPatch::status(next))
    }

    fn reset(&self) -> Result<()> {
        self.timer.borrow_mut().pause();
        let fresh = Timer::new(0.0, self.config.cadence(), self.env.clone());
        // The old timer is already stopped; dropping it releases its interval.
        drop(self.timer.replace(fresh));
        self.update_state(DisplayPatch::reset())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::dom::Element;
    use crate::state::BufferClipboard;
    use crate::template::BINDING_ATTRIBUTE;
    use crate::timer::{EventLoop, ManualClock};
    use crate::types::TimerStatus;

    struct Fixture {
        clock: Rc<ManualClock>,
        event_loop: Rc<EventLoop>,
        clipboard: Rc<BufferClipboard>,
        stopwatch: Stopwatch,
    }

    fn setup() -> Fixture {
        let clock = Rc::new(ManualClock::at(Duration::from_secs(100)));
        let event_loop = Rc::new(EventLoop::new(clock.clone()));
        let clipboard = Rc::new(BufferClipboard::new());
        let env = TimerEnv::new(event_loop.clone(), clock.clone(), clipboard.clone());
        let stopwatch =
            Stopwatch::new(MountPoint::detached(), env, StopwatchConfig::default()).expect("stopwatch");
        Fixture {
            clock,
            event_loop,
            clipboard,
            stopwatch,
        }
    }

    fn tick(fx: &Fixture, seconds: u64) {
        for _ in 0..seconds {
            fx.clock.advance(Duration::from_secs(1));
            fx.event_loop.run_due();
        }
    }

    fn mounted(fx: &Fixture, id: &str) -> Element {
        fx.stopwatch
            .mount_point()
            .root()
            .and_then(|root| root.find_by_id(id))
            .expect("mounted element")
    }

    #[test]
    fn test_initial_render() {
        let fx = setup();
        let root = fx.stopwatch.mount_point().root().expect("root");

        assert_eq!(root.tag(), "div");
        assert_eq!(mounted(&fx, "timer").text_content(), "00:00:00");
        assert_eq!(mounted(&fx, "reset").text_content(), "x");
        assert_eq!(root.listener_kinds(), vec!["click"]);
        assert_eq!(fx.stopwatch.display_state(), DisplayState::default());
        assert_eq!(fx.stopwatch.mount_point().generation(), 1);
    }

    #[test]
    fn test_template_has_no_handler_syntax() {
        let fx = setup();
        let compiled = fx.stopwatch.compiled().expect("compiled");
        assert!(!compiled.markup().contains("onClick"));
        assert!(mounted(&fx, "timer").has_attribute(BINDING_ATTRIBUTE));
        assert_eq!(compiled.table().len(), 2);
    }

    #[test]
    fn test_click_starts_and_ticks_render() {
        let fx = setup();
        mounted(&fx, "timer").dispatch("click");

        assert_eq!(fx.stopwatch.display_state().status, TimerStatus::Running);
        assert_eq!(mounted(&fx, "timer").attribute("data-status").as_deref(), Some("running"));
        let style = mounted(&fx, "timer").attribute("style").expect("style");
        assert!(style.contains("#76B3FA"));

        tick(&fx, 3);
        assert_eq!(mounted(&fx, "timer").text_content(), "00:00:03");
        assert_eq!(fx.stopwatch.timer_state().status, TimerStatus::Running);
    }

    #[test]
    fn test_second_click_pauses_and_copies() {
        let fx = setup();
        mounted(&fx, "timer").dispatch("click");
        tick(&fx, 65);
        mounted(&fx, "timer").dispatch("click");

        let state = fx.stopwatch.display_state();
        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.duration, "00:01:05");
        assert_eq!(fx.clipboard.paste(), Some("00:01:05".to_string()));
        assert_eq!(fx.event_loop.active_intervals(), 0);

        tick(&fx, 5);
        assert_eq!(mounted(&fx, "timer").text_content(), "00:01:05");
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let fx = setup();
        mounted(&fx, "timer").dispatch("click");
        tick(&fx, 10);
        mounted(&fx, "reset").dispatch("click");

        assert_eq!(fx.stopwatch.display_state(), DisplayState::default());
        assert_eq!(fx.stopwatch.timer_state(), TimerState::default());
        assert_eq!(fx.event_loop.active_intervals(), 0);

        // No dangling tick from the replaced timer.
        tick(&fx, 3);
        assert_eq!(mounted(&fx, "timer").text_content(), "00:00:00");
    }

    #[test]
    fn test_reset_while_idle() {
        let fx = setup();
        fx.stopwatch.reset().expect("reset");
        assert_eq!(fx.stopwatch.display_state(), DisplayState::default());
        assert_eq!(fx.stopwatch.timer_state(), TimerState::default());
    }

    #[test]
    fn test_every_update_remounts() {
        let fx = setup();
        let before = fx.stopwatch.mount_point().root().expect("root");

        fx.stopwatch
            .update_state(DisplayPatch::duration("00:00:42"))
            .expect("update");

        let after = fx.stopwatch.mount_point().root().expect("root");
        assert_ne!(before, after);
        assert_eq!(before.parent(), None);
        assert_eq!(mounted(&fx, "timer").text_content(), "00:00:42");
        assert_eq!(fx.stopwatch.mount_point().generation(), 2);
    }

    #[test]
    fn test_display_signal_follows_renders() {
        let fx = setup();
        let display = fx.stopwatch.display_signal();
        fx.stopwatch.start_stop().expect("start");
        assert_eq!(display.get().status, TimerStatus::Running);
        tick(&fx, 2);
        assert_eq!(display.get().duration, "00:00:02");
    }

    #[test]
    fn test_detached_tree_still_dispatches() {
        let fx = setup();
        let stale = mounted(&fx, "timer");
        stale.dispatch("click");
        assert_eq!(fx.stopwatch.display_state().status, TimerStatus::Running);

        // The stale tree is detached but still wired to the widget.
        stale.dispatch("click");
        assert_eq!(fx.stopwatch.display_state().status, TimerStatus::Idle);
        assert_eq!(fx.event_loop.active_intervals(), 0);
    }

    #[test]
    fn test_render_template_shape() {
        let markup = render_template(&DisplayState::default(), &StopwatchConfig::default());
        assert!(markup.contains("onClick={startStop}"));
        assert!(markup.contains("onClick={reset}"));
        assert!(markup.contains(">00:00:00</button>"));
        assert!(markup.contains("data-status=\"idle\""));
    }
}
