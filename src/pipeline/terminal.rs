//! Terminal host - draw a mounted tree on one terminal line.
//!
//! Every element carrying a binding attribute is a control, drawn as a
//! `[ label ]` cell. One control has focus.
//!
//! | Key | Action |
//! |-----|--------|
//! | Tab / Right | focus next control |
//! | Shift+Tab / Left | focus previous control |
//! | Enter / Space | click the focused control |
//! | r | click the control with `id="reset"` |
//! | q / Esc / Ctrl+C | quit |
//!
//! The host redraws from an effect on the mount generation, so every render
//! the widget performs shows up without the widget knowing about terminals.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveToColumn, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use spark_signals::effect;

use crate::dom::{Element, Event};
use crate::error::Result;
use crate::template::BINDING_ATTRIBUTE;
use crate::timer::EventLoop;
use crate::types::{Modifiers, TimerStatus};

use super::mount::MountPoint;

/// Longest the host blocks on input before servicing timers.
pub const IDLE_POLL: Duration = Duration::from_millis(16);

// =============================================================================
// Drawing
// =============================================================================

/// Controls of a tree in document order, including the root if bound.
pub fn controls(root: &Element) -> Vec<Element> {
    let mut out = Vec::new();
    if root.has_attribute(BINDING_ATTRIBUTE) {
        out.push(root.clone());
    }
    out.extend(root.query_by_attribute(BINDING_ATTRIBUTE));
    out
}

/// The line drawn for `root` with control `focus` highlighted.
///
/// The line starts with `●` while any control reports `data-status="running"`.
pub fn render_line(root: Option<&Element>, focus: usize) -> String {
    let Some(root) = root else {
        return String::new();
    };

    let controls = controls(root);
    let running_status = TimerStatus::Running.to_string();
    let running = controls
        .iter()
        .any(|el| el.attribute("data-status").as_deref() == Some(running_status.as_str()));

    let mut line = String::from(if running { "● " } else { "○ " });
    let cells: Vec<String> = controls
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let label = el.text_content();
            if i == focus {
                format!(">[ {} ]<", label.trim())
            } else {
                format!(" [ {} ] ", label.trim())
            }
        })
        .collect();
    line.push_str(&cells.join(" "));
    line
}

// =============================================================================
// Input
// =============================================================================

/// What a key press asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    FocusNext,
    FocusPrevious,
    ClickFocused(Modifiers),
    ClickById(&'static str),
    Quit,
}

pub fn modifiers_from(keys: KeyModifiers) -> Modifiers {
    let mut mods = Modifiers::NONE;
    if keys.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    if keys.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if keys.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }
    if keys.contains(KeyModifiers::META) || keys.contains(KeyModifiers::SUPER) {
        mods |= Modifiers::META;
    }
    mods
}

/// Map a key press to a host action.
pub fn map_key(key: KeyEvent) -> Option<HostAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(HostAction::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(HostAction::Quit),
        KeyCode::Char('r') => Some(HostAction::ClickById("reset")),
        KeyCode::Tab | KeyCode::Right => Some(HostAction::FocusNext),
        KeyCode::BackTab | KeyCode::Left => Some(HostAction::FocusPrevious),
        KeyCode::Enter | KeyCode::Char(' ') => {
            Some(HostAction::ClickFocused(modifiers_from(key.modifiers)))
        }
        _ => None,
    }
}

// =============================================================================
// Host
// =============================================================================

/// Runs an event loop against a mount point on the real terminal.
pub struct TerminalHost {
    mount: MountPoint,
    event_loop: Rc<EventLoop>,
    focus: Rc<Cell<usize>>,
    running: Cell<bool>,
}

impl TerminalHost {
    pub fn new(mount: MountPoint, event_loop: Rc<EventLoop>) -> Self {
        Self {
            mount,
            event_loop,
            focus: Rc::new(Cell::new(0)),
            running: Cell::new(true),
        }
    }

    pub fn focus(&self) -> usize {
        self.focus.get()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Apply one action against the mounted tree.
    pub fn apply(&self, action: HostAction) {
        let Some(root) = self.mount.root() else {
            if action == HostAction::Quit {
                self.running.set(false);
            }
            return;
        };
        let controls = controls(&root);
        let count = controls.len().max(1);

        match action {
            HostAction::FocusNext => self.focus.set((self.focus.get() + 1) % count),
            HostAction::FocusPrevious => self.focus.set((self.focus.get() + count - 1) % count),
            HostAction::ClickFocused(mods) => {
                if let Some(target) = controls.get(self.focus.get()) {
                    target.dispatch_event(&Event::click(target.clone()).with_modifiers(mods));
                }
            }
            HostAction::ClickById(id) => {
                if let Some(target) = controls.iter().find(|el| el.id().as_deref() == Some(id)) {
                    target.dispatch_event(&Event::click(target.clone()));
                }
            }
            HostAction::Quit => self.running.set(false),
        }
    }

    /// Take over the terminal until the user quits.
    pub fn run(&self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;

        let result = self.run_loop();

        // Restore the terminal even when the loop failed.
        let _ = execute!(io::stdout(), Show, Print("\r\n"));
        let _ = terminal::disable_raw_mode();
        result
    }

    fn run_loop(&self) -> Result<()> {
        let container = self.mount.container().clone();
        let focus = self.focus.clone();
        let generation = self.mount.generation_signal();
        let stop_redraw = effect(move || {
            let _ = generation.get();
            let _ = draw(&render_line(container.first_element_child().as_ref(), focus.get()));
        });

        let result = self.poll_until_quit();
        stop_redraw();
        result
    }

    fn poll_until_quit(&self) -> Result<()> {
        while self.running.get() {
            let timeout = self
                .event_loop
                .time_until_next()
                .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));

            if event::poll(timeout)? {
                if let TermEvent::Key(key) = event::read()? {
                    if let Some(action) = map_key(key) {
                        let focus_before = self.focus.get();
                        self.apply(action);
                        if self.focus.get() != focus_before {
                            draw(&render_line(self.mount.root().as_ref(), self.focus.get()))?;
                        }
                    }
                }
            }

            self.event_loop.run_due();
        }
        Ok(())
    }
}

fn draw(line: &str) -> io::Result<()> {
    let mut out = io::stdout();
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(line))?;
    out.flush()
}

// =============================================================================
// Tests
// =============================================================================
