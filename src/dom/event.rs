//! Event - a single delivery travelling from a target element to the root.

use std::cell::Cell;

use crate::types::Modifiers;

use super::Element;

/// Well-known event kinds used by templates (`onClick` -> `click`).
pub mod kinds {
    pub const CLICK: &str = "click";
}

/// Handler invoked with every event delivered to an element.
pub type Listener = std::rc::Rc<dyn Fn(&Event)>;

/// An event dispatched at `target` that bubbles through its ancestors.
#[derive(Debug)]
pub struct Event {
    kind: String,
    target: Element,
    modifiers: Modifiers,
    propagation_stopped: Cell<bool>,
}

impl Event {
    /// Create an event of `kind` aimed at `target`.
    pub fn new(kind: impl Into<String>, target: Element) -> Self {
        Self {
            kind: kind.into(),
            target,
            modifiers: Modifiers::NONE,
            propagation_stopped: Cell::new(false),
        }
    }

    /// Shorthand for a `click` on `target`.
    pub fn click(target: Element) -> Self {
        Self::new(kinds::CLICK, target)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The element the event was aimed at (not the one listening).
    pub fn target(&self) -> &Element {
        &self.target
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Stop the event from reaching further ancestors.
    ///
    /// Remaining listeners on the current element still run.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}
