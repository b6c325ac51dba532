//! Event Dispatcher - one delegated listener per event kind.
//!
//! Instead of a listener per element, the compiled root gets exactly one
//! listener for each distinct event name in the handler table. At delivery
//! the listener resolves the target's binding id through the table and calls
//! the named handler. Anything unresolved is ignored.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::{Event, Listener};
use crate::types::BindingId;

use super::compiler::{CompiledTemplate, HandlerTable};
use super::BINDING_ATTRIBUTE;

/// Handler for a DOM event, looked up by name.
pub type Handler = Rc<dyn Fn(&Event)>;

// =============================================================================
// Handler Set
// =============================================================================

/// Caller-supplied handlers, keyed by the names templates reference.
#[derive(Clone, Default)]
pub struct HandlerSet {
    handlers: HashMap<String, Handler>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous one.
    pub fn insert<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.handlers.insert(name.into(), Rc::new(handler));
    }

    /// Builder form of [`HandlerSet::insert`].
    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Event) + 'static,
    {
        self.insert(name, handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("HandlerSet").field("handlers", &names).finish()
    }
}

// =============================================================================
// Binding
// =============================================================================

/// Install the delegated listeners for `compiled` on its root.
///
/// Returns the event names that received a listener, sorted.
pub fn bind(compiled: &CompiledTemplate, handlers: &HandlerSet) -> Vec<String> {
    let table = compiled.shared_table();
    let events = table.event_names();

    for event_name in &events {
        compiled
            .root()
            .add_event_listener(event_name, delegate(event_name.clone(), table.clone(), handlers.clone()));
    }

    tracing::debug!(listeners = ?events, "bound delegated listeners");
    events
}

fn delegate(event_name: String, table: Rc<HandlerTable>, handlers: HandlerSet) -> Listener {
    Rc::new(move |event: &Event| {
        if let Some(handler) = resolve(&table, &handlers, &event_name, event) {
            handler(event);
        }
    })
}

/// The handler a delivery resolves to, if every lookup succeeds.
fn resolve(
    table: &HandlerTable,
    handlers: &HandlerSet,
    event_name: &str,
    event: &Event,
) -> Option<Handler> {
    let id = event
        .target()
        .attribute(BINDING_ATTRIBUTE)
        .and_then(|value| BindingId::parse(&value))?;
    let name = table.get(id, event_name)?;
    handlers.get(name).cloned()
}

// =============================================================================
// Tests
// =============================================================================
