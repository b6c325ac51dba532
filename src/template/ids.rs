//! Binding id allocation.

use std::cell::Cell;

use crate::types::BindingId;

/// Monotonic counter handing out [`BindingId`]s, starting at 1.
///
/// Never reset. Not `Sync`: allocation is serialized by the single-threaded
/// event loop that drives compilation.
#[derive(Debug)]
pub struct IdGenerator {
    next: Cell<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Return the current id and advance.
    pub fn next_id(&self) -> BindingId {
        let id = self.next.get();
        self.next.set(id + 1);
        BindingId(id)
    }

    /// The id the next call will return.
    pub fn peek(&self) -> BindingId {
        BindingId(self.next.get())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
