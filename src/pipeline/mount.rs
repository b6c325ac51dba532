//! Mount API - the host container a widget renders into.
//!
//! Mounting replaces the container's children with exactly one root. There
//! is no diffing: every render hands over a brand new tree.
//!
//! Each mount bumps a reactive render generation. Hosts that draw the tree
//! somewhere (a terminal, a test probe) subscribe to it with an effect.
//!
//! # Example
//!
//! ```ignore
//! use spark_signals::effect;
//! use spark_stopwatch::pipeline::MountPoint;
//!
//! let mount = MountPoint::detached();
//! let generation = mount.generation_signal();
//! let stop = effect(move || {
//!     let _ = generation.get();
//!     // redraw here
//! });
//! ```

use std::fmt;

use spark_signals::{signal, Signal};

use crate::dom::Element;

// =============================================================================
// Mount Point
// =============================================================================

/// Handle onto a host container. Clones share the same container.
#[derive(Clone)]
pub struct MountPoint {
    container: Element,
    generation: Signal<u64>,
}

impl MountPoint {
    /// Wrap an existing container element.
    pub fn new(container: Element) -> Self {
        Self {
            container,
            generation: signal(0),
        }
    }

    /// A fresh `<div>` container that is not part of any tree.
    pub fn detached() -> Self {
        Self::new(Element::new("div"))
    }

    /// Clear the container and append `root` as its only child.
    pub fn mount(&self, root: Element) {
        self.container.clear_children();
        self.container.append_child(root);
        self.bump();
        tracing::trace!(generation = self.generation(), "mounted");
    }

    /// Clear the container.
    pub fn unmount(&self) {
        self.container.clear_children();
        self.bump();
    }

    fn bump(&self) {
        let next = self.generation.get() + 1;
        self.generation.set(next);
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// The currently mounted root.
    pub fn root(&self) -> Option<Element> {
        self.container.first_element_child()
    }

    /// Number of mounts and unmounts so far.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn generation_signal(&self) -> Signal<u64> {
        self.generation.clone()
    }
}

impl fmt::Debug for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountPoint")
            .field("container", &self.container)
            .field("generation", &self.generation())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use spark_signals::effect;

    #[test]
    fn test_mount_replaces_children() {
        let mount = MountPoint::detached();
        mount.container().append_text("stale");

        let first = Element::new("div");
        mount.mount(first.clone());
        assert_eq!(mount.root(), Some(first.clone()));
        assert_eq!(mount.container().children().len(), 1);

        let second = Element::new("div");
        mount.mount(second.clone());
        assert_eq!(mount.root(), Some(second));
        assert_eq!(mount.container().children().len(), 1);
        assert_eq!(first.parent(), None);
    }

    #[test]
    fn test_generation_counts_mounts() {
        let mount = MountPoint::detached();
        assert_eq!(mount.generation(), 0);

        mount.mount(Element::new("div"));
        mount.mount(Element::new("div"));
        mount.unmount();

        assert_eq!(mount.generation(), 3);
        assert_eq!(mount.root(), None);
    }

    #[test]
    fn test_effect_runs_on_every_mount() {
        let mount = MountPoint::detached();
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let generation = mount.generation_signal();
        let _stop = effect(move || {
            let _ = generation.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        mount.mount(Element::new("div"));
        mount.mount(Element::new("div"));
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn test_clones_share_container() {
        let mount = MountPoint::detached();
        let other = mount.clone();
        let root = Element::new("div");

        other.mount(root.clone());
        assert_eq!(mount.root(), Some(root));
        assert_eq!(mount.generation(), 1);
    }
}
