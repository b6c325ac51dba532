//! Template engine - compile markup, then delegate its events.
//!
//! ```text
//! template str → Compiler::compile → CompiledTemplate → bind(handlers) → mount
//! ```
//!
//! - [`Compiler`] - rewrites inline handlers to binding ids, builds the tree
//! - [`bind`] - one delegated listener per event kind on the compiled root
//! - [`IdGenerator`] - monotonic binding ids, owned by the compiler

mod compiler;
mod dispatcher;
mod ids;

pub use compiler::{normalize_event_name, CompiledTemplate, Compiler, HandlerTable, ROOT_HANDLE};
pub use dispatcher::{bind, Handler, HandlerSet};
pub use ids::IdGenerator;

/// Attribute carrying an element's binding id in compiled markup.
pub const BINDING_ATTRIBUTE: &str = "data-binding-id";
