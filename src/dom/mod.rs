//! DOM - the in-memory element tree widgets render into.
//!
//! This module stands in for a host page:
//!
//! - [`Element`] - live nodes with attributes, children and listeners
//! - [`Event`] - bubbling event delivery with a fixed target
//! - [`parse_fragment`] - instantiate subtrees from markup
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Listeners run
//! synchronously inside [`Element::dispatch_event`].

mod element;
mod event;
mod parser;

pub use element::{Element, Node};
pub use event::{kinds, Event, Listener};
pub use parser::{parse_first_element, parse_fragment};
