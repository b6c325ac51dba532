//! Element tree - live nodes with attributes, children and listeners.
//!
//! `Element` is a cheap handle (`Rc`) onto shared node data. Cloning the
//! handle never clones the subtree. Parents are held weakly so a subtree is
//! freed as soon as the last handle to its root goes away.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::event::{Event, Listener};

/// Elements that never have children or a closing tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

// =============================================================================
// Node
// =============================================================================

/// A child of an element: either another element or a run of text.
#[derive(Clone, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

// =============================================================================
// Element
// =============================================================================

struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    parent: Weak<RefCell<ElementData>>,
    listeners: HashMap<String, Vec<Listener>>,
}

/// Handle onto a live element.
///
/// Equality is identity: two handles are equal when they point at the same
/// node.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementData>>,
}

impl Element {
    /// Create a detached element. Tag names are stored lowercase.
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                tag: tag.to_ascii_lowercase(),
                attributes: Vec::new(),
                children: Vec::new(),
                parent: Weak::new(),
                listeners: HashMap::new(),
            })),
        }
    }

    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Attribute lookup. Names are case-insensitive.
    pub fn attribute(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.inner
            .borrow()
            .attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set or overwrite an attribute, keeping its original position.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        let mut data = self.inner.borrow_mut();
        match data.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => data.attributes.push((name, value)),
        }
    }

    /// Attributes in source order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.inner.borrow().attributes.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.attribute("id")
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    pub fn parent(&self) -> Option<Element> {
        self.inner.borrow().parent.upgrade().map(|inner| Element { inner })
    }

    pub fn children(&self) -> Vec<Node> {
        self.inner.borrow().children.clone()
    }

    pub fn child_elements(&self) -> Vec<Element> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(|node| node.as_element().cloned())
            .collect()
    }

    pub fn first_element_child(&self) -> Option<Element> {
        self.inner
            .borrow()
            .children
            .iter()
            .find_map(|node| node.as_element().cloned())
    }

    /// Append a child. An element that already has a parent is moved.
    pub fn append_child(&self, node: impl Into<Node>) {
        let node = node.into();
        if let Node::Element(child) = &node {
            if let Some(previous) = child.parent() {
                previous.remove_child(child);
            }
            child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        }
        self.inner.borrow_mut().children.push(node);
    }

    pub fn append_text(&self, text: impl Into<String>) {
        self.append_child(Node::Text(text.into()));
    }

    /// Detach `child`. Returns false when it is not a direct child.
    pub fn remove_child(&self, child: &Element) -> bool {
        let mut data = self.inner.borrow_mut();
        let before = data.children.len();
        data.children
            .retain(|node| node.as_element().is_none_or(|element| element != child));
        let removed = data.children.len() != before;
        if removed {
            child.inner.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Remove every child, detaching child elements from this node.
    pub fn clear_children(&self) {
        let children = std::mem::take(&mut self.inner.borrow_mut().children);
        for node in children {
            if let Node::Element(child) = node {
                child.inner.borrow_mut().parent = Weak::new();
            }
        }
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in self.children() {
            match node {
                Node::Text(text) => out.push_str(&text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Every descendant element in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants(&self, out: &mut Vec<Element>) {
        for child in self.child_elements() {
            out.push(child.clone());
            child.collect_descendants(out);
        }
    }

    /// Descendants carrying attribute `name`.
    pub fn query_by_attribute(&self, name: &str) -> Vec<Element> {
        self.descendants()
            .into_iter()
            .filter(|element| element.has_attribute(name))
            .collect()
    }

    /// First descendant whose `id` equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Element> {
        self.descendants()
            .into_iter()
            .find(|element| element.id().as_deref() == Some(id))
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn add_event_listener(&self, kind: &str, listener: Listener) {
        self.inner
            .borrow_mut()
            .listeners
            .entry(kind.to_string())
            .or_default()
            .push(listener);
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Event kinds with at least one listener, sorted.
    pub fn listener_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, listeners)| !listeners.is_empty())
            .map(|(kind, _)| kind.clone())
            .collect();
        kinds.sort();
        kinds
    }

    /// Deliver `event` to this element and then each ancestor in turn.
    ///
    /// Listener lists are cloned before invocation, so a listener may mutate
    /// or replace the tree it is running in. Returns how many listeners ran.
    pub fn dispatch_event(&self, event: &Event) -> usize {
        let mut invoked = 0;
        let mut current = Some(self.clone());
        while let Some(element) = current {
            let listeners: Vec<Listener> = element
                .inner
                .borrow()
                .listeners
                .get(event.kind())
                .cloned()
                .unwrap_or_default();
            for listener in listeners {
                listener(event);
                invoked += 1;
            }
            if event.is_propagation_stopped() {
                break;
            }
            current = element.parent();
        }
        invoked
    }

    /// Dispatch a fresh event of `kind` targeted at this element.
    pub fn dispatch(&self, kind: &str) -> usize {
        self.dispatch_event(&Event::new(kind, self.clone()))
    }

    // -------------------------------------------------------------------------
    // Serialization
    // -------------------------------------------------------------------------

    /// Markup for this element and its subtree.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.inner.borrow();
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in &data.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');
        if is_void(&data.tag) {
            return;
        }
        for node in &data.children {
            match node {
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Element(element) => element.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&data.tag);
        out.push('>');
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("attributes", &data.attributes)
            .field("children", &data.children.len())
            .finish()
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

// =============================================================================
// Tests
// =============================================================================
