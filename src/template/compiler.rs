//! Template Compiler - markup with inline handlers to a live element tree.
//!
//! Templates declare handlers inside opening tags:
//!
//! ```text
//! <button id="timer" onClick={startStop}>00:00:00</button>
//! ```
//!
//! Compilation rewrites each such tag so the handler syntax is replaced by a
//! single `data-binding-id="N"` attribute, records `(N, "click") -> "startStop"`
//! in the [`HandlerTable`], then instantiates the rewritten markup.
//!
//! # Limitations
//!
//! Opening tags are found with a non-greedy regex, not a tokenizer. A `>`
//! inside an attribute value ends the tag early, and closing tags are never
//! scanned. Templates are self-generated, so this subset is all that is
//! supported.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::dom::{parse_first_element, Element};
use crate::error::{Error, Result};
use crate::types::BindingId;

use super::ids::IdGenerator;
use super::BINDING_ATTRIBUTE;

static OPENING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^/].*?>").expect("opening tag pattern"));

static HANDLER_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(on[A-Z][A-Za-z0-9]*)\s*=\s*\{\s*([^{}]*?)\s*\}").expect("handler pattern")
});

/// Handle key seeded with the compiled root. A descendant `id="root"` overrides it.
pub const ROOT_HANDLE: &str = "$root";

/// `onClick` -> `click`. Trims, lowercases, then strips one leading `on`.
pub fn normalize_event_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.strip_prefix("on") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

// =============================================================================
// Handler Table
// =============================================================================

/// Per-compilation mapping from `(BindingId, event)` to a handler name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerTable {
    entries: HashMap<(BindingId, String), String>,
}

impl HandlerTable {
    /// Record an entry. A later insert for the same key wins.
    pub fn insert(&mut self, id: BindingId, event: impl Into<String>, handler: impl Into<String>) {
        self.entries.insert((id, event.into()), handler.into());
    }

    pub fn get(&self, id: BindingId, event: &str) -> Option<&str> {
        self.entries
            .get(&(id, event.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct event names, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.entries.keys().map(|(_, event)| event).collect();
        names.into_iter().cloned().collect()
    }

    /// Distinct binding ids, sorted.
    pub fn binding_ids(&self) -> Vec<BindingId> {
        let ids: BTreeSet<BindingId> = self.entries.keys().map(|(id, _)| *id).collect();
        ids.into_iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &str, &str)> {
        self.entries
            .iter()
            .map(|((id, event), handler)| (*id, event.as_str(), handler.as_str()))
    }
}

// =============================================================================
// Compiled Template
// =============================================================================

/// Result of one compilation pass.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    root: Element,
    handles: HashMap<String, Element>,
    table: Rc<HandlerTable>,
    markup: String,
}

impl CompiledTemplate {
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Look up a handle by key: `"$root"` or `"$" + id`.
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.handles.get(key)
    }

    /// Look up a descendant by its `id` attribute.
    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.handles.get(&format!("${id}"))
    }

    pub fn handles(&self) -> &HashMap<String, Element> {
        &self.handles
    }

    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    pub(crate) fn shared_table(&self) -> Rc<HandlerTable> {
        self.table.clone()
    }

    /// The rewritten markup that was instantiated.
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

// =============================================================================
// Compiler
// =============================================================================

/// Compiles templates, allocating binding ids from its own generator.
///
/// Ids keep increasing across passes, so no two elements produced by the same
/// compiler ever share one.
#[derive(Debug, Default)]
pub struct Compiler {
    ids: IdGenerator,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Compile `template` into a live tree, handler table and id handles.
    pub fn compile(&self, template: &str) -> Result<CompiledTemplate> {
        let mut table = HandlerTable::default();
        let markup = OPENING_TAG
            .replace_all(template, |caps: &Captures| self.rewrite_tag(&caps[0], &mut table))
            .into_owned();

        let root = parse_first_element(&markup).ok_or(Error::MissingRoot)?;

        // `$root` is only the seed: a descendant with `id="root"` takes it over.
        let mut handles = HashMap::from([(ROOT_HANDLE.to_string(), root.clone())]);
        for element in root.query_by_attribute("id") {
            if let Some(id) = element.id() {
                handles.insert(format!("${id}"), element);
            }
        }

        tracing::debug!(
            bindings = table.binding_ids().len(),
            entries = table.len(),
            handles = handles.len(),
            "compiled template"
        );

        Ok(CompiledTemplate {
            root,
            handles,
            table: Rc::new(table),
            markup,
        })
    }

    /// Replace the handler fragments of one opening tag with a binding
    /// attribute. Tags without fragments pass through untouched.
    fn rewrite_tag(&self, tag: &str, table: &mut HandlerTable) -> String {
        if !HANDLER_FRAGMENT.is_match(tag) {
            return tag.to_string();
        }

        let id = self.ids.next_id();
        let mut first = true;
        HANDLER_FRAGMENT
            .replace_all(tag, |caps: &Captures| {
                table.insert(id, normalize_event_name(&caps[1]), caps[2].trim());
                if std::mem::take(&mut first) {
                    format!(" {BINDING_ATTRIBUTE}=\"{id}\"")
                } else {
                    String::new()
                }
            })
            .into_owned()
    }
}

// =============================================================================
// Tests
// =============================================================================
