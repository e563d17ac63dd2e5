//! The page document: an ordered sequence of root elements.

use crate::element::{Element, ElementId, ElementKind, ElementUpdate};
use crate::tree::{self, ContainerRef, TreeError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The element tree of one page, as stored: `{ "elements": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_default")]
    pub elements: Vec<Element>,
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements in the whole tree.
    pub fn len(&self) -> usize {
        tree::count(&self.elements)
    }

    /// Get an element by id.
    pub fn find(&self, id: &str) -> Option<&Element> {
        tree::find(&self.elements, id)
    }

    /// Get a mutable reference to an element by id.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        tree::find_mut(&mut self.elements, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Merge a partial update into an element. `Ok(false)` if not found.
    pub fn update(&mut self, id: &str, update: &ElementUpdate) -> Result<bool, TreeError> {
        tree::update(&mut self.elements, id, update)
    }

    /// Delete an element and its subtree, returning it.
    pub fn delete(&mut self, id: &str) -> Option<Element> {
        let removed = tree::remove(&mut self.elements, id);
        if removed.is_none() {
            log::debug!("delete: no element {id}");
        }
        removed
    }

    /// Set the number of columns of a Grid. `Ok(false)` if not a Grid.
    pub fn set_column_count(&mut self, grid_id: &str, count: usize) -> Result<bool, TreeError> {
        tree::set_column_count(&mut self.elements, grid_id, count)
    }

    /// The container holding an element.
    pub fn parent_of(&self, id: &str) -> Option<ContainerRef> {
        tree::parent_of(&self.elements, id)
    }

    /// All element ids, pre-order.
    pub fn ids(&self) -> Vec<&ElementId> {
        tree::ids(&self.elements)
    }

    /// Check the tree's structural invariants without changing anything.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for element in &self.elements {
            check(element, None, &mut seen, &mut out);
        }
        out
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON. Empty input is an empty document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_str(json)
    }
}

fn check(
    element: &Element,
    parent: Option<&Element>,
    seen: &mut HashSet<ElementId>,
    out: &mut Vec<Violation>,
) {
    if !seen.insert(element.id.clone()) {
        out.push(Violation::DuplicateId(element.id.clone()));
    }
    if let Some(parent) = parent {
        if element.kind() == ElementKind::Section {
            out.push(Violation::NestedSection {
                id: element.id.clone(),
                parent: parent.id.clone(),
            });
        }
        if parent.kind() == ElementKind::Grid && element.kind() != ElementKind::Column {
            out.push(Violation::NonColumnInGrid {
                id: element.id.clone(),
                kind: element.kind(),
                grid: parent.id.clone(),
            });
        }
    }
    for child in element.children() {
        check(child, Some(element), seen, out);
    }
}

/// A broken structural invariant found in a loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    DuplicateId(ElementId),
    NestedSection { id: ElementId, parent: ElementId },
    NonColumnInGrid { id: ElementId, kind: ElementKind, grid: ElementId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateId(id) => write!(f, "id {id} is used more than once"),
            Violation::NestedSection { id, parent } => {
                write!(f, "section {id} is nested inside {parent}")
            }
            Violation::NonColumnInGrid { id, kind, grid } => {
                write!(f, "{kind} {id} sits directly inside grid {grid}")
            }
        }
    }
}
