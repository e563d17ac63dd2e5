//! Depth-first queries and edits over an element tree.
//!
//! All searches are pre-order: a node's own children are searched before its
//! later siblings. Edits happen in place on an owned tree; callers that need
//! copy-on-write semantics clone the tree first (see [`crate::drag`]).

use crate::element::{Element, ElementBody, ElementId, ElementKind, ElementUpdate, UpdateError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest column count a Grid may be given.
pub const MAX_GRID_COLUMNS: usize = 6;

/// Droppable id of the document root.
pub const ROOT_ID: &str = "root";

/// Tree edit errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("cannot update {id}: {source}")]
    Update {
        id: ElementId,
        #[source]
        source: UpdateError,
    },
    #[error("a grid must have between 1 and {max} columns (got {requested})")]
    InvalidColumnCount { requested: usize, max: usize },
}

/// A child sequence: the document root or a container element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerRef {
    Root,
    Element(ElementId),
}

impl ContainerRef {
    pub fn is_root(&self) -> bool {
        matches!(self, ContainerRef::Root)
    }

    /// Parse a container id, treating `"root"` as the document root.
    pub fn parse(id: &str) -> Self {
        if id == ROOT_ID {
            ContainerRef::Root
        } else {
            ContainerRef::Element(ElementId::from(id))
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Root => f.write_str(ROOT_ID),
            ContainerRef::Element(id) => write!(f, "{id}"),
        }
    }
}

/// Find the first element with the given id.
pub fn find<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    for element in elements {
        if element.id.as_str() == id {
            return Some(element);
        }
        if let Some(found) = find(element.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Find a mutable element with the given id.
pub fn find_mut<'a>(elements: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    for element in elements.iter_mut() {
        if element.id.as_str() == id {
            return Some(element);
        }
        if let Some(children) = element.children_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Merge a partial update into the element with the given id.
///
/// Returns `Ok(false)` if no element has that id. A rejected update leaves
/// the element untouched.
pub fn update(elements: &mut [Element], id: &str, update: &ElementUpdate) -> Result<bool, TreeError> {
    let Some(element) = find_mut(elements, id) else {
        log::debug!("update: no element {id}");
        return Ok(false);
    };
    element.apply(update).map_err(|source| TreeError::Update {
        id: element.id.clone(),
        source,
    })?;
    Ok(true)
}

/// Detach the element with the given id (and its subtree) from wherever it
/// sits. The remaining siblings keep their order.
pub fn remove(elements: &mut Vec<Element>, id: &str) -> Option<Element> {
    if let Some(pos) = elements.iter().position(|e| e.id.as_str() == id) {
        return Some(elements.remove(pos));
    }
    for element in elements.iter_mut() {
        if let Some(children) = element.children_mut() {
            if let Some(removed) = remove(children, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Grow or shrink a Grid to exactly `count` columns.
///
/// Growing appends fresh empty Columns after the existing ones; shrinking
/// drops the trailing Columns together with everything inside them.
/// Returns `Ok(false)` if the id is absent or not a Grid.
pub fn set_column_count(elements: &mut [Element], grid_id: &str, count: usize) -> Result<bool, TreeError> {
    if count == 0 || count > MAX_GRID_COLUMNS {
        return Err(TreeError::InvalidColumnCount {
            requested: count,
            max: MAX_GRID_COLUMNS,
        });
    }
    let Some(element) = find_mut(elements, grid_id) else {
        log::debug!("set_column_count: no element {grid_id}");
        return Ok(false);
    };
    let ElementBody::Grid { children, .. } = &mut element.body else {
        log::debug!("set_column_count: {grid_id} is not a grid");
        return Ok(false);
    };

    if children.len() < count {
        let missing = count - children.len();
        children.extend((0..missing).map(|_| Element::new(ElementKind::Column)));
    } else {
        children.truncate(count);
    }
    Ok(true)
}

/// Locate an element: the sequence that holds it and its index there.
/// The first container found holding the id wins.
pub fn locate(elements: &[Element], id: &str) -> Option<(ContainerRef, usize)> {
    locate_in(elements, &ContainerRef::Root, id)
}

fn locate_in(elements: &[Element], parent: &ContainerRef, id: &str) -> Option<(ContainerRef, usize)> {
    if let Some(index) = elements.iter().position(|e| e.id.as_str() == id) {
        return Some((parent.clone(), index));
    }
    for element in elements {
        if element.is_container() {
            let container = ContainerRef::Element(element.id.clone());
            if let Some(found) = locate_in(element.children(), &container, id) {
                return Some(found);
            }
        }
    }
    None
}

/// The container holding the element with the given id.
pub fn parent_of(elements: &[Element], id: &str) -> Option<ContainerRef> {
    locate(elements, id).map(|(parent, _)| parent)
}

/// The child sequence of a container, or `None` if the container is absent
/// or is a leaf.
pub fn sequence<'a>(elements: &'a [Element], container: &ContainerRef) -> Option<&'a [Element]> {
    match container {
        ContainerRef::Root => Some(elements),
        ContainerRef::Element(id) => find(elements, id.as_str())
            .filter(|e| e.is_container())
            .map(|e| e.children()),
    }
}

/// Mutable child sequence of a container.
pub fn sequence_mut<'a>(
    elements: &'a mut Vec<Element>,
    container: &ContainerRef,
) -> Option<&'a mut Vec<Element>> {
    match container {
        ContainerRef::Root => Some(elements),
        ContainerRef::Element(id) => find_mut(elements, id.as_str()).and_then(|e| e.children_mut()),
    }
}

/// Kind of the element owning a sequence (`None` for the root).
pub fn container_kind(elements: &[Element], container: &ContainerRef) -> Option<ElementKind> {
    match container {
        ContainerRef::Root => None,
        ContainerRef::Element(id) => find(elements, id.as_str()).map(|e| e.kind()),
    }
}

/// Append an element to the end of a container's children.
/// Gives the element back if the container is absent or a leaf.
pub fn append_to(
    elements: &mut Vec<Element>,
    container: &ContainerRef,
    element: Element,
) -> Result<(), Element> {
    match sequence_mut(elements, container) {
        Some(children) => {
            children.push(element);
            Ok(())
        }
        None => Err(element),
    }
}

/// Insert an element immediately before the element `target_id`.
/// Gives the element back if the target is absent.
pub fn insert_before(elements: &mut Vec<Element>, target_id: &str, element: Element) -> Result<(), Element> {
    let Some((parent, index)) = locate(elements, target_id) else {
        return Err(element);
    };
    match sequence_mut(elements, &parent) {
        Some(children) => {
            children.insert(index, element);
            Ok(())
        }
        None => Err(element),
    }
}

/// All ids in the tree, pre-order.
pub fn ids(elements: &[Element]) -> Vec<&ElementId> {
    elements
        .iter()
        .flat_map(|e| e.descendants())
        .map(|e| &e.id)
        .collect()
}

/// Number of elements in the tree.
pub fn count(elements: &[Element]) -> usize {
    elements.iter().map(|e| 1 + count(e.children())).sum()
}
