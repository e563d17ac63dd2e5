//! Drag-and-drop: turning a gesture into a structural tree edit.
//!
//! The controller is a small state machine (idle or dragging). A drop is
//! resolved against a private copy of the document; the copy is handed back
//! only if every placement rule holds, so a rejected drop never leaves a
//! partially edited tree behind.

use crate::config::BuilderConfig;
use crate::document::Document;
use crate::element::{Element, ElementId, ElementKind};
use crate::tree::{self, ContainerRef};
use thiserror::Error;

/// Prefix of the droppable ids rendered for container placeholders.
pub const PLACEHOLDER_PREFIX: &str = "placeholder-";

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A new element of this kind, taken from the palette.
    Palette(ElementKind),
    /// An element already in the document.
    Existing(ElementId),
}

/// Where a drag was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The "drop here" area of a container: append to its children.
    Placeholder(ContainerRef),
    /// An existing element: insert immediately before it.
    Element(ElementId),
}

impl DropTarget {
    /// Parse a droppable id as emitted by the editable canvas.
    pub fn parse(id: &str) -> Self {
        match id.strip_prefix(PLACEHOLDER_PREFIX) {
            Some(container) => DropTarget::Placeholder(ContainerRef::parse(container)),
            None => DropTarget::Element(ElementId::from(id)),
        }
    }

    /// The droppable id this target is rendered with.
    pub fn droppable_id(&self) -> String {
        match self {
            DropTarget::Placeholder(container) => format!("{PLACEHOLDER_PREFIX}{container}"),
            DropTarget::Element(id) => id.to_string(),
        }
    }

    /// Droppable id of a container's placeholder.
    pub fn placeholder_id(container: &ContainerRef) -> String {
        DropTarget::Placeholder(container.clone()).droppable_id()
    }
}

/// Input to the drag state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start(DragSource),
    /// Released over a target, or over nothing droppable.
    Drop(Option<DropTarget>),
    Cancel,
}

/// State of the drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source: DragSource },
}

/// Why a drop was refused. The message is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Missed the drop zone. Drag directly over a highlighted area.")]
    MissedDropZone,
    #[error("The dragged element no longer exists.")]
    SourceNotFound(ElementId),
    #[error("That drop target is no longer available.")]
    TargetNotFound(String),
    #[error("Elements can only be dropped into sections, columns or the page.")]
    NotAContainer(ElementId),
    #[error("Sections must remain at the root level.")]
    SectionOutsideRoot,
    #[error("Only columns can be added directly inside Grids.")]
    NonColumnInGrid,
    #[error("You cannot place a Grid next to another Grid inside a column.")]
    GridBesideGrid,
}

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// A drag began.
    Started,
    /// The event did not apply in the current state.
    Ignored,
    /// The drag ended without a drop.
    Cancelled,
    /// The drop was accepted; `document` replaces the current one.
    Committed {
        document: Document,
        placed: ElementId,
        /// True when the element came from the palette.
        created: bool,
    },
    /// The drop was refused; the current document stays as it is.
    Rejected(Rejection),
}

/// Drives a drag gesture from start to drop.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    config: BuilderConfig,
}

impl DragController {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            state: DragState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Kind of a palette item being dragged, for the drag overlay.
    pub fn dragged_kind(&self) -> Option<ElementKind> {
        match &self.state {
            DragState::Dragging {
                source: DragSource::Palette(kind),
            } => Some(*kind),
            _ => None,
        }
    }

    /// Advance the state machine. `document` is only read; a committed drop
    /// returns the new document for the caller to install.
    pub fn handle(&mut self, event: DragEvent, document: &Document) -> DragOutcome {
        match (std::mem::take(&mut self.state), event) {
            (DragState::Idle, DragEvent::Start(source)) => {
                log::debug!("drag started: {source:?}");
                self.state = DragState::Dragging { source };
                DragOutcome::Started
            }
            (dragging @ DragState::Dragging { .. }, DragEvent::Start(source)) => {
                log::debug!("ignoring drag start of {source:?} while another drag is active");
                self.state = dragging;
                DragOutcome::Ignored
            }
            (DragState::Idle, event) => {
                log::debug!("ignoring {event:?} while idle");
                DragOutcome::Ignored
            }
            (DragState::Dragging { .. }, DragEvent::Cancel) => DragOutcome::Cancelled,
            (DragState::Dragging { source }, DragEvent::Drop(target)) => {
                let Some(target) = target else {
                    log::warn!("drop rejected: no target");
                    return DragOutcome::Rejected(Rejection::MissedDropZone);
                };
                if let (DragSource::Existing(dragged), DropTarget::Element(onto)) = (&source, &target) {
                    if dragged == onto {
                        log::debug!("{dragged} released over itself, nothing to move");
                        return DragOutcome::Cancelled;
                    }
                }
                match resolve_drop(document, &source, &target, &self.config) {
                    Ok((document, placed, created)) => {
                        log::info!("placed {placed} at {}", target.droppable_id());
                        DragOutcome::Committed {
                            document,
                            placed,
                            created,
                        }
                    }
                    Err(rejection) => {
                        log::warn!("drop of {source:?} on {target:?} rejected: {rejection:?}");
                        DragOutcome::Rejected(rejection)
                    }
                }
            }
        }
    }
}

/// Apply a drop to a copy of `document`.
///
/// Returns the new document, the id of the placed element and whether it was
/// freshly created.
pub fn resolve_drop(
    document: &Document,
    source: &DragSource,
    target: &DropTarget,
    config: &BuilderConfig,
) -> Result<(Document, ElementId, bool), Rejection> {
    let mut working = document.clone();

    let (element, created) = match source {
        DragSource::Palette(kind) => (Element::new(*kind), true),
        DragSource::Existing(id) => {
            let element = tree::remove(&mut working.elements, id.as_str())
                .ok_or_else(|| Rejection::SourceNotFound(id.clone()))?;
            (element, false)
        }
    };

    let (container, index) = placement(&working, target)?;
    check_placement(&working, &element, &container, index, config)?;

    let placed = element.id.clone();
    let children = tree::sequence_mut(&mut working.elements, &container)
        .ok_or_else(|| Rejection::TargetNotFound(container.to_string()))?;
    children.insert(index, element);

    Ok((working, placed, created))
}

/// The sequence and index a drop lands at.
fn placement(document: &Document, target: &DropTarget) -> Result<(ContainerRef, usize), Rejection> {
    match target {
        DropTarget::Placeholder(ContainerRef::Root) => {
            Ok((ContainerRef::Root, document.elements.len()))
        }
        DropTarget::Placeholder(container @ ContainerRef::Element(id)) => {
            let owner = document
                .find(id.as_str())
                .ok_or_else(|| Rejection::TargetNotFound(id.to_string()))?;
            if !owner.is_container() {
                return Err(Rejection::NotAContainer(id.clone()));
            }
            Ok((container.clone(), owner.children().len()))
        }
        DropTarget::Element(id) => {
            tree::locate(&document.elements, id.as_str())
                .ok_or_else(|| Rejection::TargetNotFound(id.to_string()))
        }
    }
}

fn check_placement(
    document: &Document,
    element: &Element,
    container: &ContainerRef,
    index: usize,
    config: &BuilderConfig,
) -> Result<(), Rejection> {
    let kind = element.kind();
    if kind == ElementKind::Section && !container.is_root() {
        return Err(Rejection::SectionOutsideRoot);
    }
    if tree::container_kind(&document.elements, container) == Some(ElementKind::Grid)
        && kind != ElementKind::Column
    {
        return Err(Rejection::NonColumnInGrid);
    }
    if kind == ElementKind::Grid && config.reject_adjacent_grids && !container.is_root() {
        let siblings = tree::sequence(&document.elements, container).unwrap_or_default();
        let before = index.checked_sub(1).and_then(|i| siblings.get(i));
        let after = siblings.get(index);
        if [before, after]
            .into_iter()
            .flatten()
            .any(|e| e.kind() == ElementKind::Grid)
        {
            return Err(Rejection::GridBesideGrid);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ROOT_ID;
    use std::collections::HashSet;

    fn node(kind: ElementKind, id: &str, children: Vec<Element>) -> Element {
        let mut element = Element::new(kind);
        element.id = ElementId::from(id);
        if let Some(slot) = element.children_mut() {
            *slot = children;
        }
        element
    }

    fn drop(document: &Document, source: DragSource, target: &str) -> DragOutcome {
        let mut controller = DragController::default();
        assert_eq!(controller.handle(DragEvent::Start(source), document), DragOutcome::Started);
        controller.handle(DragEvent::Drop(Some(DropTarget::parse(target))), document)
    }

    fn committed(outcome: DragOutcome) -> (Document, ElementId, bool) {
        match outcome {
            DragOutcome::Committed {
                document,
                placed,
                created,
            } => (document, placed, created),
            other => panic!("expected commit, got {other:?}"),
        }
    }

    fn child_ids(document: &Document, container: &str) -> Vec<String> {
        let children = match container {
            ROOT_ID => &document.elements[..],
            id => document.find(id).unwrap().children(),
        };
        children.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_parse_droppable_ids() {
        assert_eq!(DropTarget::parse("placeholder-root"), DropTarget::Placeholder(ContainerRef::Root));
        assert_eq!(
            DropTarget::parse("placeholder-col-1"),
            DropTarget::Placeholder(ContainerRef::Element(ElementId::from("col-1")))
        );
        assert_eq!(DropTarget::parse("text-1"), DropTarget::Element(ElementId::from("text-1")));
        assert_eq!(DropTarget::parse("placeholder-col-1").droppable_id(), "placeholder-col-1");
    }

    #[test]
    fn test_palette_heading_into_empty_root() {
        let doc = Document::new();
        let (doc, placed, created) =
            committed(drop(&doc, DragSource::Palette(ElementKind::Heading), "placeholder-root"));

        assert!(created);
        assert_eq!(doc.elements.len(), 1);
        let heading = &doc.elements[0];
        assert_eq!(heading.id, placed);
        assert_eq!(heading.kind(), ElementKind::Heading);
        assert!(heading.children().is_empty());
    }

    #[test]
    fn test_text_into_grid_rejected() {
        let grid = node(
            ElementKind::Grid,
            "g1",
            vec![node(ElementKind::Column, "c1", vec![]), node(ElementKind::Column, "c2", vec![])],
        );
        let doc = Document::from_elements(vec![node(ElementKind::Section, "s1", vec![grid])]);

        let outcome = drop(&doc, DragSource::Palette(ElementKind::Text), "placeholder-g1");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::NonColumnInGrid));

        // Also as a sibling of a column
        let outcome = drop(&doc, DragSource::Palette(ElementKind::Text), "c2");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::NonColumnInGrid));
    }

    #[test]
    fn test_move_before_target_in_same_container() {
        let column = node(
            ElementKind::Column,
            "c1",
            vec![
                node(ElementKind::Heading, "A", vec![]),
                node(ElementKind::Text, "B", vec![]),
                node(ElementKind::Button, "C", vec![]),
            ],
        );
        let grid = node(ElementKind::Grid, "g1", vec![column, node(ElementKind::Column, "c2", vec![])]);
        let doc = Document::from_elements(vec![node(ElementKind::Section, "s1", vec![grid])]);

        let (doc, placed, created) = committed(drop(&doc, DragSource::Existing("C".into()), "A"));
        assert!(!created);
        assert_eq!(placed, "C");
        assert_eq!(child_ids(&doc, "c1"), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_section_into_column_rejected() {
        let column = node(ElementKind::Column, "c1", vec![node(ElementKind::Text, "t1", vec![])]);
        let grid = node(ElementKind::Grid, "g1", vec![column, node(ElementKind::Column, "c2", vec![])]);
        let doc = Document::from_elements(vec![
            node(ElementKind::Section, "s1", vec![grid]),
            node(ElementKind::Section, "s2", vec![]),
        ]);

        for target in ["placeholder-c1", "t1"] {
            let outcome = drop(&doc, DragSource::Existing("s2".into()), target);
            assert_eq!(outcome, DragOutcome::Rejected(Rejection::SectionOutsideRoot));
        }
        let outcome = drop(&doc, DragSource::Palette(ElementKind::Section), "placeholder-s1");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::SectionOutsideRoot));
    }

    #[test]
    fn test_rejection_leaves_document_untouched() {
        let doc = Document::from_elements(vec![
            node(ElementKind::Section, "s1", vec![node(ElementKind::Text, "t1", vec![])]),
            node(ElementKind::Section, "s2", vec![]),
        ]);
        let before = doc.clone();
        let outcome = drop(&doc, DragSource::Existing("s2".into()), "t1");
        assert!(matches!(outcome, DragOutcome::Rejected(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_placeholder_on_leaf_rejected() {
        let doc = Document::from_elements(vec![node(ElementKind::Text, "t1", vec![])]);
        let outcome = drop(&doc, DragSource::Palette(ElementKind::Image), "placeholder-t1");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::NotAContainer("t1".into())));
    }

    #[test]
    fn test_drop_into_own_subtree_rejected() {
        let doc = Document::from_elements(vec![node(
            ElementKind::Section,
            "s1",
            vec![node(ElementKind::Text, "t1", vec![])],
        )]);
        let outcome = drop(&doc, DragSource::Existing("s1".into()), "t1");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::TargetNotFound("t1".to_string())));
        let outcome = drop(&doc, DragSource::Existing("s1".into()), "placeholder-s1");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::TargetNotFound("s1".to_string())));
    }

    #[test]
    fn test_drop_on_itself_is_a_no_op() {
        let doc = Document::from_elements(vec![node(
            ElementKind::Section,
            "s1",
            vec![node(ElementKind::Text, "t1", vec![])],
        )]);
        let mut controller = DragController::default();
        controller.handle(DragEvent::Start(DragSource::Existing("t1".into())), &doc);
        assert_eq!(
            controller.handle(DragEvent::Drop(Some(DropTarget::parse("t1"))), &doc),
            DragOutcome::Cancelled
        );
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_missing_source_rejected() {
        let doc = Document::new();
        let outcome = drop(&doc, DragSource::Existing("ghost".into()), "placeholder-root");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::SourceNotFound("ghost".into())));
    }

    #[test]
    fn test_missed_drop_zone() {
        let doc = Document::new();
        let mut controller = DragController::default();
        controller.handle(DragEvent::Start(DragSource::Palette(ElementKind::Text)), &doc);
        assert_eq!(
            controller.handle(DragEvent::Drop(None), &doc),
            DragOutcome::Rejected(Rejection::MissedDropZone)
        );
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_grid_beside_grid() {
        let inner = node(
            ElementKind::Grid,
            "g1",
            vec![node(ElementKind::Column, "c1", vec![]), node(ElementKind::Column, "c2", vec![])],
        );
        let doc = Document::from_elements(vec![node(
            ElementKind::Section,
            "s1",
            vec![inner, node(ElementKind::Text, "t1", vec![])],
        )]);

        // Before the text, i.e. right after the grid
        let outcome = drop(&doc, DragSource::Palette(ElementKind::Grid), "t1");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::GridBesideGrid));
        // Before the grid
        let outcome = drop(&doc, DragSource::Palette(ElementKind::Grid), "g1");
        assert_eq!(outcome, DragOutcome::Rejected(Rejection::GridBesideGrid));
        // After the text is fine
        let (doc_after, _, _) =
            committed(drop(&doc, DragSource::Palette(ElementKind::Grid), "placeholder-s1"));
        assert_eq!(doc_after.find("s1").unwrap().children().len(), 3);

        let mut controller = DragController::new(BuilderConfig {
            reject_adjacent_grids: false,
            ..Default::default()
        });
        controller.handle(DragEvent::Start(DragSource::Palette(ElementKind::Grid)), &doc);
        let outcome = controller.handle(DragEvent::Drop(Some(DropTarget::parse("g1"))), &doc);
        assert!(matches!(outcome, DragOutcome::Committed { .. }));
    }

    #[test]
    fn test_grids_may_touch_at_root() {
        let doc = Document::from_elements(vec![Element::new(ElementKind::Grid)]);
        let outcome = drop(&doc, DragSource::Palette(ElementKind::Grid), "placeholder-root");
        assert!(matches!(outcome, DragOutcome::Committed { .. }));
    }

    #[test]
    fn test_column_may_join_grid() {
        let grid = node(
            ElementKind::Grid,
            "g1",
            vec![node(ElementKind::Column, "c1", vec![]), node(ElementKind::Column, "c2", vec![])],
        );
        let doc = Document::from_elements(vec![grid, node(ElementKind::Column, "loose", vec![])]);
        let (doc, _, _) = committed(drop(&doc, DragSource::Existing("loose".into()), "placeholder-g1"));
        assert_eq!(child_ids(&doc, "g1"), vec!["c1", "c2", "loose"]);
    }

    #[test]
    fn test_state_machine_transitions() {
        let doc = Document::new();
        let mut controller = DragController::default();

        assert_eq!(controller.handle(DragEvent::Drop(None), &doc), DragOutcome::Ignored);
        assert_eq!(controller.handle(DragEvent::Cancel, &doc), DragOutcome::Ignored);

        controller.handle(DragEvent::Start(DragSource::Palette(ElementKind::Button)), &doc);
        assert_eq!(controller.dragged_kind(), Some(ElementKind::Button));
        assert_eq!(
            controller.handle(DragEvent::Start(DragSource::Palette(ElementKind::Image)), &doc),
            DragOutcome::Ignored
        );
        assert_eq!(controller.dragged_kind(), Some(ElementKind::Button));

        assert_eq!(controller.handle(DragEvent::Cancel, &doc), DragOutcome::Cancelled);
        assert_eq!(controller.state(), &DragState::Idle);
    }

    #[test]
    fn test_ids_stay_unique_across_drops() {
        let mut doc = Document::new();
        let mut controller = DragController::default();
        let steps = [
            (DragSource::Palette(ElementKind::Section), "placeholder-root".to_string()),
            (DragSource::Palette(ElementKind::Grid), "placeholder-root".to_string()),
            (DragSource::Palette(ElementKind::Heading), "placeholder-root".to_string()),
        ];
        for (source, target) in steps {
            controller.handle(DragEvent::Start(source), &doc);
            let outcome = controller.handle(DragEvent::Drop(Some(DropTarget::parse(&target))), &doc);
            doc = committed(outcome).0;
        }
        // Move the heading into the grid's first column
        let column = doc.elements[1].children()[0].id.to_string();
        let heading = doc.elements[2].id.clone();
        controller.handle(DragEvent::Start(DragSource::Existing(heading)), &doc);
        let outcome = controller.handle(
            DragEvent::Drop(Some(DropTarget::parse(&format!("placeholder-{column}")))),
            &doc,
        );
        doc = committed(outcome).0;

        let ids = doc.ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(doc.len(), 5);
        assert!(doc.violations().is_empty());
    }
}
