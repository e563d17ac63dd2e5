//! Builder session: the page being edited and everything the editor tracks
//! around it.

use crate::config::BuilderConfig;
use crate::document::Document;
use crate::drag::{DragController, DragEvent, DragOutcome, Rejection};
use crate::element::{Element, ElementId, ElementUpdate};
use crate::notification::{Notification, Notifications};
use crate::page::{Page, PageStatus};
use crate::seo::{SeoError, SeoMetadata, SeoRequest};
use crate::storage::{Storage, StorageResult};
use crate::widget::{PanelTab, WidgetState};

/// An editing session over one page.
///
/// All tree edits are synchronous. Saving is split into
/// [`Canvas::begin_save`], [`PendingSave::run`] and [`Canvas::finish_save`]
/// so the canvas is never borrowed across an await.
#[derive(Debug, Clone)]
pub struct Canvas {
    page: Page,
    selection: Option<ElementId>,
    hovered: Option<ElementId>,
    panel_tab: PanelTab,
    drag: DragController,
    config: BuilderConfig,
    /// Bumped on every change to the page.
    revision: u64,
    /// Revision last confirmed as persisted.
    saved_revision: u64,
    saving: bool,
    pub notifications: Notifications,
}

impl Canvas {
    /// Open a page for editing.
    pub fn new(page: Page, config: BuilderConfig) -> Self {
        for violation in page.content.violations() {
            log::warn!("page {}: {}", page.id, violation);
        }
        Self {
            page,
            selection: None,
            hovered: None,
            panel_tab: PanelTab::default(),
            drag: DragController::new(config.clone()),
            config,
            revision: 0,
            saved_revision: 0,
            saving: false,
            notifications: Notifications::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn document(&self) -> &Document {
        &self.page.content
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Whether there are changes not yet confirmed as saved.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // --- Selection, hover and panel ---

    pub fn selection(&self) -> Option<&ElementId> {
        self.selection.as_ref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selection
            .as_ref()
            .and_then(|id| self.page.content.find(id.as_str()))
    }

    /// Select an element and show its properties. Returns false if the id is
    /// not in the document.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.page.content.contains(id) {
            log::debug!("select: no element {id}");
            return false;
        }
        self.selection = Some(ElementId::from(id));
        self.panel_tab = PanelTab::Design;
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn hovered(&self) -> Option<&ElementId> {
        self.hovered.as_ref()
    }

    pub fn set_hovered(&mut self, id: Option<&str>) {
        self.hovered = id.map(ElementId::from);
    }

    pub fn panel_tab(&self) -> PanelTab {
        self.panel_tab
    }

    pub fn set_panel_tab(&mut self, tab: PanelTab) {
        self.panel_tab = tab;
    }

    /// UI state of an element. Selection wins over hover.
    pub fn widget_state(&self, id: &str) -> WidgetState {
        if self.selection.as_ref().is_some_and(|s| s == id) {
            WidgetState::Selected
        } else if self.hovered.as_ref().is_some_and(|h| h == id) {
            WidgetState::Hovered
        } else {
            WidgetState::Normal
        }
    }

    // --- Tree edits ---

    /// Feed a drag event. Returns the id of the placed element when a drop
    /// is committed, `Ok(None)` for events that do not end in a drop.
    pub fn handle_drag(&mut self, event: DragEvent) -> Result<Option<ElementId>, Rejection> {
        match self.drag.handle(event, &self.page.content) {
            DragOutcome::Committed {
                document,
                placed,
                created,
            } => {
                self.page.content = document;
                self.touch();
                if created {
                    self.selection = Some(placed.clone());
                    self.panel_tab = PanelTab::Design;
                }
                Ok(Some(placed))
            }
            DragOutcome::Rejected(rejection) => {
                self.notifications.push(Notification::error(rejection.to_string()));
                Err(rejection)
            }
            DragOutcome::Started | DragOutcome::Ignored | DragOutcome::Cancelled => Ok(None),
        }
    }

    /// Merge a property edit into an element. Invalid edits become an error
    /// notification and change nothing.
    pub fn update_element(&mut self, id: &str, update: &ElementUpdate) -> bool {
        match self.page.content.update(id, update) {
            Ok(true) => {
                self.touch();
                true
            }
            Ok(false) => false,
            Err(e) => {
                self.notifications.push(Notification::error(e.to_string()));
                false
            }
        }
    }

    /// Edit the selected element.
    pub fn update_selected(&mut self, update: &ElementUpdate) -> bool {
        match self.selection.clone() {
            Some(id) => self.update_element(id.as_str(), update),
            None => false,
        }
    }

    /// Delete an element and its subtree.
    ///
    /// Clears the selection if it pointed into the removed subtree.
    pub fn delete_element(&mut self, id: &str) -> Option<Element> {
        let removed = self.page.content.delete(id)?;
        self.touch();
        let gone = |target: &Option<ElementId>| {
            target
                .as_ref()
                .is_some_and(|t| removed.descendants().iter().any(|e| e.id == *t))
        };
        if gone(&self.selection) {
            self.selection = None;
        }
        if gone(&self.hovered) {
            self.hovered = None;
        }
        self.notifications.push(Notification::success("Element deleted"));
        Some(removed)
    }

    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selection.clone()?;
        self.delete_element(id.as_str())
    }

    /// Change a Grid's column count.
    pub fn set_column_count(&mut self, grid_id: &str, count: usize) -> bool {
        if !self.config.column_choices().contains(&count) {
            self.notifications.push(Notification::error(format!(
                "A grid can have between 1 and {} columns.",
                self.config.column_choices().end()
            )));
            return false;
        }
        match self.page.content.set_column_count(grid_id, count) {
            Ok(true) => {
                self.touch();
                // The selection may have lived in a dropped column.
                if let Some(id) = &self.selection {
                    if !self.page.content.contains(id.as_str()) {
                        self.selection = None;
                    }
                }
                true
            }
            Ok(false) => false,
            Err(e) => {
                self.notifications.push(Notification::error(e.to_string()));
                false
            }
        }
    }

    // --- Page settings ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.page.title = title.into();
        self.touch();
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.page.slug = slug.into();
        self.touch();
    }

    pub fn set_status(&mut self, status: PageStatus) {
        self.page.status = status;
        self.touch();
    }

    pub fn set_meta_title(&mut self, value: impl Into<String>) {
        self.page.seo.meta_title = Some(value.into());
        self.touch();
    }

    pub fn set_meta_description(&mut self, value: impl Into<String>) {
        self.page.seo.meta_description = Some(value.into());
        self.touch();
    }

    /// Set the focus keywords from comma-separated input.
    pub fn set_focus_keywords(&mut self, input: &str) {
        self.page.seo.focus_keywords = SeoMetadata::parse_keywords(input);
        self.touch();
    }

    // --- SEO generation ---

    /// Request for generating metadata for this page.
    pub fn seo_request(&self, site_name: &str) -> SeoRequest {
        SeoRequest {
            page_title: self.page.title.clone(),
            site_name: site_name.to_string(),
        }
    }

    /// Apply a generator result. Only page metadata changes.
    pub fn apply_seo(&mut self, result: Result<SeoMetadata, SeoError>) {
        match result {
            Ok(seo) => {
                self.page.apply_seo(seo);
                self.touch();
                self.notifications.push(Notification::success("AI optimized SEO metadata!"));
            }
            Err(e) => {
                log::warn!("SEO generation failed: {e}");
                self.notifications.push(Notification::error("Failed to reach AI."));
            }
        }
    }

    // --- Saving ---

    /// Snapshot the page for saving. Editing may continue meanwhile.
    pub fn begin_save(&mut self) -> PendingSave {
        self.saving = true;
        PendingSave {
            page: self.page.clone(),
            revision: self.revision,
        }
    }

    /// Record the result of a save.
    ///
    /// The canvas is clean afterwards only if nothing changed since the
    /// snapshot was taken.
    pub fn finish_save(&mut self, receipt: SaveReceipt) {
        self.saving = false;
        match receipt.result {
            Ok(()) => {
                self.saved_revision = self.saved_revision.max(receipt.revision);
                self.notifications.push(Notification::success("Saved to database!"));
            }
            Err(e) => {
                log::warn!("save of page {} failed: {e}", self.page.id);
                self.notifications.push(Notification::error("Failed to save."));
            }
        }
    }
}

/// A page snapshot on its way to storage.
#[derive(Debug, Clone)]
pub struct PendingSave {
    page: Page,
    revision: u64,
}

impl PendingSave {
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Write the snapshot to storage.
    pub async fn run(self, storage: &dyn Storage) -> SaveReceipt {
        let result = storage.save(&self.page).await;
        SaveReceipt {
            revision: self.revision,
            result,
        }
    }
}

/// Outcome of a [`PendingSave`], handed back to [`Canvas::finish_save`].
#[derive(Debug)]
pub struct SaveReceipt {
    revision: u64,
    pub result: StorageResult<()>,
}
