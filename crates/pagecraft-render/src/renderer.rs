//! Renderer trait abstraction.

use pagecraft_core::{Canvas, Document, WidgetState};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Which surface a document is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The builder canvas: select targets, highlights, badges and drop zones.
    Editable,
    /// The public page: layout only.
    #[default]
    Live,
}

impl RenderMode {
    pub fn is_editable(self) -> bool {
        self == RenderMode::Editable
    }
}

/// Context for rendering one document.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The document to render.
    pub document: &'a Document,
    pub mode: RenderMode,
    /// Selected element (editable mode only).
    pub selected: Option<&'a str>,
    /// Hovered element (editable mode only).
    pub hovered: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(document: &'a Document, mode: RenderMode) -> Self {
        Self {
            document,
            mode,
            selected: None,
            hovered: None,
        }
    }

    pub fn live(document: &'a Document) -> Self {
        Self::new(document, RenderMode::Live)
    }

    pub fn editable(document: &'a Document) -> Self {
        Self::new(document, RenderMode::Editable)
    }

    /// Editable context reflecting a canvas's selection and hover.
    pub fn from_canvas(canvas: &'a Canvas) -> Self {
        Self::editable(canvas.document())
            .with_selected(canvas.selection().map(|id| id.as_str()))
            .with_hovered(canvas.hovered().map(|id| id.as_str()))
    }

    /// Set the selected element.
    pub fn with_selected(mut self, id: Option<&'a str>) -> Self {
        self.selected = id;
        self
    }

    /// Set the hovered element.
    pub fn with_hovered(mut self, id: Option<&'a str>) -> Self {
        self.hovered = id;
        self
    }

    /// UI state of an element in this context. Always normal when live.
    pub fn widget_state(&self, id: &str) -> WidgetState {
        if !self.mode.is_editable() {
            WidgetState::Normal
        } else if self.selected == Some(id) {
            WidgetState::Selected
        } else if self.hovered == Some(id) {
            WidgetState::Hovered
        } else {
            WidgetState::Normal
        }
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    type Output;

    /// Render the document described by `ctx`.
    fn render(&self, ctx: &RenderContext) -> RenderResult<Self::Output>;
}
