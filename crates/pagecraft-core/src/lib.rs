//! PageCraft Core Library
//!
//! Page document model and editing logic for the PageCraft page builder:
//! the typed element tree, tree queries and edits, drag-and-drop placement,
//! the editing session and page persistence.

pub mod canvas;
pub mod config;
pub mod document;
pub mod drag;
pub mod element;
pub mod notification;
pub mod page;
pub mod seo;
pub mod storage;
pub mod tree;
pub mod widget;

pub use canvas::{Canvas, PendingSave, SaveReceipt};
pub use config::BuilderConfig;
pub use document::{Document, Violation};
pub use drag::{DragController, DragEvent, DragOutcome, DragSource, DragState, DropTarget, Rejection};
pub use element::{
    ContentField, Element, ElementBody, ElementId, ElementKind, ElementUpdate, HeadingLevel,
    StyleProperty, UpdateError,
};
pub use notification::{Notification, NotificationLevel, Notifications};
pub use page::{Page, PageStatus};
pub use seo::{SeoError, SeoGenerator, SeoMetadata, SeoRequest, TemplateSeoGenerator};
pub use storage::{FileStorage, MemoryStorage, PageSummary, Storage, StorageError, StorageResult};
pub use tree::{ContainerRef, TreeError, MAX_GRID_COLUMNS};
pub use widget::{PanelTab, WidgetState};
