//! UI state of canvas elements and the property panel.

use serde::{Deserialize, Serialize};

/// The UI state of an element on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Pointer is over the element.
    Hovered,
    /// Element is selected (its properties are shown in the panel).
    Selected,
}

impl WidgetState {
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected)
    }

    /// Whether the element is outlined and badged in the editable canvas.
    pub fn is_highlighted(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Tab of the right-hand property panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTab {
    /// Content and styles of the selected element.
    #[default]
    Design,
    /// Page title, slug and status.
    Page,
    Seo,
}

impl PanelTab {
    pub fn all() -> &'static [PanelTab] {
        &[PanelTab::Design, PanelTab::Page, PanelTab::Seo]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelTab::Design => "Design",
            PanelTab::Page => "Page",
            PanelTab::Seo => "SEO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_state() {
        assert!(!WidgetState::Normal.is_highlighted());
        assert!(WidgetState::Hovered.is_highlighted());
        assert!(WidgetState::Selected.is_selected());
        assert!(!WidgetState::Hovered.is_selected());
    }

    #[test]
    fn test_panel_tab_serde() {
        assert_eq!(serde_json::to_string(&PanelTab::Seo).unwrap(), r#""seo""#);
        assert_eq!(PanelTab::default(), PanelTab::Design);
    }
}
