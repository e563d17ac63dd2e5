//! Element definitions for the page document.

mod content;
mod style;

pub use content::{
    ButtonContent, ContentField, HeadingContent, HeadingLevel, ImageContent, NoContent,
    TextContent, PLACEHOLDER_IMAGE_SRC,
};
pub use style::{
    ButtonStyles, ColumnStyles, GridStyles, HeadingStyles, ImageStyles, SectionStyles,
    StyleProperty, StyleRecord, TextStyles,
};

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for elements.
///
/// Generated ids look like `el-<uuid>`, but ids read back from storage are
/// opaque strings and are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh, never-before-used id.
    pub fn generate() -> Self {
        Self(format!("el-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The fixed set of element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Section,
    Grid,
    Column,
    Heading,
    Text,
    Button,
    Image,
}

impl ElementKind {
    /// Kinds offered in the builder palette, with their display labels.
    pub const PALETTE: &'static [(ElementKind, &'static str)] = &[
        (ElementKind::Section, "Section"),
        (ElementKind::Grid, "Grid"),
        (ElementKind::Heading, "Heading"),
        (ElementKind::Text, "Text Block"),
        (ElementKind::Button, "Button"),
        (ElementKind::Image, "Image"),
    ];

    /// Variant name as stored in the `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Section => "Section",
            ElementKind::Grid => "Grid",
            ElementKind::Column => "Column",
            ElementKind::Heading => "Heading",
            ElementKind::Text => "Text",
            ElementKind::Button => "Button",
            ElementKind::Image => "Image",
        }
    }

    /// Whether elements of this kind own a child sequence.
    pub fn is_container(&self) -> bool {
        matches!(self, ElementKind::Section | ElementKind::Grid | ElementKind::Column)
    }

    /// Whether elements of this kind honor a style property.
    pub fn supports_style(&self, property: StyleProperty) -> bool {
        match self {
            ElementKind::Section => SectionStyles::supports(property),
            ElementKind::Grid => GridStyles::supports(property),
            ElementKind::Column => ColumnStyles::supports(property),
            ElementKind::Heading => HeadingStyles::supports(property),
            ElementKind::Text => TextStyles::supports(property),
            ElementKind::Button => ButtonStyles::supports(property),
            ElementKind::Image => ImageStyles::supports(property),
        }
    }

    /// Whether the builder palette offers this kind.
    pub fn in_palette(&self) -> bool {
        Self::PALETTE.iter().any(|(kind, _)| kind == self)
    }

    /// Get all element kinds.
    pub fn all() -> &'static [ElementKind] {
        &[
            ElementKind::Section,
            ElementKind::Grid,
            ElementKind::Column,
            ElementKind::Heading,
            ElementKind::Text,
            ElementKind::Button,
            ElementKind::Image,
        ]
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::all()
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown element type: {s}"))
    }
}

/// Variant-specific payload of an element, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementBody {
    Section {
        #[serde(default)]
        content: NoContent,
        #[serde(default)]
        styles: SectionStyles,
        #[serde(default)]
        children: Vec<Element>,
    },
    Grid {
        #[serde(default)]
        content: NoContent,
        #[serde(default)]
        styles: GridStyles,
        #[serde(default)]
        children: Vec<Element>,
    },
    Column {
        #[serde(default)]
        content: NoContent,
        #[serde(default)]
        styles: ColumnStyles,
        #[serde(default)]
        children: Vec<Element>,
    },
    Heading {
        #[serde(default)]
        content: HeadingContent,
        #[serde(default)]
        styles: HeadingStyles,
    },
    Text {
        #[serde(default)]
        content: TextContent,
        #[serde(default)]
        styles: TextStyles,
    },
    Button {
        #[serde(default)]
        content: ButtonContent,
        #[serde(default)]
        styles: ButtonStyles,
    },
    Image {
        #[serde(default)]
        content: ImageContent,
        #[serde(default)]
        styles: ImageStyles,
    },
}

impl ElementBody {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementBody::Section { .. } => ElementKind::Section,
            ElementBody::Grid { .. } => ElementKind::Grid,
            ElementBody::Column { .. } => ElementKind::Column,
            ElementBody::Heading { .. } => ElementKind::Heading,
            ElementBody::Text { .. } => ElementKind::Text,
            ElementBody::Button { .. } => ElementKind::Button,
            ElementBody::Image { .. } => ElementKind::Image,
        }
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub body: ElementBody,
}

impl Element {
    /// Create a new element of the given kind with its initial content and
    /// styles. A Grid starts with two empty Columns.
    pub fn new(kind: ElementKind) -> Self {
        let body = match kind {
            ElementKind::Section => ElementBody::Section {
                content: NoContent {},
                styles: SectionStyles::initial(),
                children: Vec::new(),
            },
            ElementKind::Grid => ElementBody::Grid {
                content: NoContent {},
                styles: GridStyles::initial(),
                children: vec![Self::new(ElementKind::Column), Self::new(ElementKind::Column)],
            },
            ElementKind::Column => ElementBody::Column {
                content: NoContent {},
                styles: ColumnStyles::initial(),
                children: Vec::new(),
            },
            ElementKind::Heading => ElementBody::Heading {
                content: HeadingContent::default(),
                styles: HeadingStyles::initial(),
            },
            ElementKind::Text => ElementBody::Text {
                content: TextContent::default(),
                styles: TextStyles::initial(),
            },
            ElementKind::Button => ElementBody::Button {
                content: ButtonContent::default(),
                styles: ButtonStyles::initial(),
            },
            ElementKind::Image => ElementBody::Image {
                content: ImageContent::default(),
                styles: ImageStyles::initial(),
            },
        };
        Self {
            id: ElementId::generate(),
            body,
        }
    }

    /// Create an element with a specific id and body.
    pub fn with_id(id: impl Into<ElementId>, body: ElementBody) -> Self {
        Self { id: id.into(), body }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Children of this element (always empty for leaves).
    pub fn children(&self) -> &[Element] {
        match &self.body {
            ElementBody::Section { children, .. }
            | ElementBody::Grid { children, .. }
            | ElementBody::Column { children, .. } => children,
            _ => &[],
        }
    }

    /// Mutable child sequence, or `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.body {
            ElementBody::Section { children, .. }
            | ElementBody::Grid { children, .. }
            | ElementBody::Column { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Value of a style property, if the variant honors it and it is set.
    pub fn style(&self, property: StyleProperty) -> Option<&str> {
        match &self.body {
            ElementBody::Section { styles, .. } => styles.get(property),
            ElementBody::Grid { styles, .. } => styles.get(property),
            ElementBody::Column { styles, .. } => styles.get(property),
            ElementBody::Heading { styles, .. } => styles.get(property),
            ElementBody::Text { styles, .. } => styles.get(property),
            ElementBody::Button { styles, .. } => styles.get(property),
            ElementBody::Image { styles, .. } => styles.get(property),
        }
    }

    /// Type label shown on the canvas badge, e.g. `HEADING (H2)`.
    pub fn badge_label(&self) -> String {
        match &self.body {
            ElementBody::Heading { content, .. } => {
                format!("HEADING ({})", content.level.tag().to_uppercase())
            }
            _ => self.kind().name().to_uppercase(),
        }
    }

    /// Apply a partial update atomically: either every field is applied or
    /// none is.
    pub fn apply(&mut self, update: &ElementUpdate) -> Result<(), UpdateError> {
        let mut body = self.body.clone();
        for (&field, value) in &update.content {
            apply_content(&mut body, field, value)?;
        }
        let kind = self.kind();
        if let Some(&property) = update.styles.keys().find(|&&p| !kind.supports_style(p)) {
            return Err(UpdateError::UnsupportedStyle { kind, property });
        }
        for (&property, value) in &update.styles {
            apply_style(&mut body, property, value);
        }
        self.body = body;
        Ok(())
    }

    /// Iterate over this element and all its descendants, pre-order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }
}

fn apply_content(body: &mut ElementBody, field: ContentField, value: &str) -> Result<(), UpdateError> {
    let kind = body.kind();

    match (body, field) {
        (ElementBody::Heading { content, .. }, ContentField::Text) => content.text = value.to_string(),
        (ElementBody::Heading { content, .. }, ContentField::Level) => {
            content.level = value.parse().map_err(|_| UpdateError::InvalidValue {
                field,
                value: value.to_string(),
            })?;
        }
        (ElementBody::Text { content, .. }, ContentField::Text) => content.text = value.to_string(),
        (ElementBody::Button { content, .. }, ContentField::Text) => content.text = value.to_string(),
        (ElementBody::Button { content, .. }, ContentField::Url) => content.url = value.to_string(),
        (ElementBody::Image { content, .. }, ContentField::Src) => content.src = value.to_string(),
        (ElementBody::Image { content, .. }, ContentField::Alt) => content.alt = value.to_string(),
        _ => return Err(UpdateError::UnsupportedContent { kind, field }),
    }
    Ok(())
}

fn apply_style(body: &mut ElementBody, property: StyleProperty, value: &str) {
    let applied = match body {
        ElementBody::Section { styles, .. } => styles.set(property, value),
        ElementBody::Grid { styles, .. } => styles.set(property, value),
        ElementBody::Column { styles, .. } => styles.set(property, value),
        ElementBody::Heading { styles, .. } => styles.set(property, value),
        ElementBody::Text { styles, .. } => styles.set(property, value),
        ElementBody::Button { styles, .. } => styles.set(property, value),
        ElementBody::Image { styles, .. } => styles.set(property, value),
    };
    debug_assert!(applied, "{property} was checked against the variant");
}

/// A partial edit of an element's content and styles, as produced by the
/// property panel. Applied as a shallow merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementUpdate {
    #[serde(default)]
    pub content: BTreeMap<ContentField, String>,
    #[serde(default)]
    pub styles: BTreeMap<StyleProperty, String>,
}

impl ElementUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a content field.
    pub fn content(mut self, field: ContentField, value: impl Into<String>) -> Self {
        self.content.insert(field, value.into());
        self
    }

    /// Set a style property (an empty value clears it).
    pub fn style(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.styles.insert(property, value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.styles.is_empty()
    }
}

/// Errors applying an [`ElementUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("{kind} elements have no `{field}` content")]
    UnsupportedContent { kind: ElementKind, field: ContentField },
    #[error("{kind} elements do not support the `{property}` style")]
    UnsupportedStyle { kind: ElementKind, property: StyleProperty },
    #[error("invalid value for `{field}`: {value}")]
    InvalidValue { field: ContentField, value: String },
}
