//! Typed content payloads for leaf elements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder image used by freshly created Image elements.
pub const PLACEHOLDER_IMAGE_SRC: &str =
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=80&w=2564";

/// Content of a container element. Containers carry no content, but the
/// stored shape always has an (empty) `content` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoContent {}

/// Heading level, serialized as the HTML tag name (`"h1"` .. `"h6"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// The HTML tag for this level.
    pub fn tag(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }

    /// Get all heading levels, largest first.
    pub fn all() -> &'static [HeadingLevel] {
        &[
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H3,
            HeadingLevel::H4,
            HeadingLevel::H5,
            HeadingLevel::H6,
        ]
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for HeadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeadingLevel::all()
            .iter()
            .copied()
            .find(|level| level.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("not a heading level: {s}"))
    }
}

/// Content of a Heading element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingContent {
    pub text: String,
    pub level: HeadingLevel,
}

impl Default for HeadingContent {
    fn default() -> Self {
        Self {
            text: "New Heading".to_string(),
            level: HeadingLevel::H2,
        }
    }
}

/// Content of a Text (paragraph) element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub text: String,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: "Start typing your content here.".to_string(),
        }
    }
}

/// Content of a Button element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonContent {
    pub text: String,
    pub url: String,
}

impl Default for ButtonContent {
    fn default() -> Self {
        Self {
            text: "Click Me".to_string(),
            url: "#".to_string(),
        }
    }
}

/// Content of an Image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            src: PLACEHOLDER_IMAGE_SRC.to_string(),
            alt: "Placeholder Image".to_string(),
        }
    }
}

/// A content field that a property edit may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentField {
    Text,
    Level,
    Url,
    Src,
    Alt,
}

impl ContentField {
    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            ContentField::Text => "text",
            ContentField::Level => "level",
            ContentField::Url => "url",
            ContentField::Src => "src",
            ContentField::Alt => "alt",
        }
    }
}

impl fmt::Display for ContentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
