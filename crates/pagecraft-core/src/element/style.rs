//! Typed style records.
//!
//! Each element variant honors its own subset of presentation attributes.
//! Values stay plain CSS strings (`"1.5rem"`, `"#ffffff"`); only the set of
//! attribute names is fixed per variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A presentation attribute an element may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    BackgroundColor,
    Padding,
    Gap,
    AlignItems,
    Color,
    TextAlign,
    FontSize,
    FontWeight,
    LetterSpacing,
    LineHeight,
    BorderRadius,
    Width,
    MaxWidth,
}

impl StyleProperty {
    /// Name used in the stored document (camelCase).
    pub fn key(&self) -> &'static str {
        match self {
            StyleProperty::BackgroundColor => "backgroundColor",
            StyleProperty::Padding => "padding",
            StyleProperty::Gap => "gap",
            StyleProperty::AlignItems => "alignItems",
            StyleProperty::Color => "color",
            StyleProperty::TextAlign => "textAlign",
            StyleProperty::FontSize => "fontSize",
            StyleProperty::FontWeight => "fontWeight",
            StyleProperty::LetterSpacing => "letterSpacing",
            StyleProperty::LineHeight => "lineHeight",
            StyleProperty::BorderRadius => "borderRadius",
            StyleProperty::Width => "width",
            StyleProperty::MaxWidth => "maxWidth",
        }
    }

    /// CSS property name (kebab-case).
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::BackgroundColor => "background-color",
            StyleProperty::Padding => "padding",
            StyleProperty::Gap => "gap",
            StyleProperty::AlignItems => "align-items",
            StyleProperty::Color => "color",
            StyleProperty::TextAlign => "text-align",
            StyleProperty::FontSize => "font-size",
            StyleProperty::FontWeight => "font-weight",
            StyleProperty::LetterSpacing => "letter-spacing",
            StyleProperty::LineHeight => "line-height",
            StyleProperty::BorderRadius => "border-radius",
            StyleProperty::Width => "width",
            StyleProperty::MaxWidth => "max-width",
        }
    }

    /// Get all style properties.
    pub fn all() -> &'static [StyleProperty] {
        &[
            StyleProperty::BackgroundColor,
            StyleProperty::Padding,
            StyleProperty::Gap,
            StyleProperty::AlignItems,
            StyleProperty::Color,
            StyleProperty::TextAlign,
            StyleProperty::FontSize,
            StyleProperty::FontWeight,
            StyleProperty::LetterSpacing,
            StyleProperty::LineHeight,
            StyleProperty::BorderRadius,
            StyleProperty::Width,
            StyleProperty::MaxWidth,
        ]
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StyleProperty {
    type Err = String;

    /// Accepts either the stored camelCase key or the CSS name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleProperty::all()
            .iter()
            .copied()
            .find(|p| p.key() == s || p.css_name() == s)
            .ok_or_else(|| format!("unknown style property: {s}"))
    }
}

/// Common behavior of the per-variant style records.
pub trait StyleRecord {
    /// Properties this record recognizes, in declaration order.
    const PROPERTIES: &'static [StyleProperty];

    /// Mutable slot for a property, or `None` if the variant ignores it.
    fn slot(&mut self, property: StyleProperty) -> Option<&mut Option<String>>;

    /// Current value of a property.
    fn get(&self, property: StyleProperty) -> Option<&str>;

    /// Whether this record recognizes the property.
    fn supports(property: StyleProperty) -> bool {
        Self::PROPERTIES.contains(&property)
    }

    /// Set (or clear with an empty string) a property.
    /// Returns false if the property is not recognized.
    fn set(&mut self, property: StyleProperty, value: &str) -> bool {
        match self.slot(property) {
            Some(slot) => {
                *slot = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
                true
            }
            None => false,
        }
    }

    /// All set properties with their values, in declaration order.
    fn entries(&self) -> Vec<(StyleProperty, &str)> {
        Self::PROPERTIES
            .iter()
            .filter_map(|&p| self.get(p).map(|v| (p, v)))
            .collect()
    }
}

macro_rules! style_record {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $prop:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
        }

        impl StyleRecord for $name {
            const PROPERTIES: &'static [StyleProperty] = &[$(StyleProperty::$prop),+];

            fn slot(&mut self, property: StyleProperty) -> Option<&mut Option<String>> {
                match property {
                    $(StyleProperty::$prop => Some(&mut self.$field),)+
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }

            fn get(&self, property: StyleProperty) -> Option<&str> {
                match property {
                    $(StyleProperty::$prop => self.$field.as_deref(),)+
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    };
}

style_record! {
    /// Styles honored by a Section.
    SectionStyles { background_color => BackgroundColor, padding => Padding }
}

style_record! {
    /// Styles honored by a Grid.
    GridStyles { gap => Gap, padding => Padding, align_items => AlignItems }
}

style_record! {
    /// Styles honored by a Column.
    ColumnStyles { background_color => BackgroundColor, padding => Padding }
}

style_record! {
    /// Styles honored by a Heading.
    HeadingStyles {
        color => Color,
        text_align => TextAlign,
        font_size => FontSize,
        font_weight => FontWeight,
        letter_spacing => LetterSpacing,
    }
}

style_record! {
    /// Styles honored by a Text block.
    TextStyles {
        color => Color,
        text_align => TextAlign,
        font_size => FontSize,
        font_weight => FontWeight,
        line_height => LineHeight,
    }
}

style_record! {
    /// Styles honored by a Button.
    ButtonStyles {
        background_color => BackgroundColor,
        color => Color,
        border_radius => BorderRadius,
        padding => Padding,
        font_size => FontSize,
        font_weight => FontWeight,
        text_align => TextAlign,
    }
}

style_record! {
    /// Styles honored by an Image.
    ImageStyles { width => Width, max_width => MaxWidth, border_radius => BorderRadius }
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

// Initial styles given to freshly created elements.

impl SectionStyles {
    pub fn initial() -> Self {
        Self {
            background_color: some("#ffffff"),
            padding: some("4rem 2rem"),
        }
    }
}

impl GridStyles {
    pub fn initial() -> Self {
        Self {
            gap: some("1.5rem"),
            padding: some("1rem"),
            align_items: some("start"),
        }
    }
}

impl ColumnStyles {
    pub fn initial() -> Self {
        Self {
            background_color: None,
            padding: some("1rem"),
        }
    }
}

impl HeadingStyles {
    pub fn initial() -> Self {
        Self {
            color: some("#111827"),
            text_align: some("left"),
            font_size: some("2.25rem"),
            font_weight: some("700"),
            letter_spacing: None,
        }
    }
}

impl TextStyles {
    pub fn initial() -> Self {
        Self {
            color: some("#4b5563"),
            text_align: some("left"),
            font_size: some("1rem"),
            font_weight: None,
            line_height: some("1.6"),
        }
    }
}

impl ButtonStyles {
    pub fn initial() -> Self {
        Self {
            background_color: some("#2563eb"),
            color: some("#ffffff"),
            border_radius: some("0.5rem"),
            padding: some("0.75rem 1.5rem"),
            font_size: None,
            font_weight: None,
            text_align: some("center"),
        }
    }
}

impl ImageStyles {
    pub fn initial() -> Self {
        Self {
            width: some("100%"),
            max_width: None,
            border_radius: some("0.5rem"),
        }
    }
}
