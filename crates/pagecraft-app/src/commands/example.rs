use super::write_output;
use anyhow::Result;
use clap::Args;
use pagecraft_core::element::{ContentField, Element, ElementKind, ElementUpdate, HeadingLevel, StyleProperty};
use pagecraft_core::{Document, Page, PageStatus};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExampleArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn example(args: ExampleArgs) -> Result<()> {
    let page = example_page()?;
    write_output(args.output.as_ref(), &page.to_json()?)
}

fn edited(kind: ElementKind, update: ElementUpdate) -> Result<Element> {
    let mut element = Element::new(kind);
    element.apply(&update)?;
    Ok(element)
}

/// A small landing page: a hero section and a two-column feature grid.
pub fn example_page() -> Result<Page> {
    let hero = edited(
        ElementKind::Heading,
        ElementUpdate::new()
            .content(ContentField::Text, "Build pages that convert")
            .content(ContentField::Level, HeadingLevel::H1.tag())
            .style(StyleProperty::TextAlign, "center")
            .style(StyleProperty::FontSize, "3rem"),
    )?;
    let intro = edited(
        ElementKind::Text,
        ElementUpdate::new()
            .content(ContentField::Text, "Drag, drop and publish in minutes.")
            .style(StyleProperty::TextAlign, "center"),
    )?;
    let cta = edited(
        ElementKind::Button,
        ElementUpdate::new()
            .content(ContentField::Text, "Get started")
            .content(ContentField::Url, "/signup"),
    )?;

    let mut features = Element::new(ElementKind::Grid);
    if let Some(columns) = features.children_mut() {
        for (column, (title, body)) in columns.iter_mut().zip([
            ("Fast", "Pages render from a single JSON document."),
            ("Flexible", "Sections, grids and columns nest the way you need."),
        ]) {
            if let Some(children) = column.children_mut() {
                children.push(edited(
                    ElementKind::Heading,
                    ElementUpdate::new().content(ContentField::Text, title),
                )?);
                children.push(edited(
                    ElementKind::Text,
                    ElementUpdate::new().content(ContentField::Text, body),
                )?);
            }
        }
    }

    let mut section = Element::new(ElementKind::Section);
    if let Some(children) = section.children_mut() {
        children.extend([hero, intro, cta, features]);
    }

    let mut page = Page::new("Home", "home");
    page.status = PageStatus::Published;
    page.content = Document::from_elements(vec![section, Element::new(ElementKind::Image)]);
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_page_is_valid() {
        let page = example_page().unwrap();
        assert!(page.content.violations().is_empty());
        assert_eq!(page.content.len(), 12);
        let json = page.to_json().unwrap();
        assert_eq!(Page::from_json(&json).unwrap(), page);
    }
}
