//! Builds the visual tree of a document.
//!
//! One dispatch serves both modes. Editable mode wraps every element in a
//! select target and adds badges and drop zones; all of those are marked as
//! decorations, so stripping them yields exactly the live tree.

use crate::renderer::RenderContext;
use crate::vnode::{Decoration, VNode};
use pagecraft_core::drag::DropTarget;
use pagecraft_core::element::{
    ButtonStyles, ColumnStyles, Element, ElementBody, GridStyles, HeadingStyles, ImageStyles,
    SectionStyles, StyleProperty, StyleRecord, TextStyles,
};
use pagecraft_core::tree::ContainerRef;

/// Width of the centered content block inside a Section.
pub const SECTION_MAX_WIDTH: &str = "1200px";

/// Class names used by the editable canvas.
pub mod class {
    pub const PAGE: &str = "pc-page";
    pub const ELEMENT: &str = "pc-element";
    pub const SELECTED: &str = "pc-selected";
    pub const HOVERED: &str = "pc-hovered";
    pub const BADGE: &str = "pc-badge";
    pub const DROP_ZONE: &str = "pc-drop-zone";
}

/// Attribute carrying a droppable id in editable mode.
pub const DROPPABLE_ATTR: &str = "data-droppable";

/// Build the visual tree for the context's document.
pub fn build_tree(ctx: &RenderContext) -> VNode {
    let mut root = VNode::element("div")
        .with_attr("class", class::PAGE)
        .with_children(ctx.document.elements.iter().map(|e| build_element(ctx, e)));
    if ctx.mode.is_editable() {
        root = root.with_child(drop_zone(&ContainerRef::Root, "Drag elements here"));
    }
    root
}

fn build_element(ctx: &RenderContext, element: &Element) -> VNode {
    let node = match &element.body {
        ElementBody::Section { styles, children, .. } => section(ctx, element, styles, children),
        ElementBody::Grid { styles, children, .. } => grid(ctx, styles, children),
        ElementBody::Column { styles, children, .. } => column(ctx, element, styles, children),
        ElementBody::Heading { content, styles } => {
            VNode::element(content.level.tag())
                .with_style("margin", "0")
                .with_styles(declarations(styles, &HeadingStyles::initial(), &[]))
                .with_child(VNode::text(&content.text))
        }
        ElementBody::Text { content, styles } => VNode::element("p")
            .with_style("margin", "0")
            .with_styles(declarations(styles, &TextStyles::initial(), &[]))
            .with_child(VNode::text(&content.text)),
        ElementBody::Button { content, styles } => button(content.text.as_str(), content.url.as_str(), styles),
        ElementBody::Image { content, styles } => VNode::element("img")
            .with_attr("src", &content.src)
            .with_attr("alt", &content.alt)
            .with_style("display", "block")
            .with_style("height", "auto")
            .with_styles(declarations(styles, &ImageStyles::initial(), &[])),
    };

    if ctx.mode.is_editable() {
        wrap_editable(ctx, element, node)
    } else {
        node
    }
}

fn section(ctx: &RenderContext, element: &Element, styles: &SectionStyles, children: &[Element]) -> VNode {
    let mut inner = VNode::element("div")
        .with_style("max-width", SECTION_MAX_WIDTH)
        .with_style("margin", "0 auto")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("gap", "1.5rem")
        .with_children(children.iter().map(|c| build_element(ctx, c)));
    if ctx.mode.is_editable() {
        inner = inner.with_child(drop_zone(&ContainerRef::Element(element.id.clone()), "Drop here"));
    }
    VNode::element("section")
        .with_styles(declarations(styles, &SectionStyles::initial(), &[]))
        .with_child(inner)
}

fn grid(ctx: &RenderContext, styles: &GridStyles, children: &[Element]) -> VNode {
    // Grids take no drop zone: only columns live directly inside them.
    let columns = children.len().max(1);
    VNode::element("div")
        .with_style("display", "grid")
        .with_style("grid-template-columns", format!("repeat({columns}, minmax(0, 1fr))"))
        .with_styles(declarations(styles, &GridStyles::initial(), &[]))
        .with_children(children.iter().map(|c| build_element(ctx, c)))
}

fn column(ctx: &RenderContext, element: &Element, styles: &ColumnStyles, children: &[Element]) -> VNode {
    let mut node = VNode::element("div")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("gap", "1rem")
        .with_styles(declarations(styles, &ColumnStyles::initial(), &[]))
        .with_children(children.iter().map(|c| build_element(ctx, c)));
    if ctx.mode.is_editable() {
        node = node.with_child(drop_zone(&ContainerRef::Element(element.id.clone()), "Drop here"));
    }
    node
}

fn button(text: &str, url: &str, styles: &ButtonStyles) -> VNode {
    let initial = ButtonStyles::initial();
    let align = styles
        .get(StyleProperty::TextAlign)
        .or(initial.get(StyleProperty::TextAlign))
        .unwrap_or("center");
    let justify = match align {
        "left" | "start" => "flex-start",
        "right" | "end" => "flex-end",
        _ => "center",
    };
    let link = VNode::element("a")
        .with_attr("href", url)
        .with_style("display", "inline-block")
        .with_style("text-decoration", "none")
        .with_styles(declarations(styles, &initial, &[StyleProperty::TextAlign]))
        .with_child(VNode::text(text));
    VNode::element("div")
        .with_style("display", "flex")
        .with_style("justify-content", justify)
        .with_child(link)
}

/// CSS declarations for a style record, falling back to `initial` for unset
/// properties.
fn declarations<R: StyleRecord>(styles: &R, initial: &R, skip: &[StyleProperty]) -> Vec<(String, String)> {
    R::PROPERTIES
        .iter()
        .filter(|p| !skip.contains(p))
        .filter_map(|&p| {
            styles
                .get(p)
                .or_else(|| initial.get(p))
                .map(|v| (p.css_name().to_string(), v.to_string()))
        })
        .collect()
}

fn wrap_editable(ctx: &RenderContext, element: &Element, node: VNode) -> VNode {
    let state = ctx.widget_state(element.id.as_str());
    let mut classes = class::ELEMENT.to_string();
    if state.is_selected() {
        classes.push(' ');
        classes.push_str(class::SELECTED);
    } else if state.is_highlighted() {
        classes.push(' ');
        classes.push_str(class::HOVERED);
    }

    let mut wrapper = VNode::element("div")
        .with_editor_attr("class", classes)
        .with_editor_attr("data-element-id", element.id.as_str())
        .with_editor_attr(DROPPABLE_ATTR, DropTarget::Element(element.id.clone()).droppable_id())
        .with_select(element.id.clone())
        .with_decoration(Decoration::Wrapper);
    if state.is_highlighted() {
        wrapper = wrapper.with_child(
            VNode::element("span")
                .with_editor_attr("class", class::BADGE)
                .with_decoration(Decoration::Node)
                .with_child(VNode::text(element.badge_label())),
        );
    }
    wrapper.with_child(node)
}

fn drop_zone(container: &ContainerRef, label: &str) -> VNode {
    VNode::element("div")
        .with_editor_attr("class", class::DROP_ZONE)
        .with_editor_attr(DROPPABLE_ATTR, DropTarget::placeholder_id(container))
        .with_decoration(Decoration::Node)
        .with_child(VNode::text(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::element::{ElementId, ElementKind};
    use pagecraft_core::Document;

    fn node(kind: ElementKind, id: &str, children: Vec<Element>) -> Element {
        let mut element = Element::new(kind);
        element.id = ElementId::from(id);
        if let Some(slot) = element.children_mut() {
            *slot = children;
        }
        element
    }

    fn sample() -> Document {
        let grid = node(
            ElementKind::Grid,
            "g1",
            vec![
                node(ElementKind::Column, "c1", vec![node(ElementKind::Heading, "h1", vec![])]),
                node(ElementKind::Column, "c2", vec![node(ElementKind::Button, "b1", vec![])]),
                node(ElementKind::Column, "c3", vec![node(ElementKind::Image, "i1", vec![])]),
            ],
        );
        Document::from_elements(vec![
            node(ElementKind::Section, "s1", vec![grid]),
            node(ElementKind::Text, "t1", vec![]),
        ])
    }

    fn droppables(node: &VNode, out: &mut Vec<String>) {
        if node.decoration() == Decoration::Node {
            if let Some(id) = node.attr(DROPPABLE_ATTR) {
                out.push(id.to_string());
            }
        }
        for child in node.children() {
            droppables(child, out);
        }
    }

    #[test]
    fn test_editable_minus_decorations_equals_live() {
        let doc = sample();
        let editable = build_tree(
            &RenderContext::editable(&doc)
                .with_selected(Some("h1"))
                .with_hovered(Some("b1")),
        );
        let live = build_tree(&RenderContext::live(&doc));
        assert_ne!(editable, live);
        assert_eq!(editable.without_decorations(), live);
    }

    #[test]
    fn test_live_tree_has_no_editor_chrome() {
        let doc = sample();
        let live = build_tree(&RenderContext::live(&doc));
        assert_eq!(live.path_to("h1"), None);
        assert_eq!(live.without_decorations(), live);
    }

    #[test]
    fn test_grid_template_columns() {
        let doc = sample();
        let live = build_tree(&RenderContext::live(&doc));
        // page > section > inner > grid
        let grid = live.at(&[0, 0, 0]).unwrap();
        assert_eq!(grid.style("grid-template-columns"), Some("repeat(3, minmax(0, 1fr))"));
        assert_eq!(grid.style("gap"), Some("1.5rem"));
    }

    #[test]
    fn test_empty_grid_has_one_track() {
        let doc = Document::from_elements(vec![node(ElementKind::Grid, "g", vec![])]);
        let live = build_tree(&RenderContext::live(&doc));
        let grid = live.at(&[0]).unwrap();
        assert_eq!(grid.style("grid-template-columns"), Some("repeat(1, minmax(0, 1fr))"));
    }

    #[test]
    fn test_drop_zones() {
        let doc = sample();
        let editable = build_tree(&RenderContext::editable(&doc));
        let mut ids = Vec::new();
        droppables(&editable, &mut ids);
        assert_eq!(
            ids,
            vec!["placeholder-c1", "placeholder-c2", "placeholder-c3", "placeholder-s1", "placeholder-root"]
        );
    }

    #[test]
    fn test_click_nested_selects_only_inner() {
        let doc = sample();
        let editable = build_tree(&RenderContext::editable(&doc));
        let heading_path = editable.path_to("h1").unwrap();
        let mut text_path = heading_path.clone();
        // wrapper > h2 > text
        text_path.extend([0, 0]);
        assert_eq!(editable.click(&text_path).map(ElementId::as_str), Some("h1"));

        let section_path = editable.path_to("s1").unwrap();
        assert_eq!(editable.click(&section_path).map(ElementId::as_str), Some("s1"));
    }

    #[test]
    fn test_badges_only_on_highlighted() {
        let doc = sample();
        let editable = build_tree(
            &RenderContext::editable(&doc)
                .with_selected(Some("h1"))
                .with_hovered(Some("s1")),
        );
        let wrapper = editable.at(&editable.path_to("h1").unwrap()).unwrap();
        assert_eq!(wrapper.attr("class"), Some("pc-element pc-selected"));
        let badge = &wrapper.children()[0];
        assert_eq!(badge.children()[0], VNode::text("HEADING (H2)"));

        let section = editable.at(&editable.path_to("s1").unwrap()).unwrap();
        assert_eq!(section.attr("class"), Some("pc-element pc-hovered"));
        assert_eq!(section.children()[0].children()[0], VNode::text("SECTION"));

        let text = editable.at(&editable.path_to("t1").unwrap()).unwrap();
        assert_eq!(text.attr("class"), Some("pc-element"));
        assert_eq!(text.children().len(), 1);
    }

    #[test]
    fn test_missing_styles_fall_back_to_defaults() {
        let json = r#"{"elements":[{"id":"h","type":"Heading","content":{"text":"Hi","level":"h1"},"styles":{}}]}"#;
        let doc = Document::from_json(json).unwrap();
        let live = build_tree(&RenderContext::live(&doc));
        let heading = live.at(&[0]).unwrap();
        assert_eq!(heading.tag(), Some("h1"));
        assert_eq!(heading.style("font-size"), Some("2.25rem"));
        assert_eq!(heading.style("color"), Some("#111827"));
    }

    #[test]
    fn test_button_alignment() {
        let json = r#"{"elements":[{"id":"b","type":"Button","content":{"text":"Go","url":"/go"},"styles":{"textAlign":"right"}}]}"#;
        let doc = Document::from_json(json).unwrap();
        let live = build_tree(&RenderContext::live(&doc));
        let outer = live.at(&[0]).unwrap();
        assert_eq!(outer.style("justify-content"), Some("flex-end"));
        let link = live.at(&[0, 0]).unwrap();
        assert_eq!(link.attr("href"), Some("/go"));
        assert_eq!(link.style("text-align"), None);
        assert_eq!(link.style("background-color"), Some("#2563eb"));
    }
}
