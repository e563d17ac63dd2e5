//! HTML output for visual trees and live pages.

use crate::build::build_tree;
use crate::renderer::{RenderContext, RenderResult, Renderer};
use crate::vnode::VNode;
use pagecraft_core::Page;
use std::io::Write;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "meta", "link", "input"];

/// Options for HTML output.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    /// Single-line output.
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

struct Context<'o> {
    options: &'o HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'o> Context<'o> {
    fn new(options: &'o HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value (double-quoted).
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

/// Serializes visual trees to HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    pub options: HtmlOptions,
}

impl HtmlRenderer {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// HTML for a single visual tree.
    pub fn node_to_html(&self, node: &VNode) -> String {
        let mut ctx = Context::new(&self.options);
        write_node(node, &mut ctx);
        ctx.get_output()
    }

    /// Render straight into a writer.
    pub fn render_to(&self, ctx: &RenderContext, out: &mut impl Write) -> RenderResult<()> {
        let html = self.render(ctx)?;
        out.write_all(html.as_bytes())?;
        Ok(())
    }

    /// A complete HTML document for the public page.
    pub fn render_live_page(&self, page: &Page) -> String {
        let mut ctx = Context::new(&self.options);
        let title = page.seo.meta_title.as_deref().unwrap_or(&page.title);

        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html lang=\"en\">");
        ctx.indent();

        ctx.add_line("<head>");
        ctx.indent();
        ctx.add_line("<meta charset=\"UTF-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        ctx.add_line(&format!("<title>{}</title>", escape_text(title)));
        if let Some(description) = &page.seo.meta_description {
            ctx.add_line(&format!(
                "<meta name=\"description\" content=\"{}\">",
                escape_attr(description)
            ));
        }
        if !page.seo.focus_keywords.is_empty() {
            ctx.add_line(&format!(
                "<meta name=\"keywords\" content=\"{}\">",
                escape_attr(&page.seo.focus_keywords.join(", "))
            ));
        }
        ctx.add_line("<style>body { margin: 0; font-family: system-ui, sans-serif; }</style>");
        ctx.dedent();
        ctx.add_line("</head>");

        ctx.add_line("<body>");
        ctx.indent();
        write_node(&build_tree(&RenderContext::live(&page.content)), &mut ctx);
        ctx.dedent();
        ctx.add_line("</body>");

        ctx.dedent();
        ctx.add_line("</html>");
        ctx.get_output()
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&self, ctx: &RenderContext) -> RenderResult<String> {
        Ok(self.node_to_html(&build_tree(ctx)))
    }
}

fn open_tag(node: &VNode) -> String {
    let VNode::Element {
        tag,
        attributes,
        styles,
        editor_attributes,
        ..
    } = node
    else {
        return String::new();
    };

    let mut out = format!("<{tag}");
    for (key, value) in attributes.iter().chain(editor_attributes) {
        out.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
    }
    if !styles.is_empty() {
        let css: Vec<String> = styles.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        out.push_str(&format!(" style=\"{}\"", escape_attr(&css.join("; "))));
    }
    out.push('>');
    out
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add_line(&escape_text(content)),
        VNode::Element { tag, children, .. } => {
            let open = open_tag(node);
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                ctx.add_line(&open);
                return;
            }
            match children.as_slice() {
                [] => ctx.add_line(&format!("{open}</{tag}>")),
                [VNode::Text { content }] => {
                    ctx.add_line(&format!("{open}{}</{tag}>", escape_text(content)))
                }
                _ => {
                    ctx.add_line(&open);
                    ctx.indent();
                    for child in children {
                        write_node(child, ctx);
                    }
                    ctx.dedent();
                    ctx.add_line(&format!("</{tag}>"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::element::{ContentField, Element, ElementKind, ElementUpdate};
    use pagecraft_core::{Document, PageStatus};

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("<b>&"), "&lt;b&gt;&amp;");
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_text_is_escaped_in_output() {
        let mut heading = Element::new(ElementKind::Heading);
        heading
            .apply(&ElementUpdate::new().content(ContentField::Text, "<script>alert(1)</script>"))
            .unwrap();
        let doc = Document::from_elements(vec![heading]);
        let html = HtmlRenderer::default()
            .render(&RenderContext::live(&doc))
            .unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_compact_output() {
        let doc = Document::from_elements(vec![Element::new(ElementKind::Image)]);
        let html = HtmlRenderer::new(HtmlOptions::compact())
            .render(&RenderContext::live(&doc))
            .unwrap();
        assert!(!html.contains('\n'));
        assert!(html.starts_with("<div class=\"pc-page\"><img src="));
        assert!(html.ends_with("</div>"));
        assert!(!html.contains("</img>"));
    }

    #[test]
    fn test_pretty_nesting() {
        let doc = Document::from_elements(vec![Element::new(ElementKind::Text)]);
        let html = HtmlRenderer::default().render(&RenderContext::live(&doc)).unwrap();
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "<div class=\"pc-page\">");
        assert!(lines[1].starts_with("  <p style=\"margin: 0; color: #4b5563;"));
        assert!(lines[1].ends_with(">Start typing your content here.</p>"));
        assert_eq!(lines[2], "</div>");
    }

    #[test]
    fn test_editable_output_has_droppables() {
        let doc = Document::from_elements(vec![Element::new(ElementKind::Section)]);
        let html = HtmlRenderer::default()
            .render(&RenderContext::editable(&doc))
            .unwrap();
        assert!(html.contains("data-droppable=\"placeholder-root\""));
        assert!(html.contains(&format!("data-droppable=\"placeholder-{}\"", doc.elements[0].id)));
    }

    #[test]
    fn test_live_page_head() {
        let mut page = Page::new("About", "about");
        page.status = PageStatus::Published;
        page.seo.meta_description = Some("We & you".to_string());
        page.seo.focus_keywords = vec!["about".to_string(), "team".to_string()];
        page.content.elements.push(Element::new(ElementKind::Button));

        let html = HtmlRenderer::default().render_live_page(&page);
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>About</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"We &amp; you\">"));
        assert!(html.contains("<meta name=\"keywords\" content=\"about, team\">"));
        assert!(html.contains(">Click Me</a>"));
        assert!(!html.contains("data-droppable"));
    }

    #[test]
    fn test_live_page_prefers_meta_title() {
        let mut page = Page::new("About", "about");
        page.seo.meta_title = Some("About | Acme".to_string());
        let html = HtmlRenderer::new(HtmlOptions::compact()).render_live_page(&page);
        assert!(html.contains("<title>About | Acme</title>"));
        assert!(!html.contains("name=\"keywords\""));
    }
}
