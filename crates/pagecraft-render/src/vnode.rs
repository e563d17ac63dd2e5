//! Visual tree produced by the renderer.

use pagecraft_core::ElementId;

/// How a node relates to the editor chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decoration {
    /// Part of the page layout, present in both modes.
    #[default]
    None,
    /// Editor-only node, dropped entirely from the live page.
    Node,
    /// Editor-only wrapper, replaced by its children on the live page.
    Wrapper,
}

/// A node of the visual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Element {
        tag: String,
        /// Attributes present in both modes, in insertion order.
        attributes: Vec<(String, String)>,
        /// Inline CSS declarations, in insertion order.
        styles: Vec<(String, String)>,
        /// Editor-only attributes (highlight classes, droppable ids).
        editor_attributes: Vec<(String, String)>,
        children: Vec<VNode>,
        /// Element selected when this node is clicked.
        select: Option<ElementId>,
        decoration: Decoration,
    },
    Text {
        content: String,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            styles: Vec::new(),
            editor_attributes: Vec::new(),
            children: Vec::new(),
            select: None,
            decoration: Decoration::None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut attributes, .. } = self {
            attributes.push((key.into(), value.into()));
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.push((key.into(), value.into()));
        }
        self
    }

    pub fn with_styles(mut self, declarations: impl IntoIterator<Item = (String, String)>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(declarations);
        }
        self
    }

    pub fn with_editor_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut editor_attributes,
            ..
        } = self
        {
            editor_attributes.push((key.into(), value.into()));
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element { ref mut children, .. } = self {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element { ref mut children, .. } = self {
            children.extend(new_children);
        }
        self
    }

    pub fn with_select(mut self, id: ElementId) -> Self {
        if let VNode::Element { ref mut select, .. } = self {
            *select = Some(id);
        }
        self
    }

    pub fn with_decoration(mut self, kind: Decoration) -> Self {
        if let VNode::Element { ref mut decoration, .. } = self {
            *decoration = kind;
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }

    /// Value of a layout or editor attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element {
                attributes,
                editor_attributes,
                ..
            } => attributes
                .iter()
                .chain(editor_attributes)
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            VNode::Text { .. } => None,
        }
    }

    /// Value of an inline style declaration.
    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => {
                styles.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
            }
            VNode::Text { .. } => None,
        }
    }

    pub fn select_target(&self) -> Option<&ElementId> {
        match self {
            VNode::Element { select, .. } => select.as_ref(),
            VNode::Text { .. } => None,
        }
    }

    pub fn decoration(&self) -> Decoration {
        match self {
            VNode::Element { decoration, .. } => *decoration,
            VNode::Text { .. } => Decoration::None,
        }
    }

    /// Node reached by following child indices from this node.
    pub fn at(&self, path: &[usize]) -> Option<&VNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    /// The element a click on the node at `path` selects: the innermost
    /// select target along the path. Outer targets are not consulted once an
    /// inner one is found.
    pub fn click(&self, path: &[usize]) -> Option<&ElementId> {
        let mut node = self;
        let mut target = node.select_target();
        for &index in path {
            node = node.children().get(index)?;
            if let Some(id) = node.select_target() {
                target = Some(id);
            }
        }
        target
    }

    /// Path to the node carrying `id` as its select target.
    pub fn path_to(&self, id: &str) -> Option<Vec<usize>> {
        if self.select_target().is_some_and(|s| s == id) {
            return Some(Vec::new());
        }
        self.children().iter().enumerate().find_map(|(i, child)| {
            child.path_to(id).map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    /// Strip everything that only exists for the editor.
    pub fn without_decorations(&self) -> VNode {
        self.strip().into_iter().next().unwrap_or_else(|| VNode::text(""))
    }

    fn strip(&self) -> Vec<VNode> {
        match self {
            VNode::Text { .. } => vec![self.clone()],
            VNode::Element {
                tag,
                attributes,
                styles,
                children,
                decoration,
                ..
            } => {
                let children: Vec<VNode> = children.iter().flat_map(VNode::strip).collect();
                match decoration {
                    Decoration::Node => Vec::new(),
                    Decoration::Wrapper => children,
                    Decoration::None => vec![VNode::Element {
                        tag: tag.clone(),
                        attributes: attributes.clone(),
                        styles: styles.clone(),
                        editor_attributes: Vec::new(),
                        children,
                        select: None,
                        decoration: Decoration::None,
                    }],
                }
            }
        }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(VNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VNode {
        VNode::element("main").with_child(
            VNode::element("div")
                .with_select(ElementId::from("outer"))
                .with_decoration(Decoration::Wrapper)
                .with_child(VNode::element("span").with_decoration(Decoration::Node).with_child(VNode::text("BADGE")))
                .with_child(
                    VNode::element("section").with_child(
                        VNode::element("div")
                            .with_select(ElementId::from("inner"))
                            .with_decoration(Decoration::Wrapper)
                            .with_child(VNode::element("p").with_child(VNode::text("hi"))),
                    ),
                ),
        )
    }

    #[test]
    fn test_click_selects_innermost() {
        let tree = sample();
        assert_eq!(tree.click(&[0, 1, 0, 0]).map(ElementId::as_str), Some("inner"));
        assert_eq!(tree.click(&[0, 1]).map(ElementId::as_str), Some("outer"));
        assert_eq!(tree.click(&[]), None);
        assert_eq!(tree.click(&[9]), None);
    }

    #[test]
    fn test_path_to() {
        let tree = sample();
        assert_eq!(tree.path_to("inner"), Some(vec![0, 1, 0]));
        assert_eq!(tree.path_to("nope"), None);
    }

    #[test]
    fn test_without_decorations() {
        let stripped = sample().without_decorations();
        let expected = VNode::element("main").with_child(
            VNode::element("section").with_child(VNode::element("p").with_child(VNode::text("hi"))),
        );
        assert_eq!(stripped, expected);
    }
}
