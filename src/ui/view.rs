//! Minimal view tree used by the roster components.
//!
//! Components render into a [`Node`] tree which can be inspected directly
//! (tests, server-side assertions) or serialized with [`Node::to_html`].

use std::fmt::Write as _;

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in a rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element {
        /// Tag name, e.g. `div`.
        tag: &'static str,
        /// Attributes in insertion order.
        attrs: Vec<(&'static str, String)>,
        /// Child nodes in document order.
        children: Vec<Node>,
    },
    /// Raw text. Escaped only when serialized.
    Text(String),
}

/// Anything that can render itself into a [`Node`].
pub trait Component {
    /// Render the current state of the component.
    fn render(&self) -> Node;
}

impl Node {
    /// Create an empty element.
    #[must_use]
    pub fn element(tag: &'static str) -> Self {
        Self::Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Add an attribute. No-op on text nodes.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    /// Append a child. No-op on text nodes.
    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    /// Append several children in order.
    #[must_use]
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// Tag name, or `None` for text.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Element { tag, .. } => Some(*tag),
            Self::Text(_) => None,
        }
    }

    /// Look up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str()),
            Self::Text(_) => None,
        }
    }

    /// All text nodes in document order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Text(t) => out.push(t.as_str()),
            Self::Element { children, .. } => {
                for c in children {
                    c.collect_texts(out);
                }
            }
        }
    }

    /// Concatenated text content, like the DOM `textContent` property.
    pub fn text_content(&self) -> String {
        self.texts().concat()
    }

    /// All elements with the given tag, depth first, including `self`.
    pub fn find_all(&self, tag: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_tag(tag, &mut out);
        out
    }

    fn collect_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a Node>) {
        if let Self::Element {
            tag: t, children, ..
        } = self
        {
            if *t == tag {
                out.push(self);
            }
            for c in children {
                c.collect_tag(tag, out);
            }
        }
    }

    /// Whether any element in the tree has the given tag.
    pub fn contains_tag(&self, tag: &str) -> bool {
        !self.find_all(tag).is_empty()
    }

    /// Serialize to an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(t) => out.push_str(&escape(t)),
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (k, v) in attrs {
                    let _ = write!(out, " {k}=\"{}\"", escape(v));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(tag) {
                    return;
                }
                for c in children {
                    c.write_html(out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
