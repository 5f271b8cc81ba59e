//! Input component for text fields.

use crate::ui::view::Node;

const BASE_CLASSES: &str = "flex h-10 w-full rounded-lg border border-panelBorder bg-background \
                            px-3 py-2 text-sm text-textPrimary placeholder:text-textMuted \
                            focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-primary";

/// Text input component.
///
/// # Example
///
/// ```rust
/// use team_roster::ui::components::Input;
///
/// let node = Input::new("search").name("q").placeholder("Search...").render();
/// assert_eq!(node.get_attr("type"), Some("search"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Input {
    input_type: &'static str,
    placeholder: &'static str,
    name: &'static str,
    id: &'static str,
    class: &'static str,
    autocomplete: &'static str,
}

impl Default for Input {
    fn default() -> Self {
        Self::new("text")
    }
}

impl Input {
    /// Input of the given type (text, email, search, ...).
    #[must_use]
    pub fn new(input_type: &'static str) -> Self {
        Self {
            input_type,
            placeholder: "",
            name: "",
            id: "",
            class: "",
            autocomplete: "off",
        }
    }

    /// Placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Input name attribute.
    #[must_use]
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Input ID attribute.
    #[must_use]
    pub fn id(mut self, id: &'static str) -> Self {
        self.id = id;
        self
    }

    /// Additional CSS classes.
    #[must_use]
    pub fn class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    /// Build the element. Empty attributes are omitted.
    pub fn render(&self) -> Node {
        let classes = if self.class.is_empty() {
            BASE_CLASSES.to_string()
        } else {
            format!("{BASE_CLASSES} {}", self.class)
        };

        let mut node = Node::element("input")
            .attr("type", self.input_type)
            .attr("class", classes);
        for (key, value) in [
            ("placeholder", self.placeholder),
            ("name", self.name),
            ("id", self.id),
        ] {
            if !value.is_empty() {
                node = node.attr(key, value);
            }
        }
        node.attr("autocomplete", self.autocomplete)
    }
}
