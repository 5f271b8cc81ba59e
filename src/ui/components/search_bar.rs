//! Search input shown at the top of the roster.

use super::Input;
use crate::ui::view::{Component, Node};

/// Search box. Takes no props and reports nothing back to its parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBar;

impl Component for SearchBar {
    fn render(&self) -> Node {
        Node::element("div").attr("class", "search-bar").child(
            Input::new("search")
                .name("q")
                .id("member-search")
                .placeholder("Search members...")
                .render(),
        )
    }
}
