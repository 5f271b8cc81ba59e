//! Application shell: search box plus the member roster.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::client::Fetch;
use crate::ui::components::SearchBar;
use crate::ui::mount::{FetchState, Mounted};
use crate::ui::view::{Component, Node};

/// Resource the shell fetches on mount.
pub const MEMBERS_RESOURCE: &str = "/members";

/// Placeholder shown until a member list is available.
pub const LOADING_TEXT: &str = "Loading...";

/// Body of `GET /members`.
///
/// A body without `members` decodes to `None`, which keeps the shell in its
/// loading branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

/// Main application component.
///
/// Mounting starts the single members fetch; rendering only reads state.
#[derive(Debug)]
pub struct AppShell {
    search: SearchBar,
    members: Mounted<MemberListResponse>,
}

impl AppShell {
    /// Mount the shell and start fetching [`MEMBERS_RESOURCE`].
    pub fn mount(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            search: SearchBar,
            members: Mounted::spawn(fetcher, MEMBERS_RESOURCE),
        }
    }

    /// Current fetch state.
    pub fn state(&self) -> watch::Ref<'_, FetchState<MemberListResponse>> {
        self.members.state()
    }

    /// Wait for the members fetch to resolve (or fail).
    pub async fn settled(&self) {
        let _ = self.members.settled().await;
    }

    /// Stop the fetch; a late response is dropped.
    pub fn unmount(&self) {
        self.members.unmount();
    }
}

impl Component for AppShell {
    fn render(&self) -> Node {
        let body: Vec<Node> = match &*self.members.state() {
            FetchState::Loaded(MemberListResponse {
                members: Some(members),
            }) => members
                .iter()
                .map(|member| Node::element("p").child(Node::text(member.as_str())))
                .collect(),
            FetchState::Failed(_) => vec![
                Node::element("p")
                    .attr("class", "error")
                    .attr("role", "alert")
                    .child(Node::text("Unable to load members.")),
            ],
            FetchState::Loading | FetchState::Loaded(_) => vec![loading()],
        };

        Node::element("div")
            .attr("class", "App")
            .child(self.search.render())
            .children(body)
    }
}

fn loading() -> Node {
    Node::element("p")
        .attr("class", "loading")
        .child(Node::text(LOADING_TEXT))
}
