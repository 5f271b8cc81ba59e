//! Login view.

use std::sync::Arc;

use tokio::sync::watch;

use crate::client::Fetch;
use crate::ui::mount::{FetchState, Mounted};
use crate::ui::view::{Component, Node};

/// Resource the login view fetches on mount.
pub const LOGIN_RESOURCE: &str = "/login";

/// Body of `GET /login`. Shape is not constrained.
pub type LoginResponse = serde_json::Value;

/// Login page. Fetches the login resource and keeps it, but renders only an
/// empty container.
#[derive(Debug)]
pub struct LoginView {
    login: Mounted<LoginResponse>,
}

impl LoginView {
    /// Mount the view and start fetching [`LOGIN_RESOURCE`].
    pub fn mount(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            login: Mounted::spawn(fetcher, LOGIN_RESOURCE),
        }
    }

    /// Stored login response state.
    pub fn state(&self) -> watch::Ref<'_, FetchState<LoginResponse>> {
        self.login.state()
    }

    /// Wait for the login fetch to resolve (or fail).
    pub async fn settled(&self) {
        let _ = self.login.settled().await;
    }

    /// Stop the fetch; a late response is dropped.
    pub fn unmount(&self) {
        self.login.unmount();
    }
}

impl Component for LoginView {
    fn render(&self) -> Node {
        Node::element("div")
            .attr("class", "login")
            .child(Node::element("div"))
    }
}
