//! One-shot page rendering: mount a component, let its fetch settle, render.

use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;

use crate::client::Fetch;
use crate::ui::app::AppShell;
use crate::ui::login::LoginView;
use crate::ui::view::Component;

/// Top-level views that can be rendered to HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Page {
    /// [`AppShell`]: search bar and member roster.
    Members,
    /// [`LoginView`]: empty login container.
    Login,
}

impl Page {
    /// Document title for the page.
    pub fn title(self) -> &'static str {
        match self {
            Self::Members => "Members",
            Self::Login => "Login",
        }
    }
}

/// Mount `page` against `fetcher` and return its HTML.
///
/// The members page waits up to `wait` for its fetch; past that it renders
/// whatever state it has. The login page never depends on its fetch and
/// renders at once. The component is unmounted before returning.
pub async fn render_page(page: Page, fetcher: Arc<dyn Fetch>, wait: Duration) -> String {
    match page {
        Page::Members => {
            let shell = AppShell::mount(fetcher);
            if tokio::time::timeout(wait, shell.settled()).await.is_err() {
                tracing::warn!(
                    name: "page.render.timeout",
                    timeout = ?wait,
                    "Rendering app shell before members resolved"
                );
            }
            shell.render().to_html()
        }
        Page::Login => LoginView::mount(fetcher).render().to_html(),
    }
}
