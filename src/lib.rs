//! Team Roster
//!
//! A member roster served by Axum and rendered by small fetch-on-mount
//! components.
//!
//! # Architecture
//!
//! - **Server**: Axum routes for the JSON resources plus server-rendered pages
//! - **Directory**: In-memory users and teams behind the resources
//! - **Client**: `Fetch` implementations over HTTP or an in-process router
//! - **UI**: Components that fetch once on mount and render a view tree
//!
//! # Modules
//!
//! - [`client`]: Resource fetching
//! - [`config`]: Layered configuration (defaults, file, env, CLI)
//! - [`directory`]: User and team storage
//! - [`server`]: Router and handlers
//! - [`ui`]: View tree and components

pub mod client;
pub mod config;
pub mod directory;
pub mod server;
pub mod ui;

use crate::config::AppConfig;

use directory::Directory;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Users and teams.
    pub directory: Directory,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
