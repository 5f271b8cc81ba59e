//! Resource fetching for the roster components.
//!
//! Components never talk to the network directly. They receive an
//! `Arc<dyn Fetch>` on mount and ask it for a JSON document by path.
//!
//! - [`HttpFetcher`]: GETs resources from a remote server with `reqwest`
//! - [`RouterFetcher`]: dispatches GETs through an in-process axum [`axum::Router`]

mod error;
mod http;
mod router;

pub use error::{FetchError, Result};
pub use http::HttpFetcher;
pub use router::RouterFetcher;

use async_trait::async_trait;

/// Source of JSON resources addressed by path, e.g. `/members`.
#[async_trait]
pub trait Fetch: Send + Sync + std::fmt::Debug {
    /// Issue an unparameterized GET and decode the body as JSON.
    async fn get_json(&self, path: &str) -> Result<serde_json::Value>;
}
