//! In-process fetcher that dispatches through an axum router.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request},
};
use tower::ServiceExt;

use super::{Fetch, FetchError, Result};

/// Upper bound on buffered response bodies.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Fetches resources by calling an axum [`Router`] directly.
///
/// Used for server-side rendering, so pages go through the same handlers
/// (and the same status codes) a browser would.
#[derive(Debug, Clone)]
pub struct RouterFetcher {
    router: Router,
}

impl RouterFetcher {
    /// Wrap a fully-stated router.
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Fetch for RouterFetcher {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .map_err(|e| FetchError::Dispatch(e.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| FetchError::Dispatch(e.to_string()))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| FetchError::Dispatch(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, http::StatusCode, routing::get};
    use serde_json::json;

    use super::*;

    fn router() -> Router {
        Router::new()
            .route("/ok", get(|| async { Json(json!({ "members": ["Ann"] })) }))
            .route("/text", get(|| async { "not json" }))
            .route(
                "/gone",
                get(|| async { (StatusCode::GONE, "resource removed") }),
            )
    }

    #[tokio::test]
    async fn decodes_success_body() {
        let fetcher = RouterFetcher::new(router());
        let value = fetcher.get_json("/ok").await.unwrap();
        assert_eq!(value, json!({ "members": ["Ann"] }));
    }

    #[tokio::test]
    async fn maps_error_status() {
        let fetcher = RouterFetcher::new(router());
        match fetcher.get_json("/gone").await {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 410);
                assert_eq!(message, "resource removed");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let fetcher = RouterFetcher::new(router());
        let err = fetcher.get_json("/missing").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let fetcher = RouterFetcher::new(router());
        let err = fetcher.get_json("/text").await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
