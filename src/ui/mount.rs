//! Fetch-on-mount lifecycle shared by the roster components.
//!
//! A component mounts by calling [`Mounted::spawn`], which starts exactly one
//! background fetch and publishes its outcome on a `watch` channel. Dropping
//! (or [`Mounted::unmount`]-ing) the handle cancels the fetch; a cancelled
//! fetch never publishes.

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::client::{Fetch, FetchError};

/// Lifecycle of a single mounted fetch.
#[derive(Debug, Clone)]
pub enum FetchState<T> {
    /// Request outstanding.
    Loading,
    /// Response decoded.
    Loaded(T),
    /// Request or decoding failed.
    Failed(Arc<FetchError>),
}

impl<T> FetchState<T> {
    /// Whether the fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The decoded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Publishing end of a mounted fetch. `None` once unmounted.
type Publisher<T> = Arc<Mutex<Option<watch::Sender<FetchState<T>>>>>;

/// Handle to a component's in-flight (or finished) fetch.
#[derive(Debug)]
pub struct Mounted<T> {
    state: watch::Receiver<FetchState<T>>,
    publisher: Publisher<T>,
    cancel: CancellationToken,
    resource: &'static str,
}

impl<T> Mounted<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Start the single fetch for `resource`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(fetcher: Arc<dyn Fetch>, resource: &'static str) -> Self {
        let (tx, rx) = watch::channel(FetchState::Loading);
        let publisher: Publisher<T> = Arc::new(Mutex::new(Some(tx)));
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task_publisher = Arc::clone(&publisher);

        tokio::spawn(async move {
            let outcome = tokio::select! {
                () = token.cancelled() => return,
                res = fetcher.get_json(resource) => res,
            };

            let decoded = outcome.and_then(|body| {
                tracing::debug!(name: "component.fetch.received", resource, body = %body, "Resource received");
                serde_json::from_value::<T>(body).map_err(FetchError::from)
            });

            let next = match decoded {
                Ok(value) => {
                    tracing::debug!(name: "component.fetch.loaded", resource, "Resource loaded");
                    FetchState::Loaded(value)
                }
                Err(e) => {
                    tracing::warn!(name: "component.fetch.failed", resource, error = %e, "Resource fetch failed");
                    FetchState::Failed(Arc::new(e))
                }
            };

            // Unmount takes the sender under the same lock, so a response
            // is either published before unmount or not at all.
            let slot = task_publisher.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(tx) = slot.as_ref() {
                let _ = tx.send(next);
            }
        });

        Self {
            state: rx,
            publisher,
            cancel,
            resource,
        }
    }
}

impl<T> Mounted<T> {
    /// Borrow the current state.
    pub fn state(&self) -> watch::Ref<'_, FetchState<T>> {
        self.state.borrow()
    }

    /// Resource path this handle fetches.
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Whether the handle has been unmounted.
    pub fn is_unmounted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait until the fetch leaves [`FetchState::Loading`].
    ///
    /// Returns immediately (still loading) if the fetch was cancelled.
    pub async fn settled(&self) -> watch::Ref<'_, FetchState<T>> {
        let mut rx = self.state.clone();
        let _ = rx.wait_for(|s| !s.is_loading()).await;
        self.state.borrow()
    }

    /// Cancel the fetch. Later responses are discarded.
    pub fn unmount(&self) {
        let retired = self
            .publisher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if retired.is_some() {
            tracing::debug!(name: "component.unmounted", resource = self.resource, "Component unmounted");
            self.cancel.cancel();
        }
    }
}

impl<T> Drop for Mounted<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::client::Result;

    /// Answers once `release` is notified, counting calls.
    #[derive(Debug, Default)]
    struct Gated {
        calls: AtomicUsize,
        release: Notify,
    }

    #[async_trait]
    impl Fetch for Gated {
        async fn get_json(&self, _path: &str) -> Result<serde_json::Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(json!(["a", "b"]))
        }
    }

    #[tokio::test]
    async fn starts_loading_then_loads() {
        let fetcher = Arc::new(Gated::default());
        let mounted: Mounted<Vec<String>> = Mounted::spawn(fetcher.clone(), "/things");
        assert!(mounted.state().is_loading());

        tokio::task::yield_now().await;
        fetcher.release.notify_one();

        let state = mounted.settled().await;
        assert_eq!(state.loaded().unwrap(), &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrong_shape_fails() {
        let fetcher = Arc::new(Gated::default());
        fetcher.release.notify_one();
        let mounted: Mounted<u32> = Mounted::spawn(fetcher, "/things");

        match &*mounted.settled().await {
            FetchState::Failed(err) => assert!(matches!(**err, FetchError::Malformed(_))),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unmount_discards_late_response() {
        let fetcher = Arc::new(Gated::default());
        let mounted: Mounted<Vec<String>> = Mounted::spawn(fetcher.clone(), "/things");
        tokio::task::yield_now().await;

        mounted.unmount();
        assert!(mounted.is_unmounted());
        fetcher.release.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(mounted.state().is_loading());
        // Resolves immediately once the task is gone.
        assert!(mounted.settled().await.is_loading());
    }

    static DECODE_STARTED: Barrier = Barrier::new(2);
    static DECODE_RESUME: Barrier = Barrier::new(2);

    /// Decodes only after the test lets it continue.
    #[derive(Debug)]
    struct HeldDecode;

    impl<'de> serde::Deserialize<'de> for HeldDecode {
        fn deserialize<D: serde::Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
            serde::de::IgnoredAny::deserialize(de)?;
            DECODE_STARTED.wait();
            DECODE_RESUME.wait();
            Ok(HeldDecode)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unmount_during_decode_never_publishes() {
        let fetcher = Arc::new(Gated::default());
        fetcher.release.notify_one();
        let mounted: Mounted<HeldDecode> = Mounted::spawn(fetcher, "/things");

        // The response is in hand and being decoded on a worker.
        DECODE_STARTED.wait();
        mounted.unmount();
        DECODE_RESUME.wait();

        assert!(mounted.settled().await.is_loading());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(mounted.state().is_loading());
    }

    #[tokio::test]
    async fn unmount_closes_state_while_request_pending() {
        let fetcher = Arc::new(Gated::default());
        let mounted: Mounted<Vec<String>> = Mounted::spawn(fetcher, "/things");

        mounted.unmount();
        mounted.unmount();

        // Never released: settling must not wait on the request.
        let settled = tokio::time::timeout(Duration::from_secs(1), mounted.settled()).await;
        assert!(settled.unwrap().is_loading());
    }
}
