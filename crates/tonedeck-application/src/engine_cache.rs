//! Construct-once cache for the engine handle.
//!
//! At most one live handle exists per cache epoch. Construction is
//! attempted at most once: a failure is stored alongside its reason and
//! re-reported without retrying until an explicit `clear()`.

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tonedeck_interaction::{EngineError, ToneEngine};
use tracing::{debug, warn};

/// Factory signature the context stores for building the engine lazily.
pub type EngineFactory =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn ToneEngine>, EngineError>> + Send + Sync>;

enum Slot {
    Ready(Arc<dyn ToneEngine>),
    Failed(String),
}

/// Mutex-guarded construct-if-absent slot for the engine handle.
///
/// The lock is held across the factory await, so under concurrent first
/// access exactly one construction wins; losers block and receive the
/// winner's outcome.
#[derive(Default)]
pub struct EngineCache {
    slot: Mutex<Option<Slot>>,
}

impl EngineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached handle, or runs `factory` to build one.
    ///
    /// On factory failure the reason is cached and returned verbatim on
    /// every subsequent call within the epoch; the factory is not retried
    /// until [`EngineCache::clear`].
    pub async fn get_or_create<F, Fut>(&self, factory: F) -> Result<Arc<dyn ToneEngine>, String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<dyn ToneEngine>, EngineError>>,
    {
        let mut slot = self.slot.lock().await;
        match &*slot {
            Some(Slot::Ready(engine)) => Ok(engine.clone()),
            Some(Slot::Failed(reason)) => Err(reason.clone()),
            None => match factory().await {
                Ok(engine) => {
                    debug!(engine = engine.describe(), "engine constructed");
                    *slot = Some(Slot::Ready(engine.clone()));
                    Ok(engine)
                }
                Err(err) => {
                    let reason = err.to_string();
                    warn!(%reason, "engine construction failed; caching failure");
                    *slot = Some(Slot::Failed(reason.clone()));
                    Err(reason)
                }
            },
        }
    }

    /// Evicts the stored handle or failure, opening a new cache epoch.
    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
    }

    /// Whether the slot currently holds a live handle.
    pub async fn has_engine(&self) -> bool {
        matches!(&*self.slot.lock().await, Some(Slot::Ready(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tonedeck_core::AnalysisResult;

    struct NullEngine;

    #[async_trait::async_trait]
    impl ToneEngine for NullEngine {
        fn describe(&self) -> &str {
            "null engine"
        }

        async fn run(&self, _input: &str) -> Result<AnalysisResult, EngineError> {
            Ok(AnalysisResult::default())
        }
    }

    fn counting_factory(
        calls: Arc<AtomicUsize>,
        fail: bool,
    ) -> impl Fn() -> BoxFuture<'static, Result<Arc<dyn ToneEngine>, EngineError>> {
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if fail {
                    Err(EngineError::Construction("backend unreachable".to_string()))
                } else {
                    Ok(Arc::new(NullEngine) as Arc<dyn ToneEngine>)
                }
            })
        }
    }

    #[tokio::test]
    async fn test_factory_runs_once_and_handle_is_identical() {
        let cache = EngineCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let factory = counting_factory(calls.clone(), false);

        let first = cache.get_or_create(&factory).await.unwrap();
        let second = cache.get_or_create(&factory).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failure_is_sticky_until_clear() {
        let cache = EngineCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let factory = counting_factory(calls.clone(), true);

        let first = match cache.get_or_create(&factory).await {
            Ok(_) => panic!("expected construction to fail"),
            Err(e) => e,
        };
        let second = match cache.get_or_create(&factory).await {
            Ok(_) => panic!("expected construction to fail"),
            Err(e) => e,
        };

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);

        cache.clear().await;
        let _ = cache.get_or_create(&factory).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_exactly_one_reconstruction() {
        let cache = EngineCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let factory = counting_factory(calls.clone(), false);

        let _ = cache.get_or_create(&factory).await.unwrap();
        cache.clear().await;
        let _ = cache.get_or_create(&factory).await.unwrap();
        let _ = cache.get_or_create(&factory).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_constructs_once() {
        let cache = Arc::new(EngineCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_create(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        async move {
                            tokio::task::yield_now().await;
                            Ok(Arc::new(NullEngine) as Arc<dyn ToneEngine>)
                        }
                    })
                    .await
                    .unwrap()
            }));
        }

        let engines: Vec<_> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|res| res.unwrap())
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for engine in &engines[1..] {
            assert!(Arc::ptr_eq(&engines[0], engine));
        }
    }
}
