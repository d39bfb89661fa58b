//! Process-wide model cache.
//!
//! Several subcommands load the same encoder more than once (the topic model
//! and the document index both sit on MiniLM). Pipelines built with the same
//! options on the same device share one set of weights.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Implemented by model option types to produce a stable cache key.
pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// Cache of loaded models, keyed by model type and option key.
pub struct ModelCache {
    cache: Arc<Mutex<CacheStorage>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the cached model for `key`, or run `loader` and remember its result.
    ///
    /// `M` is cloned out of the cache, so it should be cheap to clone
    /// (weights behind an `Arc`).
    pub async fn get_or_create<M, F, Fut>(&self, key: &str, loader: F) -> anyhow::Result<M>
    where
        M: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<M>>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        {
            let cache = self.cache.lock().await;
            if let Some(model) = cache.get(&cache_key).and_then(|m| m.downcast_ref::<M>()) {
                tracing::debug!(key, "model cache hit");
                return Ok(model.clone());
            }
        }

        tracing::debug!(key, "model cache miss, loading");
        let model = loader().await?;

        let mut cache = self.cache.lock().await;
        cache.insert(cache_key, Arc::new(model.clone()) as Arc<dyn Any + Send + Sync>);

        Ok(model)
    }

    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.lock().await.is_empty()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL_CACHE: once_cell::sync::Lazy<ModelCache> =
    once_cell::sync::Lazy::new(ModelCache::new);

/// The cache shared by every pipeline builder.
pub fn global_cache() -> &'static ModelCache {
    &GLOBAL_MODEL_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Encoder {
        repo: String,
    }

    #[derive(Clone)]
    struct Summarizer {
        repo: String,
    }

    #[tokio::test]
    async fn second_request_reuses_the_first_load() {
        let cache = ModelCache::new();

        let first = cache
            .get_or_create::<Encoder, _, _>("all-MiniLM-L6-v2", || async {
                Ok(Encoder {
                    repo: "original".to_string(),
                })
            })
            .await
            .unwrap();

        let second = cache
            .get_or_create::<Encoder, _, _>("all-MiniLM-L6-v2", || async {
                Err(anyhow::anyhow!("loader must not run on a cache hit"))
            })
            .await
            .unwrap();

        assert_eq!(first.repo, second.repo);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn same_key_different_types_do_not_collide() {
        let cache = ModelCache::new();

        cache
            .get_or_create::<Encoder, _, _>("shared", || async { Ok(Encoder { repo: "e".into() }) })
            .await
            .unwrap();
        let summarizer = cache
            .get_or_create::<Summarizer, _, _>("shared", || async {
                Ok(Summarizer { repo: "s".into() })
            })
            .await
            .unwrap();

        assert_eq!(summarizer.repo, "s");
        assert_eq!(cache.len().await, 2);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn failed_loads_are_not_cached() {
        let cache = ModelCache::new();

        let failed = cache
            .get_or_create::<Encoder, _, _>("broken", || async { Err(anyhow::anyhow!("no weights")) })
            .await;
        assert!(failed.is_err());
        assert!(cache.is_empty().await);
    }
}
