//! The load step every pipeline builder shares.
//!
//! Builders differ in their options and in how the final pipeline is
//! assembled, but all of them resolve a device, derive a cache key and pull
//! the model through the global cache.

use candle_core::Device;
use tokenizers::Tokenizer;

use super::{build_cache_key, DeviceRequest};
use crate::core::{global_cache, ModelOptions};

/// Resolve `request` and fetch the model for `options` from the global cache,
/// loading it with `create` on a miss.
///
/// `create` downloads and maps weights, so it runs on the blocking pool.
pub async fn load_cached_model<M, O, F>(
    options: &O,
    request: DeviceRequest,
    create: F,
) -> anyhow::Result<(M, Device)>
where
    M: Clone + Send + Sync + 'static,
    O: ModelOptions,
    F: FnOnce(Device) -> anyhow::Result<M> + Send + 'static,
{
    let device = request.resolve()?;
    let key = build_cache_key(options, &device);
    let load_device = device.clone();
    let model = global_cache()
        .get_or_create(&key, || async move {
            tokio::task::spawn_blocking(move || create(load_device)).await?
        })
        .await?;
    Ok((model, device))
}

/// Load a tokenizer off the async runtime.
pub async fn load_tokenizer<F>(load: F) -> anyhow::Result<Tokenizer>
where
    F: FnOnce() -> anyhow::Result<Tokenizer> + Send + 'static,
{
    tokio::task::spawn_blocking(load).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::{self, ThreadId};

    struct KeyOnly(&'static str);

    impl ModelOptions for KeyOnly {
        fn cache_key(&self) -> String {
            format!("test:{}", self.0)
        }
    }

    #[tokio::test]
    async fn loads_run_off_the_runtime_thread() {
        let caller = thread::current().id();

        let (loaded_on, device) = load_cached_model::<ThreadId, _, _>(
            &KeyOnly("blocking-pool"),
            DeviceRequest::Cpu,
            |_| Ok(thread::current().id()),
        )
        .await
        .unwrap();
        assert_ne!(loaded_on, caller);
        assert!(device.is_cpu());

        let err = load_tokenizer(|| anyhow::bail!("no tokenizer.json")).await.unwrap_err();
        assert!(err.to_string().contains("tokenizer.json"));
    }
}
