//! Traced cache wrapper

use async_trait::async_trait;
use tracing::Instrument;

use super::error::CacheResult;
use super::key::CacheKey;
use super::provider::{CacheProvider, CacheStats};

/// Wrapper that adds tracing to any `CacheProvider`
///
/// Spans are debug-level; keys carry query variables and stay out of
/// production logs.
#[derive(Debug, Clone)]
pub struct TracedCache<C> {
    inner: C,
}

impl<C> TracedCache<C> {
    pub const fn new(cache: C) -> Self {
        Self { inner: cache }
    }

    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: CacheProvider> CacheProvider for TracedCache<C> {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Vec<u8>>> {
        let span = tracing::debug_span!("cache.get", cache.query = key.query_id());

        let result = self.inner.get(key).instrument(span).await;

        match &result {
            Ok(Some(data)) => tracing::debug!(
                cache.result = "hit",
                cache.key = %key,
                cache.size_bytes = data.len(),
            ),
            Ok(None) => tracing::debug!(cache.result = "miss", cache.key = %key),
            Err(e) => tracing::warn!(cache.result = "error", cache.key = %key, error = %e),
        }

        result
    }

    async fn set(&self, key: &CacheKey, value: &[u8]) -> CacheResult<()> {
        let span = tracing::debug_span!(
            "cache.set",
            cache.query = key.query_id(),
            cache.value_size = value.len(),
        );

        let result = self.inner.set(key, value).instrument(span).await;

        if let Err(ref e) = result {
            tracing::warn!(cache.operation = "set", cache.key = %key, error = %e);
        }

        result
    }

    async fn delete(&self, key: &CacheKey) -> CacheResult<bool> {
        let span = tracing::debug_span!("cache.delete", cache.query = key.query_id());

        let result = self.inner.delete(key).instrument(span).await;

        match &result {
            Ok(deleted) => {
                tracing::debug!(cache.operation = "delete", cache.key = %key, cache.deleted = deleted);
            }
            Err(e) => tracing::warn!(cache.operation = "delete", cache.key = %key, error = %e),
        }

        result
    }

    async fn exists(&self, key: &CacheKey) -> CacheResult<bool> {
        let span = tracing::debug_span!("cache.exists", cache.query = key.query_id());
        self.inner.exists(key).instrument(span).await
    }

    async fn stats(&self) -> CacheStats {
        self.inner.stats().await
    }
}
