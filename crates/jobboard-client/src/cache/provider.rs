//! Cache provider trait definition

use async_trait::async_trait;

use super::error::CacheResult;
use super::key::CacheKey;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub entry_count: u64,
}

/// Async cache provider trait
///
/// Values are the serialized `data` object of a read query, stored under
/// the key derived from that query's id and variables. An entry stays until
/// it is overwritten or deleted.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous entry
    async fn set(&self, key: &CacheKey, value: &[u8]) -> CacheResult<()>;

    /// Remove the entry; `true` if one was present
    async fn delete(&self, key: &CacheKey) -> CacheResult<bool>;

    async fn exists(&self, key: &CacheKey) -> CacheResult<bool>;

    async fn stats(&self) -> CacheStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_default() {
        let stats = CacheStats::default();
        assert_eq!(stats.hits + stats.misses + stats.sets + stats.deletes, 0);
        assert_eq!(stats.entry_count, 0);
    }
}
