//! In-process score cache with per-entry TTL.
//!
//! Keys are 64-bit content fingerprints (see [`crate::hashing::fingerprint`]). Every
//! entry carries its own time-to-live; an expired entry is never returned even if
//! moka has not physically evicted it yet.

use moka::Expiry;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::ScoreCache;
use super::error::CacheError;
use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::scoring::ScoreResult;

#[derive(Debug, Clone)]
struct CachedScore {
    result: ScoreResult,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<u64, CachedScore> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &u64,
        value: &CachedScore,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &u64,
        value: &CachedScore,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded in-memory cache of final scores.
pub struct MemoryScoreCache {
    entries: Cache<u64, CachedScore>,
}

impl MemoryScoreCache {
    /// Creates a cache with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    #[inline]
    pub fn contains(&self, fingerprint: u64) -> bool {
        self.entries.contains_key(&fingerprint)
    }

    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl ScoreCache for MemoryScoreCache {
    fn get(&self, fingerprint: u64) -> Result<Option<ScoreResult>, CacheError> {
        Ok(self.entries.get(&fingerprint).map(|cached| cached.result))
    }

    fn put(&self, fingerprint: u64, result: &ScoreResult, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            fingerprint,
            CachedScore {
                result: result.clone(),
                ttl,
            },
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl Default for MemoryScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryScoreCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryScoreCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[derive(Clone, Debug)]
/// Shared handle to a [`MemoryScoreCache`].
pub struct MemoryScoreCacheHandle {
    inner: Arc<MemoryScoreCache>,
}

impl MemoryScoreCacheHandle {
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryScoreCache::new()),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            inner: Arc::new(MemoryScoreCache::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn cache(&self) -> &MemoryScoreCache {
        &self.inner
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Default for MemoryScoreCacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCache for MemoryScoreCacheHandle {
    fn get(&self, fingerprint: u64) -> Result<Option<ScoreResult>, CacheError> {
        self.inner.get(fingerprint)
    }

    fn put(&self, fingerprint: u64, result: &ScoreResult, ttl: Duration) -> Result<(), CacheError> {
        self.inner.put(fingerprint, result, ttl)
    }

    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }
}
