//! Content-addressed score cache.
//!
//! Entries are keyed by a fingerprint of `(category, text)` and written once per
//! TTL window; a concurrent write for the same fingerprint simply wins last. Callers
//! treat every [`CacheError`] as a miss, so a broken backend never fails a request.

pub mod error;
pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;


use std::time::Duration;

use crate::scoring::ScoreResult;

pub use error::CacheError;
pub use memory::{MemoryScoreCache, MemoryScoreCacheHandle};
#[cfg(any(test, feature = "mock"))]
pub use mock::FailingCache;
pub use types::{
    CacheStatus, QUILL_STATUS_CONFIGURED, QUILL_STATUS_DISABLED, QUILL_STATUS_ENABLED,
    QUILL_STATUS_FALLBACK_ONLY, QUILL_STATUS_HEADER, QUILL_STATUS_HEALTHY, QUILL_STATUS_READY,
};

/// Fingerprint-keyed store of final scores.
pub trait ScoreCache: Send + Sync {
    /// Returns the live entry for `fingerprint`, if any.
    fn get(&self, fingerprint: u64) -> Result<Option<ScoreResult>, CacheError>;

    /// Stores `result` under `fingerprint` for `ttl`, replacing any existing entry.
    fn put(&self, fingerprint: u64, result: &ScoreResult, ttl: Duration) -> Result<(), CacheError>;

    /// Backend label for logs and readiness output.
    fn backend_name(&self) -> &'static str;
}
