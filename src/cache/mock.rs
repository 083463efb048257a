use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::ScoreCache;
use super::error::CacheError;
use crate::scoring::ScoreResult;

#[derive(Clone, Default, Debug)]
/// Cache whose backing store is permanently unreachable.
pub struct FailingCache {
    gets: Arc<AtomicUsize>,
    puts: Arc<AtomicUsize>,
}

impl FailingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_attempts(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn put_attempts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl ScoreCache for FailingCache {
    fn get(&self, _fingerprint: u64) -> Result<Option<ScoreResult>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    fn put(&self, _fingerprint: u64, _result: &ScoreResult, _ttl: Duration) -> Result<(), CacheError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
