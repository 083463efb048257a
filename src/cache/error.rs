use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Cache backend failures. The pipeline logs these and carries on as if uncached.
pub enum CacheError {
    /// Backing store cannot be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    /// Stored value could not be encoded or decoded.
    #[error("cache serialization failed: {0}")]
    Serialization(String),
}
