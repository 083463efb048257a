use serde::Serialize;

pub const QUILL_STATUS_HEADER: &str = "X-Quill-Status";
pub const QUILL_STATUS_HEALTHY: &str = "healthy";
pub const QUILL_STATUS_READY: &str = "ready";
pub const QUILL_STATUS_ENABLED: &str = "enabled";
pub const QUILL_STATUS_DISABLED: &str = "disabled";
pub const QUILL_STATUS_CONFIGURED: &str = "configured";
pub const QUILL_STATUS_FALLBACK_ONLY: &str = "fallback_only";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// What the cache contributed to one request.
pub enum CacheStatus {
    /// A live entry was served.
    Hit,
    /// Looked up and found nothing usable (including a failed lookup).
    Miss,
    /// No cache is configured.
    Bypass,
}

impl CacheStatus {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Bypass => "BYPASS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}
