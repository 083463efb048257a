use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures of a single model call. All of them route the pipeline to the fallback.
pub enum ModelError {
    /// Network, provider or protocol failure.
    #[error("model transport error: {0}")]
    Transport(String),

    /// Provider refused the call for quota, billing or rate-limit reasons.
    #[error("model quota exceeded: {0}")]
    Quota(String),

    /// No answer before the deadline.
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
}

impl ModelError {
    /// Classifies a provider error message as [`ModelError::Quota`] or
    /// [`ModelError::Transport`].
    pub fn from_provider_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let is_quota = lower.contains("429")
            || lower.contains("quota")
            || lower.contains("rate limit")
            || lower.contains("rate_limit")
            || lower.contains("insufficient_quota")
            || lower.contains("billing");
        if is_quota {
            Self::Quota(message)
        } else {
            Self::Transport(message)
        }
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Quota(_) => "quota",
            Self::Timeout(_) => "timeout",
        }
    }
}
