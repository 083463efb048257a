//! Outbound calls to the scoring model.
//!
//! A [`ModelInvoker`] performs exactly one attempt per call and always honours the
//! deadline it is given. Retrying is the pipeline's decision, not the invoker's.

pub mod error;
pub mod provider;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::ModelError;
pub use provider::GenaiInvoker;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockInvoker;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
/// A single-attempt, deadline-bounded call to a scoring model.
pub trait ModelInvoker: Send + Sync {
    /// Sends `instruction` (system message) and `payload` (user message) and returns
    /// the model's raw text.
    async fn invoke(
        &self,
        instruction: &str,
        payload: &str,
        deadline: Duration,
    ) -> Result<String, ModelError>;

    /// Model identifier for logs.
    fn model_name(&self) -> &str;
}

/// Runs `call` under `deadline`, mapping expiry to [`ModelError::Timeout`].
pub async fn with_deadline<F>(deadline: Duration, call: F) -> Result<String, ModelError>
where
    F: Future<Output = Result<String, ModelError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(ModelError::Timeout(deadline)),
    }
}
