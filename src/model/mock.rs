use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::ModelError;
use super::{ModelInvoker, with_deadline};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One recorded invocation.
pub struct RecordedCall {
    pub instruction: String,
    pub payload: String,
}

#[derive(Default)]
struct MockState {
    script: VecDeque<Result<String, ModelError>>,
    calls: Vec<RecordedCall>,
}

#[derive(Clone, Default)]
/// Scripted invoker: replies are consumed in order, and an exhausted script answers
/// with a transport error.
pub struct MockInvoker {
    state: Arc<Mutex<MockState>>,
    in_flight: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoker that answers every scripted reply with `raw`, in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        for reply in replies {
            mock.push_reply(reply);
        }
        mock
    }

    /// Delays every reply by `delay` (still bounded by the caller's deadline).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_reply(&self, raw: impl Into<String>) {
        self.state.lock().script.push_back(Ok(raw.into()));
    }

    pub fn push_error(&self, err: ModelError) {
        self.state.lock().script.push_back(Err(err));
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    /// Calls that have started but not yet returned or been dropped.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ModelInvoker for MockInvoker {
    async fn invoke(
        &self,
        instruction: &str,
        payload: &str,
        deadline: Duration,
    ) -> Result<String, ModelError> {
        let next = {
            let mut state = self.state.lock();
            state.calls.push(RecordedCall {
                instruction: instruction.to_string(),
                payload: payload.to_string(),
            });
            state.script.pop_front()
        };
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard(self.in_flight.clone());

        let delay = self.delay;
        with_deadline(deadline, async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            next.unwrap_or_else(|| Err(ModelError::Transport("script exhausted".to_string())))
        })
        .await
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
