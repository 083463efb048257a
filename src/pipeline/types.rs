use serde::Serialize;

use crate::cache::CacheStatus;
use crate::scoring::ScoreResult;
use crate::task::TaskCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One scoring request. Built per call and discarded afterwards.
pub struct ScoreRequest {
    pub category: TaskCategory,
    /// Caller's task prompt; empty or absent means the category's canonical prompt.
    pub prompt: Option<String>,
    pub text: String,
}

impl ScoreRequest {
    pub fn new(category: TaskCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            prompt: None,
            text: text.into(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Where the served result came from.
pub enum ScoreSource {
    Cache,
    Model,
    Fallback,
}

impl ScoreSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreSource::Cache => "cache",
            ScoreSource::Model => "model",
            ScoreSource::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Non-terminal pipeline states, in the order a request may visit them.
pub enum Stage {
    ValidateInput,
    CacheLookup,
    InvokeModel,
    ParseResponse,
    RetryInvoke,
    Reconcile,
    GateFeedback,
    CacheStore,
    RunFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Why a request ended up on the fallback scorer.
pub enum FallbackReason {
    ModelNotConfigured,
    ModelFailed,
    RetryFailed,
    UnparseableResponse,
}

#[derive(Debug, Clone, PartialEq)]
/// A served score plus a trace of how it was produced.
pub struct ScoreOutcome {
    pub result: ScoreResult,
    pub source: ScoreSource,
    pub cache_status: CacheStatus,
    pub fallback_reason: Option<FallbackReason>,
    /// Stages visited, in order.
    pub stages: Vec<Stage>,
    /// Number of model calls made (0, 1 or 2).
    pub model_calls: u8,
    pub fingerprint: u64,
}

impl ScoreOutcome {
    pub fn visited(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }
}
