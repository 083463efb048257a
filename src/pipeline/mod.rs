//! Request orchestration as an explicit state machine.
//!
//! ```text
//! ValidateInput ─fail─▶ Rejected
//!     │
//! CacheLookup ─hit─▶ Served(cache)
//!     │ miss
//!     ├─ no model ─────────────────────────────▶ RunFallback ─▶ Served(fallback)
//! InvokeModel ─error─▶ RunFallback
//!     │
//! ParseResponse ─fail (1st)─▶ RetryInvoke ─error─▶ RunFallback
//!     │        ◀──────────────────┘
//!     │ fail (2nd) ─▶ RunFallback
//! Reconcile ─▶ GateFeedback ─▶ CacheStore ─▶ Served(model)
//! ```
//!
//! Only [`InputRejected`] escapes [`ScoringPipeline::score`]. Every other failure is
//! absorbed by a transition, and the fallback path cannot fail.

pub mod types;


pub use types::{FallbackReason, ScoreOutcome, ScoreRequest, ScoreSource, Stage};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheStatus, MemoryScoreCacheHandle, ScoreCache};
use crate::config::Config;
use crate::constants::{DEFAULT_CACHE_TTL, DEFAULT_MODEL_TIMEOUT};
use crate::hashing::{fingerprint, fingerprint_hex};
use crate::input::{self, InputRejected};
use crate::lexicon::Lexicon;
use crate::model::{GenaiInvoker, ModelInvoker};
use crate::parse::{self, ParsedScore};
use crate::prompt::{PromptBuilder, RenderedPrompt};
use crate::scoring::{FallbackScorer, ScoreResult, gate_feedback, reconcile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retry,
}

enum State {
    ValidateInput,
    CacheLookup,
    InvokeModel,
    ParseResponse { raw: String, attempt: Attempt },
    RetryInvoke,
    Reconcile(ParsedScore),
    GateFeedback(ScoreResult),
    CacheStore(ScoreResult),
    RunFallback(FallbackReason),
    Served(ScoreResult, ScoreSource),
    Rejected(InputRejected),
}

impl State {
    fn stage(&self) -> Option<Stage> {
        Some(match self {
            State::ValidateInput => Stage::ValidateInput,
            State::CacheLookup => Stage::CacheLookup,
            State::InvokeModel => Stage::InvokeModel,
            State::ParseResponse { .. } => Stage::ParseResponse,
            State::RetryInvoke => Stage::RetryInvoke,
            State::Reconcile(_) => Stage::Reconcile,
            State::GateFeedback(_) => Stage::GateFeedback,
            State::CacheStore(_) => Stage::CacheStore,
            State::RunFallback(_) => Stage::RunFallback,
            State::Served(..) | State::Rejected(_) => return None,
        })
    }
}

/// Per-request bookkeeping carried across transitions.
struct Run<'a> {
    request: &'a ScoreRequest,
    fingerprint: u64,
    prompt: Option<RenderedPrompt>,
    cache_status: CacheStatus,
    fallback_reason: Option<FallbackReason>,
    stages: Vec<Stage>,
    model_calls: u8,
}

/// Composes validation, cache, model, reconciliation and fallback.
///
/// Immutable after construction and shared across requests.
pub struct ScoringPipeline {
    invoker: Option<Arc<dyn ModelInvoker>>,
    cache: Option<Arc<dyn ScoreCache>>,
    lexicon: Arc<Lexicon>,
    prompts: PromptBuilder,
    fallback: FallbackScorer,
    model_timeout: Duration,
    cache_ttl: Duration,
}

impl ScoringPipeline {
    /// A pipeline with no model and no cache: every request is scored by the fallback.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            invoker: None,
            cache: None,
            fallback: FallbackScorer::new(lexicon.clone()),
            lexicon,
            prompts: PromptBuilder::new(),
            model_timeout: DEFAULT_MODEL_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Builds the invoker and cache that `config` enables.
    pub fn from_config(config: &Config, lexicon: Arc<Lexicon>) -> Self {
        let mut pipeline = Self::new(lexicon)
            .with_model_timeout(config.model_timeout)
            .with_cache_ttl(config.cache_ttl);

        if let Some(key) = config.model_api_key.as_deref() {
            pipeline = pipeline.with_invoker(Arc::new(GenaiInvoker::new(key, &config.model)));
        }
        if config.cache_enabled {
            pipeline = pipeline.with_cache(Arc::new(MemoryScoreCacheHandle::with_capacity(
                config.cache_capacity,
            )));
        }
        pipeline
    }

    pub fn with_invoker(mut self, invoker: Arc<dyn ModelInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn ScoreCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn has_model(&self) -> bool {
        self.invoker.is_some()
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    /// Scores one submission. Fails only when the input is out of range.
    #[instrument(
        skip(self, request),
        fields(category = %request.category, chars = request.text.len())
    )]
    pub async fn score(&self, request: &ScoreRequest) -> Result<ScoreOutcome, InputRejected> {
        let mut run = Run {
            request,
            fingerprint: fingerprint(request.category.as_str(), &request.text),
            prompt: None,
            cache_status: CacheStatus::Bypass,
            fallback_reason: None,
            stages: Vec::with_capacity(8),
            model_calls: 0,
        };

        let mut state = State::ValidateInput;
        loop {
            if let Some(stage) = state.stage() {
                run.stages.push(stage);
            }
            state = match state {
                State::ValidateInput => self.validate_input(&run),
                State::CacheLookup => self.cache_lookup(&mut run),
                State::InvokeModel => self.invoke_model(&mut run).await,
                State::ParseResponse { raw, attempt } => Self::parse_response(&raw, attempt),
                State::RetryInvoke => self.retry_invoke(&mut run).await,
                State::Reconcile(parsed) => {
                    State::GateFeedback(reconcile(&parsed, &request.text, &self.lexicon))
                }
                State::GateFeedback(mut result) => {
                    result.feedback = gate_feedback(&result.feedback, &result.bands(), &self.lexicon);
                    if self.cache.is_some() {
                        State::CacheStore(result)
                    } else {
                        State::Served(result, ScoreSource::Model)
                    }
                }
                State::CacheStore(result) => {
                    self.cache_store(&run, &result);
                    State::Served(result, ScoreSource::Model)
                }
                State::RunFallback(reason) => {
                    run.fallback_reason = Some(reason);
                    let result = self.fallback.score(&request.text, request.category);
                    State::Served(result, ScoreSource::Fallback)
                }
                State::Served(result, source) => {
                    info!(
                        fingerprint = %fingerprint_hex(run.fingerprint),
                        source = %source,
                        cache = %run.cache_status,
                        overall = %result.overall,
                        tier = %result.proficiency_tier,
                        model_calls = run.model_calls,
                        "Score served"
                    );
                    return Ok(ScoreOutcome {
                        result,
                        source,
                        cache_status: run.cache_status,
                        fallback_reason: run.fallback_reason,
                        stages: run.stages,
                        model_calls: run.model_calls,
                        fingerprint: run.fingerprint,
                    });
                }
                State::Rejected(reason) => {
                    debug!(words = reason.actual(), "Submission rejected");
                    return Err(reason);
                }
            };
        }
    }

    fn validate_input(&self, run: &Run<'_>) -> State {
        match input::validate(&run.request.text) {
            Ok(_) => State::CacheLookup,
            Err(reason) => State::Rejected(reason),
        }
    }

    fn cache_lookup(&self, run: &mut Run<'_>) -> State {
        if let Some(cache) = &self.cache {
            match cache.get(run.fingerprint) {
                Ok(Some(result)) => {
                    run.cache_status = CacheStatus::Hit;
                    return State::Served(result, ScoreSource::Cache);
                }
                Ok(None) => run.cache_status = CacheStatus::Miss,
                Err(e) => {
                    warn!(backend = cache.backend_name(), error = %e, "Cache lookup failed, treating as miss");
                    run.cache_status = CacheStatus::Miss;
                }
            }
        }

        if self.invoker.is_some() {
            State::InvokeModel
        } else {
            State::RunFallback(FallbackReason::ModelNotConfigured)
        }
    }

    async fn invoke_model(&self, run: &mut Run<'_>) -> State {
        let Some(invoker) = &self.invoker else {
            return State::RunFallback(FallbackReason::ModelNotConfigured);
        };
        let request = run.request;
        let prompt = self
            .prompts
            .build(request.category, request.prompt.as_deref(), &request.text);

        run.model_calls += 1;
        let outcome = invoker
            .invoke(&prompt.instruction, &prompt.payload, self.model_timeout)
            .await;
        run.prompt = Some(prompt);

        match outcome {
            Ok(raw) => State::ParseResponse {
                raw,
                attempt: Attempt::First,
            },
            Err(e) => {
                warn!(model = invoker.model_name(), kind = e.kind(), error = %e, "Model call failed");
                State::RunFallback(FallbackReason::ModelFailed)
            }
        }
    }

    fn parse_response(raw: &str, attempt: Attempt) -> State {
        match parse::parse(raw) {
            Ok(parsed) => State::Reconcile(parsed),
            Err(e) => {
                debug!(?attempt, error = %e, "Model output not parseable");
                match attempt {
                    Attempt::First => State::RetryInvoke,
                    Attempt::Retry => State::RunFallback(FallbackReason::UnparseableResponse),
                }
            }
        }
    }

    async fn retry_invoke(&self, run: &mut Run<'_>) -> State {
        let (Some(invoker), Some(prompt)) = (&self.invoker, &run.prompt) else {
            return State::RunFallback(FallbackReason::ModelNotConfigured);
        };
        let strict = prompt.with_strict_directive();

        run.model_calls += 1;
        match invoker
            .invoke(&strict.instruction, &strict.payload, self.model_timeout)
            .await
        {
            Ok(raw) => State::ParseResponse {
                raw,
                attempt: Attempt::Retry,
            },
            Err(e) => {
                warn!(model = invoker.model_name(), kind = e.kind(), error = %e, "Model retry failed");
                State::RunFallback(FallbackReason::RetryFailed)
            }
        }
    }

    fn cache_store(&self, run: &Run<'_>, result: &ScoreResult) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.put(run.fingerprint, result, self.cache_ttl) {
            warn!(backend = cache.backend_name(), error = %e, "Cache store failed");
        }
    }
}

impl std::fmt::Debug for ScoringPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringPipeline")
            .field("model", &self.invoker.as_ref().map(|i| i.model_name().to_string()))
            .field("cache", &self.cache.as_ref().map(|c| c.backend_name()))
            .field("model_timeout", &self.model_timeout)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}
