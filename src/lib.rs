//! Quill library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`ScoringPipeline`], [`ScoreRequest`], [`ScoreOutcome`] - request orchestration
//! - [`ScoreResult`], [`Band`], [`ProficiencyTier`] - scoring output
//! - [`FallbackScorer`] - deterministic model-free scoring
//!
//! ## Components
//! - [`input`] - word counting and length validation
//! - [`cache`] - fingerprint-keyed score cache
//! - [`prompt`], [`model`], [`parse`] - the model round trip
//! - [`lexicon`] - vocabularies behind the evidence checks and fallback features
//!
//! ## Serving
//! - [`Config`], [`ConfigError`] - service configuration
//! - [`gateway`] - Axum router
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod hashing;
pub mod input;
pub mod lexicon;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod scoring;
pub mod task;

pub use cache::{CacheError, CacheStatus, MemoryScoreCache, MemoryScoreCacheHandle, ScoreCache};
#[cfg(any(test, feature = "mock"))]
pub use cache::FailingCache;
pub use config::{Config, ConfigError};
pub use hashing::{cache_key, fingerprint, fingerprint_hex, hash_submission};
pub use input::{InputRejected, count_words, validate};
pub use lexicon::{Lexicon, LexiconError};
pub use model::{GenaiInvoker, ModelError, ModelInvoker};
#[cfg(any(test, feature = "mock"))]
pub use model::MockInvoker;
pub use parse::{ParseError, ParsedScore};
pub use pipeline::{FallbackReason, ScoreOutcome, ScoreRequest, ScoreSource, ScoringPipeline, Stage};
pub use prompt::{PromptBuilder, RenderedPrompt};
pub use scoring::{
    Band, Criterion, CriterionBands, FallbackScorer, ProficiencyTier, ScoreResult, clamp_round,
};
pub use task::TaskCategory;
