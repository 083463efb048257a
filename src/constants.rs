//! Cross-cutting, shared constants.
//!
//! Band arithmetic works in half-band steps, so the scale bounds below are the only
//! values expressed directly in bands; everything else derives from them.
//!
//! # Scoring Invariants
//!
//! - Every criterion and aggregate lives in `[MIN_BAND, MAX_BAND]` in `0.5` steps.
//! - The fallback scorer never reports a criterion above [`FALLBACK_CRITERION_CEILING`].
//! - A model-reported aggregate of [`PLAUSIBILITY_TRIGGER`] or more must be backed by
//!   textual evidence, otherwise every criterion is capped at [`PLAUSIBILITY_CAP`].

use std::time::Duration;

pub const MIN_BAND: f64 = 0.0;
pub const MAX_BAND: f64 = 9.0;
pub const MAX_HALF_STEPS: u8 = (MAX_BAND * 2.0) as u8;

/// Inclusive word-count window accepted by the input validator.
pub const MIN_WORDS: usize = 150;
pub const MAX_WORDS: usize = 320;

/// Submissions shorter than this have task achievement capped at [`SHORT_RESPONSE_TA_CAP`].
pub const SHORT_RESPONSE_WORDS: usize = 200;
pub const SHORT_RESPONSE_TA_CAP: f64 = 5.5;

pub const PLAUSIBILITY_TRIGGER: f64 = 8.0;
pub const PLAUSIBILITY_CAP: f64 = 7.5;
pub const PLAUSIBILITY_MIN_ADVANCED_HITS: usize = 3;
pub const PLAUSIBILITY_MIN_PATTERN_HITS: usize = 1;
pub const PLAUSIBILITY_MIN_CHARS: usize = 250;

/// A model aggregate within this distance of the criterion mean is kept.
pub const AGGREGATE_TOLERANCE: f64 = 0.5;

pub const FALLBACK_BASE_BAND: f64 = 4.0;
pub const FALLBACK_CRITERION_CEILING: f64 = 7.0;

pub const FEEDBACK_MIN_CHARS: usize = 50;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);
pub const MODEL_TEMPERATURE: f64 = 0.2;
pub const MODEL_MAX_TOKENS: u32 = 500;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Hex characters kept from the content hash when rendering a cache key.
pub const FINGERPRINT_HEX_LEN: usize = 16;
