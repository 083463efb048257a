//! Band arithmetic, score reconciliation and the model-free fallback scorer.
//!
//! # Flow
//!
//! A model score goes through [`reconcile`] (clamping, aggregate check, short-response
//! penalty, plausibility gate) and then [`gate_feedback`]. When no usable model score
//! exists, [`FallbackScorer`] produces a complete [`ScoreResult`] from surface
//! features alone.
//!
//! All bands are stored as [`Band`] half-steps, so every value that leaves this module
//! is already on the 0.0..=9.0 half-band grid.

pub mod band;
pub mod evidence;
pub mod fallback;
pub mod feedback;
pub mod reconcile;
pub mod types;

pub use band::{Band, ProficiencyTier, clamp_round};
pub use evidence::{Evidence, is_high_score_justified};
pub use fallback::{ADJUSTMENTS, Adjustment, BandDelta, FallbackScorer, TextFeatures, WordBand};
pub use feedback::{gate_feedback, is_acceptable, narrative_for};
pub use reconcile::{reconcile, reconcile_aggregate};
pub use types::{Criterion, CriterionBands, ScoreResult};
