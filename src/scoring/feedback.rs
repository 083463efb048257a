//! Feedback gate and criterion-specific narrative.
//!
//! Model feedback is kept only if it is long enough and not a known placeholder;
//! otherwise it is replaced with narrative built from the final bands, led by the
//! weakest criterion.

use tracing::debug;

use super::band::Band;
use super::types::{Criterion, CriterionBands};
use crate::constants::FEEDBACK_MIN_CHARS;
use crate::lexicon::Lexicon;

/// Band below which a criterion gets the firm recommendation.
pub const FOCUS_THRESHOLD: f64 = 6.5;
/// Band below which a criterion gets the lighter recommendation.
pub const POLISH_THRESHOLD: f64 = 7.0;

/// Returns `true` if `feedback` is specific enough to show as-is.
pub fn is_acceptable(feedback: &str, lexicon: &Lexicon) -> bool {
    feedback.trim().chars().count() >= FEEDBACK_MIN_CHARS && !lexicon.is_generic_feedback(feedback)
}

/// Keeps `feedback` if acceptable, otherwise synthesizes narrative from `bands`.
pub fn gate_feedback(feedback: &str, bands: &CriterionBands, lexicon: &Lexicon) -> String {
    if is_acceptable(feedback, lexicon) {
        return feedback.trim().to_string();
    }

    debug!(
        len = feedback.trim().chars().count(),
        "Replacing short or generic feedback"
    );
    narrative_for(bands)
}

/// Narrative that names the weakest criterion first, then the strongest.
pub fn narrative_for(bands: &CriterionBands) -> String {
    let weakest = bands.weakest();
    let strongest = bands.strongest();
    let low = bands.get(weakest);
    let high = bands.get(strongest);

    let mut out = format!(
        "{} is your weakest area at band {}. {}",
        weakest.label(),
        low,
        improvement_advice(weakest)
    );

    if low == high {
        out.push_str(&format!(
            " All four criteria sit at band {}, so progress in any one of them will lift your overall score.",
            high
        ));
    } else {
        out.push_str(&format!(
            " Your strongest criterion is {} at band {}; keep building on it.",
            strongest.label(),
            high
        ));
    }
    out
}

/// Concrete next step for a criterion.
pub fn improvement_advice(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::TaskAchievement => {
            "Address every part of the question directly and support each main idea with a relevant, developed example."
        }
        Criterion::Coherence => {
            "Organise ideas into clearly focused paragraphs and use a wider range of linking devices to guide the reader."
        }
        Criterion::LexicalResource => {
            "Use more precise, less common vocabulary and paraphrase instead of repeating the same words."
        }
        Criterion::Grammar => {
            "Mix simple and complex sentence structures and proofread carefully for agreement and tense errors."
        }
    }
}

/// Templated sentence for a criterion below [`POLISH_THRESHOLD`], firmer below
/// [`FOCUS_THRESHOLD`]. `None` when the criterion needs no remark.
pub fn threshold_remark(criterion: Criterion, band: Band) -> Option<&'static str> {
    let value = band.value();
    if value < FOCUS_THRESHOLD {
        Some(match criterion {
            Criterion::TaskAchievement => {
                "Develop your response more fully so that every part of the task is covered with clear, supported ideas."
            }
            Criterion::Coherence => {
                "Work on improving coherence with better linking devices and clearer paragraph structure."
            }
            Criterion::LexicalResource => {
                "Try to use more varied vocabulary and avoid repeating the same words."
            }
            Criterion::Grammar => {
                "Focus on using more complex sentence structures while maintaining accuracy."
            }
        })
    } else if value < POLISH_THRESHOLD {
        Some(match criterion {
            Criterion::TaskAchievement => {
                "Extend your main points with one more specific example to strengthen your task response."
            }
            Criterion::Coherence => {
                "Your organisation is sound; vary your cohesive devices to make transitions smoother."
            }
            Criterion::LexicalResource => {
                "Your vocabulary is adequate; add a few precise collocations to show greater range."
            }
            Criterion::Grammar => {
                "Your grammar is generally accurate; add a wider variety of clause types."
            }
        })
    } else {
        None
    }
}
