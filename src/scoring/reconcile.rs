//! Reconciliation of a parsed model score into a bounded [`ScoreResult`].

use tracing::{debug, info};

use super::band::Band;
use super::evidence::is_high_score_justified;
use super::types::{Criterion, CriterionBands, ScoreResult};
use crate::constants::{
    AGGREGATE_TOLERANCE, PLAUSIBILITY_CAP, PLAUSIBILITY_TRIGGER, SHORT_RESPONSE_TA_CAP,
    SHORT_RESPONSE_WORDS,
};
use crate::input::count_words;
use crate::lexicon::Lexicon;
use crate::parse::ParsedScore;

/// Picks the aggregate: the model's own value when it is present and within
/// [`AGGREGATE_TOLERANCE`] of the criterion mean, the mean otherwise.
pub fn reconcile_aggregate(bands: &CriterionBands, reported: Option<f64>) -> Band {
    let mean = bands.mean();
    match reported {
        Some(value) if value > 0.0 => {
            // Tolerance applies to the value as sent; rounding only happens on keep.
            if (value - mean.value()).abs() > AGGREGATE_TOLERANCE {
                debug!(
                    reported = value,
                    mean = %mean,
                    "Model aggregate disagrees with criteria, using mean"
                );
                mean
            } else {
                Band::from_score(value)
            }
        }
        _ => mean,
    }
}

/// Turns a parsed model record into a final result for `text`.
///
/// Steps run in order: clamp each criterion, reconcile the aggregate, apply the
/// short-response cap on task achievement, apply the plausibility gate, derive the
/// tier. The parsed feedback is carried through untouched.
pub fn reconcile(parsed: &ParsedScore, text: &str, lexicon: &Lexicon) -> ScoreResult {
    let mut bands = CriterionBands::from_scores(parsed.ta, parsed.cc, parsed.lr, parsed.gra);
    let mut overall = reconcile_aggregate(&bands, parsed.overall);

    let words = count_words(text);
    if words < SHORT_RESPONSE_WORDS {
        let capped = bands.cap(
            Criterion::TaskAchievement,
            Band::from_score(SHORT_RESPONSE_TA_CAP),
        );
        overall = bands.mean();
        debug!(words, capped, overall = %overall, "Short response penalty applied");
    }

    if overall.value() >= PLAUSIBILITY_TRIGGER && !is_high_score_justified(text, lexicon) {
        bands.cap_all(Band::from_score(PLAUSIBILITY_CAP));
        let before = overall;
        overall = bands.mean();
        info!(
            before = %before,
            after = %overall,
            "High score not supported by text, criteria capped"
        );
    }

    ScoreResult::new(bands, overall, parsed.feedback.clone())
}
