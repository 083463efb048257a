//! Plausibility gate for top-tier model scores.
//!
//! The check is deliberately conservative: it only confirms a high score when the
//! text shows a spread of advanced vocabulary and at least one complex construction.

use tracing::debug;

use crate::constants::{
    PLAUSIBILITY_MIN_ADVANCED_HITS, PLAUSIBILITY_MIN_CHARS, PLAUSIBILITY_MIN_PATTERN_HITS,
};
use crate::lexicon::{Lexicon, TextProbe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Raw counts behind a plausibility decision.
pub struct Evidence {
    /// Distinct advanced-lexical terms present.
    pub advanced_hits: usize,
    /// Distinct complex syntactic patterns present.
    pub pattern_hits: usize,
    /// Length of the raw text in characters.
    pub chars: usize,
}

impl Evidence {
    pub fn collect(text: &str, lexicon: &Lexicon) -> Self {
        let probe = TextProbe::new(text);
        Self {
            advanced_hits: probe.distinct_hits(&lexicon.advanced_lexical),
            pattern_hits: probe.distinct_hits(&lexicon.complex_patterns),
            chars: text.chars().count(),
        }
    }

    pub fn is_sufficient(&self) -> bool {
        self.advanced_hits >= PLAUSIBILITY_MIN_ADVANCED_HITS
            && self.pattern_hits >= PLAUSIBILITY_MIN_PATTERN_HITS
            && self.chars >= PLAUSIBILITY_MIN_CHARS
    }
}

/// Returns `true` if the text carries enough lexical and syntactic evidence to back a
/// top-tier score.
pub fn is_high_score_justified(text: &str, lexicon: &Lexicon) -> bool {
    let evidence = Evidence::collect(text, lexicon);
    let justified = evidence.is_sufficient();
    debug!(
        advanced_hits = evidence.advanced_hits,
        pattern_hits = evidence.pattern_hits,
        chars = evidence.chars,
        justified,
        "Plausibility evidence collected"
    );
    justified
}
