//! Deterministic, model-free scoring from surface features.
//!
//! Scores start from [`FALLBACK_BASE_BAND`] and move through a fixed chain of named
//! [`Adjustment`]s. Each adjustment is a pure function of [`TextFeatures`] whose delta
//! is bounded by its own ceiling, so the point budget can be read off
//! [`ADJUSTMENTS`]. Every criterion is then capped at [`FALLBACK_CRITERION_CEILING`]:
//! without comprehension of the text the scorer must never claim top-tier
//! proficiency.

use std::collections::HashMap;
use std::ops::Add;
use std::sync::Arc;

use tracing::debug;

use super::band::Band;
use super::feedback::threshold_remark;
use super::types::{Criterion, CriterionBands, ScoreResult};
use crate::constants::{FALLBACK_BASE_BAND, FALLBACK_CRITERION_CEILING};
use crate::input::count_words;
use crate::lexicon::{Lexicon, TextProbe};
use crate::task::TaskCategory;

/// Content words longer than this many characters are checked for repetition.
const CONTENT_WORD_MIN_LEN: usize = 5;
/// A content word used more than this many times counts as repetitive.
const REPETITION_LIMIT: usize = 3;
/// Words below the target band still counted as "near".
const NEAR_BAND_SLACK: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a word count sits relative to the category's target range.
pub enum WordBand {
    Target,
    Near,
    Outside,
}

impl WordBand {
    pub fn classify(words: usize, category: TaskCategory) -> Self {
        let target = category.target_words();
        if target.contains(&words) {
            return Self::Target;
        }
        let below = words < *target.start() && words + NEAR_BAND_SLACK >= *target.start();
        let above = words > *target.end() && words <= *target.end() + NEAR_BAND_SLACK;
        if below || above {
            Self::Near
        } else {
            Self::Outside
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Surface features the adjustments read.
pub struct TextFeatures {
    pub category: TaskCategory,
    pub words: usize,
    pub paragraphs: usize,
    pub word_band: WordBand,
    /// Distinct linking words present.
    pub linking_hits: usize,
    /// Distinct sophisticated-vocabulary terms present.
    pub sophisticated_hits: usize,
    /// Some content word appears more than [`REPETITION_LIMIT`] times.
    pub repetitive: bool,
    /// Distinct complex-clause markers present.
    pub clause_marker_hits: usize,
    /// Total occurrences of common-error patterns.
    pub error_occurrences: usize,
}

impl TextFeatures {
    pub fn extract(text: &str, category: TaskCategory, lexicon: &Lexicon) -> Self {
        let probe = TextProbe::new(text);
        let words = count_words(text);
        Self {
            category,
            words,
            paragraphs: count_paragraphs(text),
            word_band: WordBand::classify(words, category),
            linking_hits: probe.distinct_hits(&lexicon.linking_words),
            sophisticated_hits: probe.distinct_hits(&lexicon.sophisticated_vocabulary),
            repetitive: has_repeated_content_word(&probe),
            clause_marker_hits: probe.distinct_hits(&lexicon.complex_clause_markers),
            error_occurrences: probe.total_occurrences(&lexicon.common_errors),
        }
    }
}

/// Counts blocks of non-blank lines.
pub fn count_paragraphs(text: &str) -> usize {
    let mut count = 0;
    let mut inside = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            inside = false;
        } else if !inside {
            count += 1;
            inside = true;
        }
    }
    count
}

fn has_repeated_content_word(probe: &TextProbe) -> bool {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in probe.tokens() {
        if token.chars().count() >= CONTENT_WORD_MIN_LEN {
            *counts.entry(token.as_str()).or_default() += 1;
        }
    }
    counts.values().any(|&n| n > REPETITION_LIMIT)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Per-criterion change in bands.
pub struct BandDelta {
    pub ta: f64,
    pub cc: f64,
    pub lr: f64,
    pub gra: f64,
}

impl BandDelta {
    pub const ZERO: BandDelta = BandDelta {
        ta: 0.0,
        cc: 0.0,
        lr: 0.0,
        gra: 0.0,
    };

    /// Clamps every component to `[-ceiling, ceiling]`.
    pub fn bounded(self, ceiling: f64) -> Self {
        let b = |x: f64| x.clamp(-ceiling, ceiling);
        Self {
            ta: b(self.ta),
            cc: b(self.cc),
            lr: b(self.lr),
            gra: b(self.gra),
        }
    }
}

impl Add for BandDelta {
    type Output = BandDelta;

    fn add(self, rhs: Self) -> Self {
        Self {
            ta: self.ta + rhs.ta,
            cc: self.cc + rhs.cc,
            lr: self.lr + rhs.lr,
            gra: self.gra + rhs.gra,
        }
    }
}

/// A named, bounded scoring rule.
#[derive(Clone, Copy)]
pub struct Adjustment {
    pub name: &'static str,
    /// Largest absolute change this rule may make to any criterion.
    pub ceiling: f64,
    rule: fn(&TextFeatures) -> BandDelta,
}

impl Adjustment {
    pub fn apply(&self, features: &TextFeatures) -> BandDelta {
        (self.rule)(features).bounded(self.ceiling)
    }
}

impl std::fmt::Debug for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adjustment")
            .field("name", &self.name)
            .field("ceiling", &self.ceiling)
            .finish()
    }
}

/// Adjustments in application order.
pub const ADJUSTMENTS: [Adjustment; 5] = [
    Adjustment {
        name: "word_count_band",
        ceiling: 2.5,
        rule: word_count_band,
    },
    Adjustment {
        name: "paragraphing",
        ceiling: 1.0,
        rule: paragraphing,
    },
    Adjustment {
        name: "linking_words",
        ceiling: 1.5,
        rule: linking_words,
    },
    Adjustment {
        name: "vocabulary_range",
        ceiling: 2.0,
        rule: vocabulary_range,
    },
    Adjustment {
        name: "sentence_complexity",
        ceiling: 2.0,
        rule: sentence_complexity,
    },
];

fn word_count_band(f: &TextFeatures) -> BandDelta {
    match f.word_band {
        WordBand::Target => BandDelta {
            ta: 2.5,
            cc: 1.0,
            lr: 1.0,
            gra: 1.5,
        },
        WordBand::Near => BandDelta {
            ta: 1.0,
            cc: 0.5,
            lr: 0.5,
            gra: 1.0,
        },
        WordBand::Outside => BandDelta::ZERO,
    }
}

fn paragraphing(f: &TextFeatures) -> BandDelta {
    if f.paragraphs >= 4 {
        BandDelta {
            ta: 0.5,
            cc: 1.0,
            ..BandDelta::ZERO
        }
    } else {
        BandDelta::ZERO
    }
}

fn linking_words(f: &TextFeatures) -> BandDelta {
    let cc = match f.linking_hits {
        n if n >= 5 => 1.5,
        n if n >= 2 => 1.0,
        _ => 0.0,
    };
    BandDelta {
        cc,
        ..BandDelta::ZERO
    }
}

fn vocabulary_range(f: &TextFeatures) -> BandDelta {
    let bonus = match f.sophisticated_hits {
        n if n >= 4 => 2.0,
        n if n >= 2 => 1.0,
        _ => 0.0,
    };
    let penalty = if f.repetitive { 0.5 } else { 0.0 };
    BandDelta {
        lr: bonus - penalty,
        ..BandDelta::ZERO
    }
}

fn sentence_complexity(f: &TextFeatures) -> BandDelta {
    let bonus = match f.clause_marker_hits {
        n if n >= 4 => 2.0,
        n if n >= 2 => 1.0,
        _ => 0.0,
    };
    let penalty = 0.5 * f.error_occurrences as f64;
    BandDelta {
        gra: bonus - penalty,
        ..BandDelta::ZERO
    }
}

/// Sum of every adjustment's bounded delta, in [`ADJUSTMENTS`] order.
pub fn total_delta(features: &TextFeatures) -> BandDelta {
    ADJUSTMENTS
        .iter()
        .fold(BandDelta::ZERO, |acc, adj| acc + adj.apply(features))
}

/// Criterion bands for `features`: base plus adjustments, capped, then rounded.
pub fn criterion_bands(features: &TextFeatures) -> CriterionBands {
    let delta = total_delta(features);
    let capped = |x: f64| (FALLBACK_BASE_BAND + x).min(FALLBACK_CRITERION_CEILING);
    CriterionBands::from_scores(
        capped(delta.ta),
        capped(delta.cc),
        capped(delta.lr),
        capped(delta.gra),
    )
}

/// Model-free scorer. Identical inputs always produce identical results.
#[derive(Debug, Clone)]
pub struct FallbackScorer {
    lexicon: Arc<Lexicon>,
}

impl FallbackScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn features(&self, text: &str, category: TaskCategory) -> TextFeatures {
        TextFeatures::extract(text, category, &self.lexicon)
    }

    pub fn score(&self, text: &str, category: TaskCategory) -> ScoreResult {
        let features = self.features(text, category);
        let bands = criterion_bands(&features);
        let overall = bands.mean();

        debug!(
            words = features.words,
            paragraphs = features.paragraphs,
            linking = features.linking_hits,
            vocabulary = features.sophisticated_hits,
            clauses = features.clause_marker_hits,
            errors = features.error_occurrences,
            overall = %overall,
            "Fallback score computed"
        );

        let feedback = fallback_feedback(&bands, overall, &features);
        ScoreResult::new(bands, overall, feedback)
    }
}

fn fallback_feedback(bands: &CriterionBands, overall: Band, features: &TextFeatures) -> String {
    let mut sentences: Vec<String> = Vec::with_capacity(6);

    sentences.push(if overall.value() >= 6.5 {
        "Your essay communicates its main ideas clearly and shows a solid command of written English.".to_string()
    } else {
        "Your essay puts forward a basic response, but several areas need development to reach a higher band.".to_string()
    });

    for criterion in Criterion::ALL {
        if let Some(remark) = threshold_remark(criterion, bands.get(criterion)) {
            sentences.push(remark.to_string());
        }
    }

    sentences.push(word_count_remark(features));
    sentences.join(" ")
}

fn word_count_remark(features: &TextFeatures) -> String {
    let target = features.category.target_words();
    let (lo, hi) = (*target.start(), *target.end());
    let words = features.words;
    if target.contains(&words) {
        format!(
            "At {} words, your response sits within the recommended {}-{} word range for this task.",
            words, lo, hi
        )
    } else if words < lo {
        format!(
            "At {} words, your response is shorter than the recommended {}-{} words; develop your ideas further.",
            words, lo, hi
        )
    } else {
        format!(
            "At {} words, your response is longer than the recommended {}-{} words; keep your answer focused.",
            words, lo, hi
        )
    }
}
