use serde::{Deserialize, Serialize};

use super::band::{Band, ProficiencyTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// One of the four rubric criteria.
pub enum Criterion {
    TaskAchievement,
    Coherence,
    LexicalResource,
    Grammar,
}

impl Criterion {
    /// Fixed precedence order, also used to break ties deterministically.
    pub const ALL: [Criterion; 4] = [
        Self::TaskAchievement,
        Self::Coherence,
        Self::LexicalResource,
        Self::Grammar,
    ];

    /// Human-readable criterion name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TaskAchievement => "Task Achievement",
            Self::Coherence => "Coherence and Cohesion",
            Self::LexicalResource => "Lexical Resource",
            Self::Grammar => "Grammatical Range and Accuracy",
        }
    }

    /// Short field name used in the model's output format.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskAchievement => "ta",
            Self::Coherence => "cc",
            Self::LexicalResource => "lr",
            Self::Grammar => "gra",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The four criterion bands, without aggregate or feedback.
pub struct CriterionBands {
    pub task_achievement: Band,
    pub coherence: Band,
    pub lexical_resource: Band,
    pub grammar: Band,
}

impl CriterionBands {
    /// Builds bands from raw scores, clamping and rounding each independently.
    pub fn from_scores(ta: f64, cc: f64, lr: f64, gra: f64) -> Self {
        Self {
            task_achievement: Band::from_score(ta),
            coherence: Band::from_score(cc),
            lexical_resource: Band::from_score(lr),
            grammar: Band::from_score(gra),
        }
    }

    pub fn get(&self, criterion: Criterion) -> Band {
        match criterion {
            Criterion::TaskAchievement => self.task_achievement,
            Criterion::Coherence => self.coherence,
            Criterion::LexicalResource => self.lexical_resource,
            Criterion::Grammar => self.grammar,
        }
    }

    fn slot(&mut self, criterion: Criterion) -> &mut Band {
        match criterion {
            Criterion::TaskAchievement => &mut self.task_achievement,
            Criterion::Coherence => &mut self.coherence,
            Criterion::LexicalResource => &mut self.lexical_resource,
            Criterion::Grammar => &mut self.grammar,
        }
    }

    /// Lowers `criterion` to `cap` if it is above it. Returns `true` if it changed.
    pub fn cap(&mut self, criterion: Criterion, cap: Band) -> bool {
        let slot = self.slot(criterion);
        if *slot > cap {
            *slot = cap;
            true
        } else {
            false
        }
    }

    /// Caps every criterion. Returns `true` if any changed.
    pub fn cap_all(&mut self, cap: Band) -> bool {
        Criterion::ALL
            .iter()
            .fold(false, |changed, c| self.cap(*c, cap) | changed)
    }

    pub fn as_array(&self) -> [Band; 4] {
        Criterion::ALL.map(|c| self.get(c))
    }

    /// Clamped, rounded mean of the four criteria.
    pub fn mean(&self) -> Band {
        Band::mean(&self.as_array())
    }

    /// Lowest criterion; ties resolve to the earliest in [`Criterion::ALL`].
    pub fn weakest(&self) -> Criterion {
        let mut weakest = Criterion::TaskAchievement;
        for criterion in Criterion::ALL {
            if self.get(criterion) < self.get(weakest) {
                weakest = criterion;
            }
        }
        weakest
    }

    /// Highest criterion; ties resolve to the earliest in [`Criterion::ALL`].
    pub fn strongest(&self) -> Criterion {
        let mut strongest = Criterion::TaskAchievement;
        for criterion in Criterion::ALL {
            if self.get(criterion) > self.get(strongest) {
                strongest = criterion;
            }
        }
        strongest
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Final output of the scoring pipeline.
pub struct ScoreResult {
    pub task_achievement: Band,
    pub coherence: Band,
    pub lexical_resource: Band,
    pub grammar: Band,
    pub overall: Band,
    pub proficiency_tier: ProficiencyTier,
    pub feedback: String,
}

impl ScoreResult {
    /// Assembles a result, deriving the tier from `overall`.
    pub fn new(bands: CriterionBands, overall: Band, feedback: impl Into<String>) -> Self {
        Self {
            task_achievement: bands.task_achievement,
            coherence: bands.coherence,
            lexical_resource: bands.lexical_resource,
            grammar: bands.grammar,
            overall,
            proficiency_tier: ProficiencyTier::from_band(overall),
            feedback: feedback.into(),
        }
    }

    pub fn bands(&self) -> CriterionBands {
        CriterionBands {
            task_achievement: self.task_achievement,
            coherence: self.coherence,
            lexical_resource: self.lexical_resource,
            grammar: self.grammar,
        }
    }
}
