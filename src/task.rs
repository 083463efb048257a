//! Task categories and their per-category defaults.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Closed set of writing tasks the rubric is calibrated for.
pub enum TaskCategory {
    /// Report describing visual information (chart, table, diagram).
    Task1,
    /// Argumentative essay. Canonical category for unrecognized input.
    #[default]
    Task2,
}

impl TaskCategory {
    const TASK1_PROMPT: &'static str =
        "Describe the information shown in the chart, graph, table or diagram.";
    const TASK2_PROMPT: &'static str =
        "Present a clear position on the given topic with supporting arguments.";

    /// Resolves a caller-supplied category, falling back to [`TaskCategory::Task2`].
    pub fn parse_lenient(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        match normalized.as_str() {
            "task1" | "1" => Self::Task1,
            _ => Self::Task2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task1 => "task1",
            Self::Task2 => "task2",
        }
    }

    /// Prompt used when the caller supplies none.
    pub fn canonical_prompt(&self) -> &'static str {
        match self {
            Self::Task1 => Self::TASK1_PROMPT,
            Self::Task2 => Self::TASK2_PROMPT,
        }
    }

    /// Word range the heuristic scorer treats as on-target.
    pub fn target_words(&self) -> RangeInclusive<usize> {
        match self {
            Self::Task1 => 150..=220,
            Self::Task2 => 250..=320,
        }
    }

    /// Effective prompt: `prompt` when it has content, the canonical one otherwise.
    pub fn effective_prompt<'a>(&self, prompt: Option<&'a str>) -> &'a str {
        match prompt.map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => self.canonical_prompt(),
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TaskCategory {
    fn from(raw: &str) -> Self {
        Self::parse_lenient(raw)
    }
}
