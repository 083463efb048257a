//! Extraction of a score record from raw model output.
//!
//! Models wrap JSON in prose or Markdown fences often enough that the parser is
//! lenient about everything outside the object: fence lines are dropped, and only the
//! span from the first `{` to the last `}` is decoded.

pub mod error;

pub use error::ParseError;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Score record as the model reports it, before any reconciliation.
pub struct ParsedScore {
    #[serde(alias = "task_achievement", alias = "taskAchievement")]
    pub ta: f64,
    #[serde(alias = "coherence", alias = "coherence_cohesion")]
    pub cc: f64,
    #[serde(alias = "lexical_resource", alias = "lexicalResource")]
    pub lr: f64,
    #[serde(alias = "grammar", alias = "grammatical_range")]
    pub gra: f64,
    /// Model's own aggregate. Absent or zero means "not reported".
    #[serde(default)]
    pub overall: Option<f64>,
    pub feedback: String,
    /// Model's tier label. Informational only: the tier is always rederived.
    #[serde(default, rename = "cefr", alias = "tier", alias = "proficiency_tier")]
    pub tier: Option<String>,
}

/// Removes every line whose trimmed form starts with a code-fence marker.
pub fn strip_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Span from the first `{` to the last `}`, if the braces are in order.
pub fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses raw model output into a [`ParsedScore`].
pub fn parse(raw: &str) -> Result<ParsedScore, ParseError> {
    let stripped = strip_fences(raw);
    let object = object_span(&stripped).ok_or(ParseError::NoObject {
        len: stripped.len(),
    })?;
    Ok(serde_json::from_str(object)?)
}
