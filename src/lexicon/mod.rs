//! Immutable vocabularies shared by the plausibility gate, the fallback scorer and
//! the feedback gate.
//!
//! A [`Lexicon`] is built once at startup and handed to components behind an `Arc`;
//! nothing mutates it afterwards.

mod defaults;
pub mod error;
pub mod probe;

pub use error::LexiconError;
pub use probe::TextProbe;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::input::normalize_whitespace;

/// Minimum size of the advanced-lexical vocabulary used by the plausibility gate.
pub const MIN_ADVANCED_LEXICAL: usize = 14;
/// Minimum size of the complex-pattern vocabulary used by the plausibility gate.
pub const MIN_COMPLEX_PATTERNS: usize = 7;

/// Vocabulary set used for evidence checks and heuristic scoring.
///
/// Missing lists in a JSON file fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Single words that indicate a wide lexical range.
    pub advanced_lexical: Vec<String>,
    /// Multi-word constructions that indicate syntactic range.
    pub complex_patterns: Vec<String>,
    /// Cohesive devices.
    pub linking_words: Vec<String>,
    pub sophisticated_vocabulary: Vec<String>,
    /// Subordinators and relative markers.
    pub complex_clause_markers: Vec<String>,
    /// Frequent learner errors, matched as whole token sequences.
    pub common_errors: Vec<String>,
    /// Feedback strings that say nothing about the submission.
    pub generic_feedback: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            advanced_lexical: owned(defaults::ADVANCED_LEXICAL),
            complex_patterns: owned(defaults::COMPLEX_PATTERNS),
            linking_words: owned(defaults::LINKING_WORDS),
            sophisticated_vocabulary: owned(defaults::SOPHISTICATED_VOCABULARY),
            complex_clause_markers: owned(defaults::COMPLEX_CLAUSE_MARKERS),
            common_errors: owned(defaults::COMMON_ERRORS),
            generic_feedback: owned(defaults::GENERIC_FEEDBACK),
        }
    }
}

impl Lexicon {
    /// Loads a lexicon from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon: Lexicon =
            serde_json::from_str(&raw).map_err(|source| LexiconError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Checks gate vocabulary sizes and rejects terms with no word characters.
    pub fn validate(&self) -> Result<(), LexiconError> {
        if self.advanced_lexical.len() < MIN_ADVANCED_LEXICAL {
            return Err(LexiconError::TooFewEntries {
                list: "advanced_lexical",
                required: MIN_ADVANCED_LEXICAL,
                actual: self.advanced_lexical.len(),
            });
        }
        if self.complex_patterns.len() < MIN_COMPLEX_PATTERNS {
            return Err(LexiconError::TooFewEntries {
                list: "complex_patterns",
                required: MIN_COMPLEX_PATTERNS,
                actual: self.complex_patterns.len(),
            });
        }

        let lists: [(&'static str, &[String]); 6] = [
            ("advanced_lexical", self.advanced_lexical.as_slice()),
            ("complex_patterns", self.complex_patterns.as_slice()),
            ("linking_words", self.linking_words.as_slice()),
            ("sophisticated_vocabulary", self.sophisticated_vocabulary.as_slice()),
            ("complex_clause_markers", self.complex_clause_markers.as_slice()),
            ("common_errors", self.common_errors.as_slice()),
        ];
        for (list, terms) in lists {
            if terms.iter().any(|t| probe::tokenize(t).is_empty()) {
                return Err(LexiconError::EmptyTerm { list });
            }
        }

        Ok(())
    }

    /// Returns `true` if `feedback` matches a known placeholder, ignoring case and
    /// whitespace layout.
    pub fn is_generic_feedback(&self, feedback: &str) -> bool {
        let candidate = normalize_whitespace(feedback).to_lowercase();
        self.generic_feedback
            .iter()
            .any(|g| normalize_whitespace(g).to_lowercase() == candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_lexicon_is_valid() {
        let lexicon = Lexicon::default();
        assert!(lexicon.validate().is_ok());
        assert!(lexicon.advanced_lexical.len() >= MIN_ADVANCED_LEXICAL);
        assert!(lexicon.complex_patterns.len() >= MIN_COMPLEX_PATTERNS);
    }

    #[test]
    fn test_complex_patterns_are_multi_word() {
        let lexicon = Lexicon::default();
        for pattern in &lexicon.complex_patterns {
            assert!(pattern.contains(' '), "'{}' should be multi-word", pattern);
        }
    }

    #[test]
    fn test_generic_feedback_detection() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_generic_feedback("  good ESSAY.   keep practicing. "));
        assert!(!lexicon.is_generic_feedback(
            "Your second paragraph drifts from the question about public transport."
        ));
    }

    #[test]
    fn test_too_few_advanced_terms_rejected() {
        let lexicon = Lexicon {
            advanced_lexical: vec!["albeit".to_string()],
            ..Lexicon::default()
        };
        match lexicon.validate() {
            Err(LexiconError::TooFewEntries { list, actual, .. }) => {
                assert_eq!(list, "advanced_lexical");
                assert_eq!(actual, 1);
            }
            other => panic!("expected TooFewEntries, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_term_rejected() {
        let mut lexicon = Lexicon::default();
        lexicon.linking_words.push(" , ".to_string());
        assert!(matches!(
            lexicon.validate(),
            Err(LexiconError::EmptyTerm {
                list: "linking_words"
            })
        ));
    }

    #[test]
    fn test_from_json_file_partial_override() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"linking_words": ["meanwhile", "hence"]}}"#).expect("write");

        let lexicon = Lexicon::from_json_file(file.path()).expect("should load");
        assert_eq!(lexicon.linking_words, vec!["meanwhile", "hence"]);
        assert_eq!(
            lexicon.advanced_lexical,
            Lexicon::default().advanced_lexical
        );
    }

    #[test]
    fn test_from_json_file_invalid_json() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let err = Lexicon::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, LexiconError::Parse { .. }));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = Lexicon::from_json_file(Path::new("/nonexistent/lexicon.json")).unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
    }
}
