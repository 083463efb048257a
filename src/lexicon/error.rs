use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`Lexicon`](super::Lexicon).
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The lexicon file could not be read.
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lexicon file is not valid JSON for the expected shape.
    #[error("failed to parse lexicon file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A vocabulary is smaller than the gate that consumes it requires.
    #[error("vocabulary '{list}' needs at least {required} entries, found {actual}")]
    TooFewEntries {
        list: &'static str,
        required: usize,
        actual: usize,
    },

    /// A vocabulary contains an entry with no word characters.
    #[error("vocabulary '{list}' contains an empty term")]
    EmptyTerm { list: &'static str },
}
