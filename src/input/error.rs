use thiserror::Error;

/// Reasons a submission is refused before any scoring work happens.
///
/// This is the only failure the pipeline reports to its callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputRejected {
    /// Word count falls outside the accepted inclusive window.
    #[error("essay must be {min}-{max} words (got {actual})")]
    OutOfRange {
        actual: usize,
        min: usize,
        max: usize,
    },
}

impl InputRejected {
    /// Word count that triggered the rejection.
    pub fn actual(&self) -> usize {
        match self {
            InputRejected::OutOfRange { actual, .. } => *actual,
        }
    }
}
