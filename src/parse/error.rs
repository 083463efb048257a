use thiserror::Error;

#[derive(Debug, Error)]
/// Recoverable failures when extracting a score record from model output.
pub enum ParseError {
    /// Output contains no `{ ... }` region.
    #[error("no JSON object found in model output ({len} chars)")]
    NoObject {
        /// Length of the fence-stripped output.
        len: usize,
    },

    /// The object region did not decode into a score record.
    #[error("failed to decode score record: {0}")]
    Decode(#[from] serde_json::Error),
}
