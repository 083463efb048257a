//! Word counting and submission-length validation.
//!
//! Whitespace is folded on ASCII whitespace only (space, tab, CR, LF, form feed), so
//! the count does not depend on locale or on Unicode whitespace classes.

pub mod error;

pub use error::InputRejected;

use crate::constants::{MAX_WORDS, MIN_WORDS};

/// Collapses every ASCII whitespace run into a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of space-separated tokens after whitespace normalization.
#[inline]
pub fn count_words(text: &str) -> usize {
    text.split_ascii_whitespace().count()
}

/// Accepts `text` when its word count is inside `[MIN_WORDS, MAX_WORDS]`.
///
/// Returns the word count on success so callers do not have to recount.
pub fn validate(text: &str) -> Result<usize, InputRejected> {
    validate_window(text, MIN_WORDS, MAX_WORDS)
}

/// Same as [`validate`] with an explicit inclusive window.
pub fn validate_window(text: &str, min: usize, max: usize) -> Result<usize, InputRejected> {
    let actual = count_words(text);
    if (min..=max).contains(&actual) {
        Ok(actual)
    } else {
        Err(InputRejected::OutOfRange { actual, min, max })
    }
}
