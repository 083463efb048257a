/// Case-insensitive, token-aligned view of a text for vocabulary matching.
///
/// Tokens are maximal runs of alphanumerics and apostrophes, lowercased. A term
/// matches when its own token sequence appears contiguously, so `"which"` does not
/// match inside `"sandwich"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextProbe {
    tokens: Vec<String>,
}

impl TextProbe {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
        }
    }

    /// Lowercased tokens in text order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of positions at which `term` occurs.
    pub fn occurrences(&self, term: &str) -> usize {
        let needle = tokenize(term);
        if needle.is_empty() || needle.len() > self.tokens.len() {
            return 0;
        }
        self.tokens
            .windows(needle.len())
            .filter(|window| *window == needle.as_slice())
            .count()
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.occurrences(term) > 0
    }

    /// Number of distinct vocabulary entries present at least once.
    pub fn distinct_hits<S: AsRef<str>>(&self, terms: &[S]) -> usize {
        terms.iter().filter(|t| self.contains(t.as_ref())).count()
    }

    /// Sum of occurrences over every vocabulary entry.
    pub fn total_occurrences<S: AsRef<str>>(&self, terms: &[S]) -> usize {
        terms.iter().map(|t| self.occurrences(t.as_ref())).sum()
    }
}

pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
        .collect()
}
