//! Test fixtures for integration tests.

/// Short filler words: no vocabulary hits, no content word longer than four letters.
pub const FILLER: [&str; 10] = ["we", "all", "go", "to", "the", "big", "park", "and", "run", "far"];

pub const DEFAULT_WORDS: usize = 250;

pub const MODEL_REPLY: &str = r#"{"ta": 6.5, "cc": 7, "lr": 6.5, "gra": 6.5, "overall": 6.5, "feedback": "You answer both parts of the question, but the second body paragraph needs a more specific example.", "cefr": "B2"}"#;

/// Builds essays with an exact word count and chosen vocabulary.
#[derive(Default)]
pub struct EssayBuilder {
    words: Option<usize>,
    inserts: Vec<String>,
    paragraphs: Option<usize>,
}

impl EssayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(mut self, n: usize) -> Self {
        self.words = Some(n);
        self
    }

    /// Places each term once, spread evenly through the text. Each term replaces one
    /// filler word, so single-word terms keep the count exact.
    pub fn with_terms(mut self, terms: &[&str]) -> Self {
        self.inserts.extend(terms.iter().map(|t| t.to_string()));
        self
    }

    pub fn paragraphs(mut self, n: usize) -> Self {
        self.paragraphs = Some(n);
        self
    }

    pub fn build(self) -> String {
        let total = self.words.unwrap_or(DEFAULT_WORDS);
        let mut tokens: Vec<String> = (0..total)
            .map(|i| FILLER[i % FILLER.len()].to_string())
            .collect();

        if !self.inserts.is_empty() {
            let stride = (total / self.inserts.len()).max(1);
            for (i, term) in self.inserts.into_iter().enumerate() {
                let at = (i * stride).min(total.saturating_sub(1));
                tokens[at] = term;
            }
        }

        let paragraphs = self.paragraphs.unwrap_or(1).max(1);
        let per = total.div_ceil(paragraphs).max(1);
        tokens
            .chunks(per)
            .map(|chunk| chunk.join(" "))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// 250 words with three linking words and two sophisticated-vocabulary terms.
pub fn linked_essay() -> String {
    EssayBuilder::new()
        .words(250)
        .with_terms(&["However,", "significant", "Moreover,", "crucial", "Therefore,"])
        .build()
}

pub fn plain_essay(words: usize) -> String {
    EssayBuilder::new().words(words).build()
}
