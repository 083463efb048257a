//! Built-in vocabularies.
//!
//! These lists are hand-tuned. Deployments that need different coverage should ship a
//! JSON lexicon file instead of editing them (see `QUILL_LEXICON_PATH`).

pub(super) const ADVANCED_LEXICAL: &[&str] = &[
    "nevertheless",
    "notwithstanding",
    "consequently",
    "predominantly",
    "ubiquitous",
    "paradigm",
    "exacerbate",
    "mitigate",
    "inherent",
    "unprecedented",
    "substantially",
    "detrimental",
    "multifaceted",
    "juxtaposition",
    "proliferation",
    "indispensable",
    "conversely",
    "albeit",
];

pub(super) const COMPLEX_PATTERNS: &[&str] = &[
    "not only",
    "no sooner",
    "had it not been",
    "were it not for",
    "it is widely",
    "in spite of",
    "despite the fact that",
    "which in turn",
    "having been",
    "so as to",
];

pub(super) const LINKING_WORDS: &[&str] = &[
    "furthermore",
    "moreover",
    "however",
    "therefore",
    "in addition",
    "for example",
    "for instance",
    "on the other hand",
    "in conclusion",
    "as a result",
    "consequently",
    "nevertheless",
    "firstly",
    "secondly",
    "finally",
    "similarly",
    "in contrast",
    "thus",
];

pub(super) const SOPHISTICATED_VOCABULARY: &[&str] = &[
    "significant",
    "substantial",
    "crucial",
    "essential",
    "detrimental",
    "beneficial",
    "inevitable",
    "considerable",
    "profound",
    "sustainable",
    "comprehensive",
    "fundamental",
    "prevalent",
    "feasible",
    "mitigate",
    "enhance",
    "facilitate",
    "alleviate",
    "advocate",
    "undermine",
];

pub(super) const COMPLEX_CLAUSE_MARKERS: &[&str] = &[
    "although",
    "whereas",
    "unless",
    "even though",
    "provided that",
    "whereby",
    "whose",
    "which",
    "in order to",
    "so that",
    "despite",
];

pub(super) const COMMON_ERRORS: &[&str] = &[
    "could of",
    "should of",
    "would of",
    "more better",
    "most easiest",
    "peoples",
    "informations",
    "advices",
    "researches",
    "discuss about",
    "he don't",
    "she don't",
    "it don't",
    "in the other hand",
    "a lots of",
    "everyone have",
];

pub(super) const GENERIC_FEEDBACK: &[&str] = &[
    "Your essay demonstrates adequate task response. Focus on improving coherence with better linking devices and paragraph structure. Expand vocabulary range and work on grammatical accuracy.",
    "Good essay. Keep practicing.",
    "Good job! Keep up the good work.",
    "No feedback available.",
    "Feedback goes here.",
    "Overall, continue practicing to enhance your writing skills.",
];
