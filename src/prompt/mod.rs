//! Rendering of the model instruction and payload.
//!
//! Output is a pure function of its inputs so that identical submissions always
//! produce byte-identical requests.

use crate::input::count_words;
use crate::task::TaskCategory;

/// Rubric and output contract sent as the system message.
pub const RUBRIC_INSTRUCTION: &str = "You are a certified IELTS Writing examiner. Score the essay on the four official criteria:
- Task Achievement (TA)
- Coherence and Cohesion (CC)
- Lexical Resource (LR)
- Grammatical Range and Accuracy (GRA)

Band descriptors:
- 8.5-9: fully developed response, skilful cohesion, wide and precise vocabulary, error-free complex structures
- 7-8: clear position with extended ideas, logical progression, less common vocabulary, frequent error-free sentences
- 5.5-6.5: relevant response with some underdeveloped ideas, mechanical linking, adequate vocabulary, mix of simple and complex forms with errors
- 4-5: partial response, limited organisation, repetitive vocabulary, frequent grammatical errors
- below 4: minimal or off-topic response with little control of language

Return STRICT JSON only:
{\"ta\":number,\"cc\":number,\"lr\":number,\"gra\":number,\"overall\":number,\"feedback\":\"...\",\"cefr\":\"A2|B1|B2|C1|C2\"}

Rules:
1. Bands 0-9 in 0.5 increments only
2. Be realistic and align with official IELTS descriptors
3. Feedback should be 2-4 sentences, specific and actionable
4. Return ONLY the JSON object, no extra text";

/// Appended to the instruction when the previous answer could not be parsed.
pub const STRICT_JSON_DIRECTIVE: &str = "IMPORTANT: Your previous response was not valid JSON. Return ONLY the JSON object with no additional text.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A rendered model request.
pub struct RenderedPrompt {
    /// System message: rubric and output format.
    pub instruction: String,
    /// User message: task metadata and the submission.
    pub payload: String,
}

impl RenderedPrompt {
    /// Same request with the strict-JSON directive appended to the instruction.
    pub fn with_strict_directive(&self) -> Self {
        Self {
            instruction: format!("{}\n\n{}", self.instruction, STRICT_JSON_DIRECTIVE),
            payload: self.payload.clone(),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.instruction.ends_with(STRICT_JSON_DIRECTIVE)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Renders the instruction and payload for one submission.
    ///
    /// An empty or whitespace-only `prompt` is replaced by the category's canonical
    /// prompt.
    pub fn build(&self, category: TaskCategory, prompt: Option<&str>, text: &str) -> RenderedPrompt {
        let payload = format!(
            "TaskType: {}\nWordCount: {}\nPrompt: {}\nEssay:\n{}",
            category,
            count_words(text),
            category.effective_prompt(prompt),
            text
        );
        RenderedPrompt {
            instruction: RUBRIC_INSTRUCTION.to_string(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_deterministic() {
        let b = PromptBuilder::new();
        let a = b.build(TaskCategory::Task2, Some("Cities vs. villages"), "one two three");
        let c = b.build(TaskCategory::Task2, Some("Cities vs. villages"), "one two three");
        assert_eq!(a, c);
    }

    #[test]
    fn test_payload_contents() {
        let rendered = PromptBuilder::new().build(
            TaskCategory::Task1,
            Some("The chart shows rainfall."),
            "Rain  fell\nsteadily.",
        );
        assert!(rendered.payload.starts_with("TaskType: task1\n"));
        assert!(rendered.payload.contains("WordCount: 3\n"));
        assert!(rendered.payload.contains("Prompt: The chart shows rainfall.\n"));
        assert!(rendered.payload.ends_with("Essay:\nRain  fell\nsteadily."));
    }

    #[test]
    fn test_canonical_prompt_substituted() {
        let rendered = PromptBuilder::new().build(TaskCategory::Task2, Some("  "), "text");
        assert!(
            rendered
                .payload
                .contains(TaskCategory::Task2.canonical_prompt())
        );
        let rendered = PromptBuilder::new().build(TaskCategory::Task1, None, "text");
        assert!(
            rendered
                .payload
                .contains(TaskCategory::Task1.canonical_prompt())
        );
    }

    #[test]
    fn test_instruction_names_every_field() {
        let rendered = PromptBuilder::new().build(TaskCategory::Task2, None, "text");
        for field in ["\"ta\"", "\"cc\"", "\"lr\"", "\"gra\"", "\"overall\"", "\"feedback\"", "\"cefr\""] {
            assert!(rendered.instruction.contains(field), "missing {}", field);
        }
        assert!(!rendered.is_strict());
    }

    #[test]
    fn test_strict_directive_appended_once() {
        let rendered = PromptBuilder::new().build(TaskCategory::Task2, None, "text");
        let strict = rendered.with_strict_directive();
        assert!(strict.is_strict());
        assert!(strict.instruction.starts_with(RUBRIC_INSTRUCTION));
        assert_eq!(strict.payload, rendered.payload);
    }
}
