//! End-to-end tests through the public pipeline API.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::fixtures::{EssayBuilder, MODEL_REPLY, linked_essay, plain_essay};
use quill::constants::FEEDBACK_MIN_CHARS;
use quill::{
    CacheStatus, FallbackScorer, InputRejected, Lexicon, MemoryScoreCacheHandle, MockInvoker,
    ModelError, ProficiencyTier, ScoreRequest, ScoreSource, ScoringPipeline, TaskCategory,
    count_words,
};

fn lexicon() -> Arc<Lexicon> {
    Arc::new(Lexicon::default())
}

#[test]
fn test_fixture_word_counts() {
    assert_eq!(count_words(&linked_essay()), 250);
    assert_eq!(count_words(&plain_essay(180)), 180);
    assert_eq!(
        count_words(&EssayBuilder::new().words(300).paragraphs(4).build()),
        300
    );
}

#[tokio::test]
async fn test_fallback_end_to_end() {
    let pipeline = ScoringPipeline::new(lexicon());
    let request = ScoreRequest::new(TaskCategory::Task2, linked_essay());

    let outcome = pipeline.score(&request).await.unwrap();

    assert_eq!(outcome.source, ScoreSource::Fallback);
    let overall = outcome.result.overall.value();
    assert!((6.0..=7.0).contains(&overall), "overall {} out of range", overall);
    assert!(outcome.result.feedback.chars().count() >= FEEDBACK_MIN_CHARS);
    assert!(!pipeline.lexicon().is_generic_feedback(&outcome.result.feedback));
}

#[tokio::test]
async fn test_window_boundaries() {
    let pipeline = ScoringPipeline::new(lexicon());

    for words in [150, 320] {
        let request = ScoreRequest::new(TaskCategory::Task2, plain_essay(words));
        assert!(pipeline.score(&request).await.is_ok(), "{} words", words);
    }

    for words in [149, 321] {
        let request = ScoreRequest::new(TaskCategory::Task2, plain_essay(words));
        let err = pipeline.score(&request).await.unwrap_err();
        assert_eq!(
            err,
            InputRejected::OutOfRange {
                actual: words,
                min: 150,
                max: 320
            }
        );
    }
}

#[test]
fn test_fallback_is_deterministic() {
    let scorer = FallbackScorer::new(lexicon());
    let text = EssayBuilder::new()
        .words(280)
        .paragraphs(4)
        .with_terms(&["Furthermore,", "although", "substantial", "which"])
        .build();

    let a = scorer.score(&text, TaskCategory::Task2);
    let b = scorer.score(&text, TaskCategory::Task2);
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn test_fallback_never_reaches_top_tiers() {
    let scorer = FallbackScorer::new(lexicon());
    let rich = EssayBuilder::new()
        .words(300)
        .paragraphs(5)
        .with_terms(&[
            "Furthermore,",
            "Moreover,",
            "However,",
            "Therefore,",
            "Finally,",
            "significant",
            "crucial",
            "essential",
            "profound",
            "although",
            "whereas",
            "unless",
            "which",
        ])
        .build();

    let result = scorer.score(&rich, TaskCategory::Task2);
    for band in result.bands().as_array() {
        assert!(band.value() <= 7.0);
    }
    assert_eq!(result.overall.value(), 7.0);
    assert_eq!(result.proficiency_tier, ProficiencyTier::B2);
}

#[tokio::test]
async fn test_model_path_with_cache() {
    let mock = MockInvoker::with_replies([MODEL_REPLY]);
    let pipeline = ScoringPipeline::new(lexicon())
        .with_invoker(Arc::new(mock.clone()))
        .with_cache(Arc::new(MemoryScoreCacheHandle::new()));
    let request = ScoreRequest::new(TaskCategory::Task2, plain_essay(260))
        .with_prompt("Some people think cities are better places to live than villages.");

    let first = pipeline.score(&request).await.unwrap();
    assert_eq!(first.source, ScoreSource::Model);
    assert_eq!(first.result.overall.value(), 6.5);
    assert!(
        mock.calls()[0]
            .payload
            .contains("Some people think cities are better places")
    );

    let second = pipeline.score(&request).await.unwrap();
    assert_eq!(second.source, ScoreSource::Cache);
    assert_eq!(second.cache_status, CacheStatus::Hit);
    assert_eq!(second.result, first.result);
}

#[tokio::test]
async fn test_short_essay_task_achievement_capped() {
    let mock = MockInvoker::with_replies([MODEL_REPLY]);
    let pipeline = ScoringPipeline::new(lexicon()).with_invoker(Arc::new(mock));
    let request = ScoreRequest::new(TaskCategory::Task1, plain_essay(180));

    let outcome = pipeline.score(&request).await.unwrap();

    assert_eq!(outcome.source, ScoreSource::Model);
    assert!(outcome.result.task_achievement.value() <= 5.5);
}

#[tokio::test]
async fn test_model_outage_not_cached() {
    let mock = MockInvoker::new();
    mock.push_error(ModelError::Timeout(Duration::from_secs(30)));
    mock.push_reply(MODEL_REPLY);
    let pipeline = ScoringPipeline::new(lexicon())
        .with_invoker(Arc::new(mock.clone()))
        .with_cache(Arc::new(MemoryScoreCacheHandle::new()));
    let request = ScoreRequest::new(TaskCategory::Task2, plain_essay(260));

    let first = pipeline.score(&request).await.unwrap();
    assert_eq!(first.source, ScoreSource::Fallback);

    let second = pipeline.score(&request).await.unwrap();
    assert_eq!(second.source, ScoreSource::Model);
    assert_eq!(mock.call_count(), 2);
}
