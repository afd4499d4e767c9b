use std::sync::Arc;

use async_trait::async_trait;
use reading_core::model::Stage;
use storage::repository::{KeyValueRepository, StorageError};

use crate::vm::QuizIntent;

use super::test_harness::{
    ViewHarness, setup_view_harness, setup_view_harness_with_record, setup_view_harness_with_repo,
};

async fn rendered(harness: &mut ViewHarness) -> String {
    harness.rebuild();
    harness.drive_async().await;
    harness.render()
}

async fn dispatch(harness: &mut ViewHarness, intent: QuizIntent) {
    let callback = harness.handles.dispatch();
    harness.dom.in_runtime(|| callback.call(intent));
    harness.drive_async().await;
    harness.drive_async().await;
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_fresh_passage() {
    let mut harness = setup_view_harness().await;
    let html = rendered(&mut harness).await;

    assert!(html.contains("60:00"), "missing clock in {html}");
    assert!(
        html.contains("Cambridge IELTS 20 Academic: Reading Practice"),
        "missing title in {html}"
    );
    assert!(html.contains("Answered 0 / 5"), "missing progress in {html}");
    assert!(
        html.contains("pre-scan headings and topic sentences"),
        "missing paragraph in {html}"
    );
    assert!(html.contains("Go to questions"), "missing action in {html}");
    assert!(html.contains("Pause"), "missing pause in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_questions_with_answers() {
    let mut harness = setup_view_harness_with_record(
        r#"{"answers":{"q2":"Not Given","q3":"contr"},"secondsLeft":754,"paused":true,"stage":"questions"}"#,
    )
    .await;
    let html = rendered(&mut harness).await;

    assert!(html.contains("12:34"), "missing clock in {html}");
    assert!(html.contains("Resume"), "missing resume in {html}");
    assert!(html.contains("Answered 2 / 5"), "missing progress in {html}");
    assert!(html.contains("width: 40%"), "missing progress bar in {html}");
    assert!(html.contains("e.g., contrast"), "missing placeholder in {html}");
    assert!(
        html.contains("Reading speed is the best single predictor of comprehension."),
        "missing prompt in {html}"
    );
    assert!(html.contains("option option--selected"), "missing selection in {html}");
    assert!(html.contains("Submit answers"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_review_score() {
    let mut harness = setup_view_harness_with_record(
        r#"{"answers":{"q1":"Pre-scan headings and topic sentences","q2":"False","q3":" Contrast"},"secondsLeft":1200,"paused":false,"stage":"review"}"#,
    )
    .await;
    let html = rendered(&mut harness).await;

    assert!(html.contains("Score: 3 / 5"), "missing score in {html}");
    assert!(html.contains("Band 6.5"), "missing band in {html}");
    assert!(html.contains("(no answer)"), "missing empty answer in {html}");
    assert!(html.contains("Back to questions"), "missing back action in {html}");
    assert!(!html.contains("Time is up"), "unexpected expiry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_expired_attempt() {
    let mut harness = setup_view_harness_with_record(r#"{"secondsLeft":0,"stage":"questions"}"#).await;
    let html = rendered(&mut harness).await;

    assert!(html.contains("00:00"), "missing clock in {html}");
    assert!(html.contains("Time is up"), "missing expiry notice in {html}");
    assert!(html.contains("Band 5.0"), "missing band in {html}");
    assert!(!html.contains("Back to questions"), "review should be locked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_intents_update_session_and_render() {
    let mut harness = setup_view_harness().await;
    let _ = rendered(&mut harness).await;

    dispatch(&mut harness, QuizIntent::GoTo(Stage::Answering)).await;
    dispatch(
        &mut harness,
        QuizIntent::Answer {
            id: "q5".to_string(),
            value: "True".to_string(),
        },
    )
    .await;

    let view = harness.quiz.view().await;
    assert_eq!(view.stage, Stage::Answering);
    assert_eq!(view.answer("q5"), Some("True"));

    let html = harness.render();
    assert!(html.contains("Answered 1 / 5"), "missing progress in {html}");

    dispatch(&mut harness, QuizIntent::Submit).await;
    let html = harness.render();
    assert!(html.contains("Score: 1 / 5"), "missing score in {html}");

    dispatch(&mut harness, QuizIntent::Reset).await;
    let view = harness.quiz.view().await;
    assert_eq!(view.stage, Stage::Reading);
    assert!(view.answers.is_empty());
}

struct ReadOnlyRepo;

#[async_trait]
impl KeyValueRepository for ReadOnlyRepo {
    async fn get_value(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn put_value(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_save_error() {
    let mut harness = setup_view_harness_with_repo(Arc::new(ReadOnlyRepo)).await;
    let _ = rendered(&mut harness).await;

    dispatch(&mut harness, QuizIntent::GoTo(Stage::Answering)).await;
    let html = harness.render();
    assert!(
        html.contains("Your latest change could not be saved."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("Submit answers"), "change kept in memory in {html}");
}
