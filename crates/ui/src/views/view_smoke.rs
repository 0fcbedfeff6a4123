use std::collections::BTreeMap;
use std::sync::Arc;

use services::{AttemptHistoryService, QuizRequest};
use storage::repository::{AttemptRepository, AttemptRow, StorageError};
use vocab_core::model::{Day, QuizAttempt};

use super::test_harness::{TestApp, ViewKind, setup_view_harness, test_app, test_services};

fn start_day_two() -> QuizRequest {
    QuizRequest::Start {
        student: "Ada".into(),
        day: Day::new(2).unwrap(),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_intro_for_new_session() {
    let services = test_services();
    let token = services.handler().open_session();
    let mut harness = setup_view_harness(ViewKind::Quiz, test_app(&services), token);

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Enter your name:"), "missing name label in {html}");
    assert!(html.contains("Select day (1-30):"), "missing day label in {html}");
    assert!(html.contains("Start Test"), "missing start button in {html}");
    assert!(
        html.contains("Please enter your name and select a day"),
        "missing intro in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_started_quiz() {
    let services = test_services();
    let handler = services.handler();
    let token = handler.open_session();
    handler.handle(token, start_day_two()).await.unwrap();

    let mut harness = setup_view_harness(ViewKind::Quiz, test_app(&services), token);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Vocabulary Quiz: Day 2"), "missing heading in {html}");
    assert!(html.contains("Student: Ada"), "missing student in {html}");
    assert!(html.contains("Q1."), "missing question number in {html}");
    assert!(html.contains("definition 3 (n.)"), "missing prompt in {html}");
    assert!(html.contains("Submit Answers"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_missed_table() {
    let services = test_services();
    let handler = services.handler();
    let token = handler.open_session();
    let started = handler.handle(token, start_day_two()).await.unwrap();
    handler
        .handle(
            token,
            QuizRequest::Submit {
                generation: started.snapshot.generation,
                answers: BTreeMap::new(),
            },
        )
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Quiz, test_app(&services), token);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Ada, you answered 0 out of 3 correctly!"),
        "missing score in {html}"
    );
    assert!(html.contains("Questions you missed:"), "missing table title in {html}");
    assert!(html.contains("word4"), "missing expected answer in {html}");
    assert!(html.contains("Retake missed"), "missing retake in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_closed_session() {
    let services = test_services();
    let handler = services.handler();
    let token = handler.open_session();
    handler.close_session(token);

    let mut harness = setup_view_harness(ViewKind::Quiz, test_app(&services), token);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_attempt() {
    let services = test_services();
    let handler = services.handler();
    let token = handler.open_session();
    let started = handler.handle(token, start_day_two()).await.unwrap();
    handler
        .handle(
            token,
            QuizRequest::Submit {
                generation: started.snapshot.generation,
                answers: BTreeMap::new(),
            },
        )
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::History, test_app(&services), token);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Day 2"), "missing day in {html}");
    assert!(html.contains("0 / 3"), "missing score in {html}");
}

struct FailingAttempts;

#[async_trait::async_trait]
impl AttemptRepository for FailingAttempts {
    async fn append_attempt(&self, _attempt: &QuizAttempt) -> Result<i64, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_attempt(&self, _id: i64) -> Result<QuizAttempt, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_attempts(
        &self,
        _student: Option<&str>,
        _limit: u32,
    ) -> Result<Vec<AttemptRow>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_error_state() {
    let services = test_services();
    let app = Arc::new(TestApp {
        quiz_handler: services.handler(),
        attempt_history: Arc::new(AttemptHistoryService::new(Arc::new(FailingAttempts))),
    });
    let token = app.quiz_handler.open_session();

    let mut harness = setup_view_harness(ViewKind::History, app, token);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
