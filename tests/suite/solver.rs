//! End-to-end AI solver flow against a mock Gemini endpoint.

use std::time::Duration;

use nebula_engine::{App, AppOptions};
use nebula_providers::{ApiConfig, ApiKey, solve};
use nebula_types::{EntryKind, Role};

use crate::common::{TEST_MODEL, mount_solve_failure, mount_solve_response, start_gemini_mock};

fn app_against(server_uri: &str) -> App {
    let api = ApiConfig::new(ApiKey::new("test-key"), TEST_MODEL).with_base_url(server_uri);
    App::with_api(AppOptions::default(), Some(api))
}

/// Poll the app's solver channel until the transcript reaches `len`.
async fn wait_for_messages(app: &mut App, len: usize) {
    for _ in 0..500 {
        app.process_solver_events();
        if app.chat().messages().len() >= len {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "transcript never reached {len} messages (got {})",
        app.chat().messages().len()
    );
}

#[tokio::test]
async fn provider_returns_answer_text() {
    let server = start_gemini_mock().await;
    mount_solve_response(&server, "**4**").await;

    let config = ApiConfig::new(ApiKey::new("test-key"), TEST_MODEL).with_base_url(server.uri());
    let answer = solve(&config, "2 + 2").await.unwrap();
    assert_eq!(answer, "**4**");
}

#[tokio::test]
async fn successful_solve_appends_answer_and_history() {
    let server = start_gemini_mock().await;
    mount_solve_response(&server, "**12**\n\n15% of 80 is 12.").await;

    let mut app = app_against(&server.uri());
    app.chat_input_str("what is 15% of 80?");
    app.submit_prompt();

    // The user message lands before the request resolves.
    assert!(app.solver_pending());
    let messages = app.chat().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role(), Role::User);
    assert_eq!(messages[1].content(), "what is 15% of 80?");

    wait_for_messages(&mut app, 3).await;

    let messages = app.chat().messages();
    let answer = &messages[2];
    assert_eq!(answer.role(), Role::Model);
    assert!(!answer.is_error());
    assert!(answer.content().contains("**12**"));
    assert!(!app.solver_pending());

    // History records the prompt with the placeholder result.
    assert_eq!(app.history().len(), 1);
    let entry = &app.history().entries()[0];
    assert_eq!(entry.kind(), EntryKind::Ai);
    assert_eq!(entry.expression(), "what is 15% of 80?");
    assert_eq!(entry.result(), "AI Solved");
}

#[tokio::test]
async fn failed_solve_appends_error_placeholder_without_history() {
    let server = start_gemini_mock().await;
    mount_solve_failure(&server, 500).await;

    let mut app = app_against(&server.uri());
    app.chat_input_str("2 + 2");
    app.submit_prompt();

    wait_for_messages(&mut app, 3).await;

    let messages = app.chat().messages();
    assert!(messages[2].is_error());
    assert_eq!(messages[2].role(), Role::Model);
    assert!(app.history().is_empty());
    assert!(!app.solver_pending());
}

#[tokio::test]
async fn submissions_are_ignored_while_pending() {
    let server = start_gemini_mock().await;
    mount_solve_response(&server, "**4**").await;

    let mut app = app_against(&server.uri());
    app.chat_input_str("2 + 2");
    app.submit_prompt();
    assert!(app.solver_pending());

    // Input is disabled while pending; a second submit changes nothing.
    app.chat_input_str("3 + 3");
    app.submit_prompt();
    assert_eq!(app.chat().messages().len(), 2);

    wait_for_messages(&mut app, 3).await;
    assert_eq!(app.chat().messages().len(), 3);
}
