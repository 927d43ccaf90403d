//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_MODEL: &str = "gemini-2.5-flash";

/// Start a mock server that simulates the Gemini API.
pub async fn start_gemini_mock() -> MockServer {
    MockServer::start().await
}

fn generate_content_path() -> String {
    format!("/models/{TEST_MODEL}:generateContent")
}

/// Mount a successful generateContent response carrying `answer`.
pub async fn mount_solve_response(server: &MockServer, answer: &str) {
    let body = json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": answer }]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 34
        }
    });

    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount an API failure with the given status code.
pub async fn mount_solve_failure(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(status).set_body_string("backend unavailable"))
        .mount(server)
        .await;
}
