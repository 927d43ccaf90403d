//! Gemini `generateContent` request shaping and response parsing.
//!
//! Note: the Gemini API mixes casing. `system_instruction` is snake_case
//! while `generationConfig` is camelCase.

use serde_json::{Value, json};

use crate::{ApiConfig, Result, SolverError, client_for, read_capped_error_body};

/// System instruction for the math assistant.
const SYSTEM_INSTRUCTION: &str = "You are a helpful and precise math assistant.\n\
    When the user asks a math question or sends an expression:\n\
    1. Solve it accurately.\n\
    2. If the problem is a simple calculation (e.g., \"2 + 2\", \"15% of 80\"), provide JUST the result as a number or short string.\n\
    3. If the problem is a word problem or requires steps (e.g., \"volume of a sphere with radius 5\", \"solve for x in 2x + 5 = 15\"), provide the final answer clearly at the top, followed by a concise step-by-step explanation.\n\
    4. Use Markdown for formatting (bolding the final answer).\n\
    5. Be friendly but efficient.";

fn text_part(text: &str) -> Value {
    json!({ "text": text })
}

/// Build the request body for a single-prompt solve.
fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [text_part(prompt)]
        }],
        "system_instruction": {
            "parts": [text_part(SYSTEM_INSTRUCTION)]
        },
        "generationConfig": {
            "temperature": 1.0
        }
    })
}

/// Extract the answer text: all text parts of the first candidate, joined.
fn extract_text(body: &Value) -> Result<String> {
    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(SolverError::MissingContent)?;

    let mut text = String::new();
    for part in parts {
        if let Some(chunk) = part["text"].as_str() {
            text.push_str(chunk);
        }
    }

    if text.trim().is_empty() {
        return Err(SolverError::MissingContent);
    }
    Ok(text)
}

pub(crate) async fn solve(config: &ApiConfig, prompt: &str) -> Result<String> {
    let url = format!(
        "{}/models/{}:generateContent",
        config.base_url(),
        config.model()
    );

    tracing::debug!(model = config.model(), "sending solve request");

    let response = client_for(config)
        .post(&url)
        .header("x-goog-api-key", config.api_key().as_str())
        .header("content-type", "application/json")
        .json(&build_request_body(prompt))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = read_capped_error_body(response).await;
        tracing::warn!(status = status.as_u16(), "solve request rejected");
        return Err(SolverError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let data: Value = response.json().await?;
    extract_text(&data)
}
