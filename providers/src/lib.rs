//! Gemini math-solver client.
//!
//! # Architecture
//!
//! The solver is a single non-streaming call: [`solve`] serializes the
//! user's prompt with a math-assistant system instruction, POSTs it to the
//! Gemini `generateContent` endpoint, and returns the response text as
//! markdown. The entire intelligence lives on the remote side; this crate
//! is transport, request shaping, and error taxonomy.
//!
//! # Error Handling
//!
//! Every failure (transport, non-success status, or a response without
//! text content) maps to [`SolverError`]. Callers treat any variant as the
//! same generic "could not solve" outcome; the variants exist for logs.

use std::sync::OnceLock;
use std::time::Duration;

use thiserror::Error;

mod gemini;

pub(crate) type Result<T, E = SolverError> = std::result::Result<T, E>;

/// Canonical Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default solver model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;
const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// A Gemini API key. `Debug` redacts the value.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Solver credentials and model selection.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(api_key: ApiKey, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            base_url: GEMINI_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (mock servers in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("response contained no text content")]
    MissingContent,
}

/// Shared hardened HTTP client: TLS only, no redirects, connect timeout,
/// TCP keepalive. No total request timeout: a pending solve stays pending
/// until the server answers or the connection drops.
pub(crate) fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder().https_only(true).build().unwrap_or_else(|e| {
            tracing::error!("Failed to build hardened HTTP client: {e}. Using minimal fallback.");
            reqwest::Client::builder()
                .https_only(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("minimal hardened HTTP client must build; cannot proceed without TLS")
        })
    })
}

/// Plain-HTTP variant for loopback mock servers.
pub(crate) fn http_client_plain() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder()
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

fn base_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .redirect(reqwest::redirect::Policy::none())
}

pub(crate) fn client_for(config: &ApiConfig) -> &'static reqwest::Client {
    if config.base_url().starts_with("https://") {
        http_client()
    } else {
        http_client_plain()
    }
}

/// Read an error body, capped so a hostile response cannot balloon memory.
pub(crate) async fn read_capped_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(mut body) => {
            if body.len() > MAX_ERROR_BODY_BYTES {
                body.truncate(MAX_ERROR_BODY_BYTES);
                body.push_str("… [truncated]");
            }
            body
        }
        Err(e) => format!("<failed to read error body: {e}>"),
    }
}

/// Solve a math prompt via the configured Gemini model.
///
/// Returns the model's markdown answer.
pub async fn solve(config: &ApiConfig, prompt: &str) -> Result<String, SolverError> {
    gemini::solve(config, prompt).await
}
