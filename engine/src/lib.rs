//! Application state machine for Nebula.
//!
//! This crate owns all mutable application state (the calculator input
//! engine, the AI-solver chat, the session history, and view flags) with
//! no TUI dependencies. The binary drives it on a fixed frame cadence:
//! handle input, `tick()`, `process_solver_events()`, draw.
//!
//! The calculator engine is synchronous; the only asynchronous boundary in
//! the application is the solver request, which runs on a spawned task and
//! reports back over a oneshot channel polled each frame. The user message
//! is appended to the transcript before the request is issued and the
//! response (or error placeholder) after it resolves, in submission order.

use std::time::SystemTime;

use tokio::sync::oneshot;

mod chat;
mod config;
pub mod eval;
mod focus;
mod keypad;


pub use chat::{ChatState, SOLVER_ERROR_MESSAGE, WELCOME_MESSAGE};
pub use config::{ApiKeys, AppConfig, AppOptions, ConfigError, NebulaConfig};
pub use eval::{EvalError, Op, Token};
pub use focus::{KeypadFocus, NavDir, STANDARD_COLUMNS};
pub use keypad::{Evaluation, ExprPart, InputState};

// Re-export from crates for public API
pub use nebula_providers::{ApiConfig, ApiKey, DEFAULT_MODEL, SolverError};
pub use nebula_types::{
    ChatMessage, EntryKind, HistoryId, HistoryItem, HistoryLog, KeyConfig, KeyType, MessageId,
    NonEmptyString, Role, SCIENTIFIC_KEYS, STANDARD_KEYS,
};

/// How long a status toast stays visible, in frames.
const STATUS_TICKS: u64 = 250;

/// Which top-level view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Standard,
    Ai,
}

impl Mode {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Mode::Standard => Mode::Ai,
            Mode::Ai => Mode::Standard,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Mode::Standard => "Calculator",
            Mode::Ai => "AI Solver",
        }
    }
}

/// An in-flight solver request. Existence proves a request is pending.
#[derive(Debug)]
struct PendingSolve {
    prompt: NonEmptyString,
    receiver: oneshot::Receiver<Result<String, SolverError>>,
}

/// Solver request state: at most one request in flight.
#[derive(Debug, Default)]
enum SolverState {
    #[default]
    Idle,
    Pending(PendingSolve),
}

#[derive(Debug)]
struct StatusToast {
    text: String,
    expires_at: u64,
}

/// Top-level application state.
#[derive(Debug)]
pub struct App {
    mode: Mode,
    calc: InputState,
    chat: ChatState,
    history: HistoryLog,
    history_open: bool,
    history_cursor: usize,
    scientific: bool,
    focus: KeypadFocus,
    solver: SolverState,
    api: Option<ApiConfig>,
    options: AppOptions,
    status: Option<StatusToast>,
    tick: u64,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: Option<NebulaConfig>) -> Self {
        let options = AppOptions::from_config(config.as_ref());
        let api = config.as_ref().and_then(NebulaConfig::api_config);
        Self::with_api(options, api)
    }

    /// Construct with explicit options and solver credentials; tests use
    /// this to point the solver at a mock server.
    #[must_use]
    pub fn with_api(options: AppOptions, api: Option<ApiConfig>) -> Self {
        Self {
            mode: Mode::Standard,
            calc: InputState::new(),
            chat: ChatState::new(SystemTime::now()),
            history: HistoryLog::new(),
            history_open: false,
            history_cursor: 0,
            scientific: options.scientific,
            focus: KeypadFocus::default(),
            solver: SolverState::Idle,
            api,
            options,
            status: None,
            tick: 0,
            should_quit: false,
        }
    }

    // ------------------------------------------------------------------
    // Frame cadence
    // ------------------------------------------------------------------

    /// Advance one frame: animation counter and toast expiry.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self
            .status
            .as_ref()
            .is_some_and(|toast| self.tick >= toast.expires_at)
        {
            self.status = None;
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ------------------------------------------------------------------
    // Modes and overlays
    // ------------------------------------------------------------------

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    #[must_use]
    pub fn options(&self) -> AppOptions {
        self.options
    }

    #[must_use]
    pub fn scientific(&self) -> bool {
        self.scientific
    }

    pub fn toggle_scientific(&mut self) {
        self.scientific = !self.scientific;
        if !self.scientific {
            self.focus = self.focus.without_scientific();
        }
    }

    #[must_use]
    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn toggle_history(&mut self) {
        self.history_open = !self.history_open;
        self.history_cursor = 0;
    }

    pub fn close_history(&mut self) {
        self.history_open = false;
    }

    // ------------------------------------------------------------------
    // Calculator
    // ------------------------------------------------------------------

    #[must_use]
    pub fn calc(&self) -> &InputState {
        &self.calc
    }

    /// Apply one keypad keystroke; successful `=` evaluations append a
    /// history entry.
    pub fn press_key(&mut self, token: &str, kind: KeyType) {
        if let Some(evaluation) = self.calc.handle_key(token, kind) {
            self.history.push(
                evaluation.expression,
                evaluation.result,
                EntryKind::Standard,
                SystemTime::now(),
            );
        }
    }

    #[must_use]
    pub fn keypad_focus(&self) -> KeypadFocus {
        self.focus
    }

    pub fn move_keypad_focus(&mut self, dir: NavDir) {
        self.focus = self.focus.moved(dir, self.scientific);
    }

    /// Press the key under the keypad cursor.
    pub fn press_focused_key(&mut self) {
        let key = self.focus.key();
        self.press_key(key.token, key.kind);
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    #[must_use]
    pub fn history_cursor(&self) -> usize {
        self.history_cursor
    }

    pub fn move_history_cursor(&mut self, delta: isize) {
        if self.history.is_empty() {
            self.history_cursor = 0;
            return;
        }
        let max = self.history.len() - 1;
        self.history_cursor = self
            .history_cursor
            .saturating_add_signed(delta)
            .min(max);
    }

    #[must_use]
    pub fn selected_history(&self) -> Option<&HistoryItem> {
        self.history.get(self.history_cursor)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history_cursor = 0;
    }

    // ------------------------------------------------------------------
    // Status toast
    // ------------------------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusToast {
            text: text.into(),
            expires_at: self.tick + STATUS_TICKS,
        });
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|toast| toast.text.as_str())
    }

    // ------------------------------------------------------------------
    // AI solver
    // ------------------------------------------------------------------

    #[must_use]
    pub fn chat(&self) -> &ChatState {
        &self.chat
    }

    #[must_use]
    pub fn solver_pending(&self) -> bool {
        matches!(self.solver, SolverState::Pending(_))
    }

    /// Draft editing is disabled while a request is pending.
    pub fn chat_input_char(&mut self, c: char) {
        if !self.solver_pending() {
            self.chat.push_draft_char(c);
        }
    }

    pub fn chat_input_str(&mut self, s: &str) {
        if !self.solver_pending() {
            self.chat.push_draft_str(s);
        }
    }

    pub fn chat_backspace(&mut self) {
        if !self.solver_pending() {
            self.chat.backspace_draft();
        }
    }

    pub fn chat_scroll_up(&mut self, lines: u16) {
        self.chat.scroll_up(lines);
    }

    pub fn chat_scroll_down(&mut self, lines: u16) {
        self.chat.scroll_down(lines);
    }

    /// Submit the draft to the solver. No-op while a request is pending or
    /// when the trimmed draft is empty.
    pub fn submit_prompt(&mut self) {
        if self.solver_pending() {
            return;
        }
        let Some(prompt) = self.chat.take_draft() else {
            return;
        };

        let now = SystemTime::now();
        self.chat.push_user(prompt.clone(), now);

        match &self.api {
            Some(api) => {
                let (tx, rx) = oneshot::channel();
                let api = api.clone();
                let text = prompt.as_str().to_string();
                tokio::spawn(async move {
                    let result = nebula_providers::solve(&api, &text).await;
                    let _ = tx.send(result);
                });
                self.solver = SolverState::Pending(PendingSolve {
                    prompt,
                    receiver: rx,
                });
            }
            None => {
                tracing::warn!("solver prompt submitted without an API key configured");
                self.chat.push_model_error(SystemTime::now());
            }
        }
    }

    /// Poll the pending solver request; called once per frame.
    pub fn process_solver_events(&mut self) {
        let outcome = match &mut self.solver {
            SolverState::Idle => return,
            SolverState::Pending(pending) => match pending.receiver.try_recv() {
                Err(oneshot::error::TryRecvError::Empty) => return,
                Ok(result) => Some(result),
                // The solver task died without reporting; treat as failure.
                Err(oneshot::error::TryRecvError::Closed) => None,
            },
        };

        let SolverState::Pending(pending) = std::mem::take(&mut self.solver) else {
            return;
        };

        let now = SystemTime::now();
        match outcome {
            Some(Ok(answer)) => match NonEmptyString::new(answer) {
                Ok(content) => {
                    self.chat.push_model(content, now);
                    self.history
                        .push(pending.prompt.as_str(), "AI Solved", EntryKind::Ai, now);
                }
                Err(_) => {
                    tracing::warn!("solver returned an empty answer");
                    self.chat.push_model_error(now);
                }
            },
            Some(Err(err)) => {
                tracing::warn!(%err, "solver request failed");
                self.chat.push_model_error(now);
            }
            None => {
                tracing::warn!("solver task dropped its channel");
                self.chat.push_model_error(now);
            }
        }
    }
}
