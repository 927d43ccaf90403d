//! AI solver chat state.
//!
//! Owns the transcript, the draft input line, and transcript scrolling.
//! The transcript is append-only: the user message is pushed before the
//! solver request is issued, and the response (or the generic error
//! placeholder) is pushed after it resolves, in submission order.

use std::time::SystemTime;

use unicode_segmentation::UnicodeSegmentation;

use nebula_types::{ChatMessage, MessageId, NonEmptyString};

/// Greeting seeded into every fresh transcript, in the model role.
pub const WELCOME_MESSAGE: &str =
    "Hi! I can help you solve complex math problems, word problems, or explain concepts. Just type below!";

/// Placeholder appended when a solver request fails for any reason.
pub const SOLVER_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error trying to solve that. Please check your internet connection or API key.";

#[derive(Debug)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    draft: String,
    next_id: u64,
    /// Lines scrolled up from the transcript bottom.
    scroll_offset: u16,
}

impl ChatState {
    #[must_use]
    pub fn new(now: SystemTime) -> Self {
        let mut state = Self {
            messages: Vec::new(),
            draft: String::new(),
            next_id: 0,
            scroll_offset: 0,
        };
        // The welcome text is a non-empty literal.
        if let Ok(content) = NonEmptyString::new(WELCOME_MESSAGE) {
            let id = state.next_message_id();
            state.messages.push(ChatMessage::model(id, content, now));
        }
        state
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn push_draft_str(&mut self, s: &str) {
        self.draft.push_str(s);
    }

    /// Remove the last grapheme cluster from the draft.
    pub fn backspace_draft(&mut self) {
        if let Some((offset, _)) = self.draft.grapheme_indices(true).next_back() {
            self.draft.truncate(offset);
        }
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Take the draft if it holds visible content, clearing it.
    pub fn take_draft(&mut self) -> Option<NonEmptyString> {
        let content = NonEmptyString::new(std::mem::take(&mut self.draft)).ok()?;
        Some(content)
    }

    pub fn push_user(&mut self, content: NonEmptyString, now: SystemTime) -> MessageId {
        let id = self.next_message_id();
        self.messages.push(ChatMessage::user(id, content, now));
        self.scroll_offset = 0;
        id
    }

    pub fn push_model(&mut self, content: NonEmptyString, now: SystemTime) -> MessageId {
        let id = self.next_message_id();
        self.messages.push(ChatMessage::model(id, content, now));
        self.scroll_offset = 0;
        id
    }

    pub fn push_model_error(&mut self, now: SystemTime) -> MessageId {
        let id = self.next_message_id();
        // The placeholder text is a non-empty literal; fall back to pushing
        // nothing only if that ever stops holding.
        if let Ok(content) = NonEmptyString::new(SOLVER_ERROR_MESSAGE) {
            self.messages
                .push(ChatMessage::model_error(id, content, now));
        }
        self.scroll_offset = 0;
        id
    }

    fn next_message_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_id);
        self.next_id += 1;
        id
    }
}
