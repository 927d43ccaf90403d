//! AI-mode chat transcript model.
//!
//! A real sum type (not a `Role` tag + "sometimes-meaningful" fields): user
//! turns carry validated prompt text, model turns carry markdown content and
//! an error flag for the generic failure placeholder. Constructors take
//! `SystemTime`; callers own the clock.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::ids::MessageId;
use crate::proofs::NonEmptyString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTurn {
    id: MessageId,
    content: NonEmptyString,
    timestamp: SystemTime,
}

impl UserTurn {
    #[must_use]
    pub fn new(id: MessageId, content: NonEmptyString, timestamp: SystemTime) -> Self {
        Self {
            id,
            content,
            timestamp,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTurn {
    id: MessageId,
    content: NonEmptyString,
    is_error: bool,
    timestamp: SystemTime,
}

impl ModelTurn {
    #[must_use]
    pub fn new(id: MessageId, content: NonEmptyString, timestamp: SystemTime) -> Self {
        Self {
            id,
            content,
            is_error: false,
            timestamp,
        }
    }

    /// A model-role placeholder for a failed solver request.
    #[must_use]
    pub fn error(id: MessageId, content: NonEmptyString, timestamp: SystemTime) -> Self {
        Self {
            id,
            content,
            is_error: true,
            timestamp,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

/// One transcript entry in the AI solver mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatMessage {
    User(UserTurn),
    Model(ModelTurn),
}

impl ChatMessage {
    #[must_use]
    pub fn user(id: MessageId, content: NonEmptyString, timestamp: SystemTime) -> Self {
        Self::User(UserTurn::new(id, content, timestamp))
    }

    #[must_use]
    pub fn model(id: MessageId, content: NonEmptyString, timestamp: SystemTime) -> Self {
        Self::Model(ModelTurn::new(id, content, timestamp))
    }

    #[must_use]
    pub fn model_error(id: MessageId, content: NonEmptyString, timestamp: SystemTime) -> Self {
        Self::Model(ModelTurn::error(id, content, timestamp))
    }

    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            ChatMessage::User(_) => Role::User,
            ChatMessage::Model(_) => Role::Model,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            ChatMessage::User(turn) => turn.content(),
            ChatMessage::Model(turn) => turn.content(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        match self {
            ChatMessage::User(_) => false,
            ChatMessage::Model(turn) => turn.is_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::{ChatMessage, Role};
    use crate::ids::MessageId;
    use crate::proofs::NonEmptyString;

    fn ne(s: &str) -> NonEmptyString {
        NonEmptyString::new(s).unwrap()
    }

    #[test]
    fn user_turns_are_never_errors() {
        let msg = ChatMessage::user(MessageId::new(0), ne("2 + 2"), SystemTime::now());
        assert_eq!(msg.role(), Role::User);
        assert!(!msg.is_error());
    }

    #[test]
    fn model_error_sets_flag() {
        let msg = ChatMessage::model_error(MessageId::new(1), ne("Sorry"), SystemTime::now());
        assert_eq!(msg.role(), Role::Model);
        assert!(msg.is_error());
        assert_eq!(msg.content(), "Sorry");
    }
}
