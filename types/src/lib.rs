//! Core domain types for Nebula.
//!
//! This crate holds the IO-free vocabulary shared by the engine, the solver
//! client, and the TUI: validated content strings, id newtypes, the static
//! keypad configuration, the calculation history, and the AI-mode chat
//! transcript. Nothing here performs IO or depends on an async runtime.

mod chat;
mod history;
mod ids;
mod keys;
mod proofs;

pub use chat::{ChatMessage, ModelTurn, Role, UserTurn};
pub use history::{EntryKind, HistoryItem, HistoryLog};
pub use ids::{HistoryId, MessageId};
pub use keys::{KeyConfig, KeyType, SCIENTIFIC_KEYS, STANDARD_KEYS};
pub use proofs::{EmptyStringError, NonEmptyString};
