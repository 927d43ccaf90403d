//! Static keypad configuration.
//!
//! Two fixed key-layout tables describe the standard and scientific keypads:
//! label (display glyph), logical token, key kind, and a grid width hint.
//! The tables are the entire configuration surface of the keypad: the TUI
//! renders the grid from them and the engine interprets the tokens; neither
//! is mutated at runtime.

use serde::{Deserialize, Serialize};

/// The kind of a keypad key, which selects the input-engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Number,
    Operator,
    Action,
    Scientific,
}

/// One keypad key: display label, logical token, kind, and grid span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyConfig {
    pub label: &'static str,
    pub token: &'static str,
    pub kind: KeyType,
    /// Grid width hint in columns. All keys span 1 except "0", which spans 2.
    pub span: u8,
}

impl KeyConfig {
    const fn new(label: &'static str, token: &'static str, kind: KeyType) -> Self {
        Self {
            label,
            token,
            kind,
            span: 1,
        }
    }

    const fn spanning(label: &'static str, token: &'static str, kind: KeyType, span: u8) -> Self {
        Self {
            label,
            token,
            kind,
            span,
        }
    }
}

/// The standard 4-column keypad, top-left to bottom-right.
pub const STANDARD_KEYS: &[KeyConfig] = &[
    KeyConfig::new("AC", "AC", KeyType::Action),
    KeyConfig::new("⌫", "⌫", KeyType::Action),
    KeyConfig::new("%", "%", KeyType::Action),
    KeyConfig::new("÷", "/", KeyType::Operator),
    KeyConfig::new("7", "7", KeyType::Number),
    KeyConfig::new("8", "8", KeyType::Number),
    KeyConfig::new("9", "9", KeyType::Number),
    KeyConfig::new("×", "*", KeyType::Operator),
    KeyConfig::new("4", "4", KeyType::Number),
    KeyConfig::new("5", "5", KeyType::Number),
    KeyConfig::new("6", "6", KeyType::Number),
    KeyConfig::new("-", "-", KeyType::Operator),
    KeyConfig::new("1", "1", KeyType::Number),
    KeyConfig::new("2", "2", KeyType::Number),
    KeyConfig::new("3", "3", KeyType::Number),
    KeyConfig::new("+", "+", KeyType::Operator),
    KeyConfig::spanning("0", "0", KeyType::Number, 2),
    KeyConfig::new(".", ".", KeyType::Number),
    KeyConfig::new("=", "=", KeyType::Action),
];

/// The scientific key row, shown above the standard keypad when enabled.
pub const SCIENTIFIC_KEYS: &[KeyConfig] = &[
    KeyConfig::new("sin", "sin", KeyType::Scientific),
    KeyConfig::new("cos", "cos", KeyType::Scientific),
    KeyConfig::new("tan", "tan", KeyType::Scientific),
    KeyConfig::new("log", "log", KeyType::Scientific),
    KeyConfig::new("ln", "ln", KeyType::Scientific),
    KeyConfig::new("√", "√", KeyType::Scientific),
    KeyConfig::new("x²", "x²", KeyType::Scientific),
    KeyConfig::new("π", "π", KeyType::Scientific),
    KeyConfig::new("e", "e", KeyType::Scientific),
];
