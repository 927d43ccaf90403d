//! Calculator input engine.
//!
//! A pure state machine over keypad tokens: two states per operand
//! (awaiting first digit vs. accumulating digits) nested inside an
//! expression accumulator that commits an operand on every operator press.
//! The accumulator is a typed token list rendered to display text only for
//! the display line and history entries.
//!
//! [`InputState::handle_key`] is callable without any rendering framework;
//! the caller owns history and passes the emitted [`Evaluation`] along.

use nebula_types::KeyType;

use crate::eval::{self, Op, Token};

/// One committed element of the pending expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprPart {
    Operand(String),
    Operator(Op),
}

/// A successful `=` evaluation, emitted exactly once per completed
/// calculation for the caller to record in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub expression: String,
    pub result: String,
}

/// Keypad input state.
///
/// Invariants: `display_value` is never empty and holds at most one decimal
/// point; `expression` is empty or ends with an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    display_value: String,
    expression: Vec<ExprPart>,
    is_new_number: bool,
    error: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            display_value: "0".to_string(),
            expression: Vec::new(),
            is_new_number: true,
            error: false,
        }
    }

    #[must_use]
    pub fn display_value(&self) -> &str {
        &self.display_value
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error
    }

    #[must_use]
    pub fn is_new_number(&self) -> bool {
        self.is_new_number
    }

    #[must_use]
    pub fn expression(&self) -> &[ExprPart] {
        &self.expression
    }

    /// Render the pending accumulator for the display line, e.g. "2 +".
    #[must_use]
    pub fn expression_text(&self) -> String {
        let mut out = String::new();
        for part in &self.expression {
            if !out.is_empty() {
                out.push(' ');
            }
            match part {
                ExprPart::Operand(text) => out.push_str(text),
                ExprPart::Operator(op) => out.push_str(op.glyph()),
            }
        }
        out
    }

    /// Apply one keypad keystroke. Returns an [`Evaluation`] when an `=`
    /// press completes successfully.
    pub fn handle_key(&mut self, token: &str, kind: KeyType) -> Option<Evaluation> {
        // Any keystroke leaves the sticky error state.
        self.error = false;

        match kind {
            KeyType::Number => {
                self.handle_number(token);
                None
            }
            KeyType::Operator => {
                self.handle_operator(token);
                None
            }
            KeyType::Scientific => {
                self.handle_scientific(token);
                None
            }
            KeyType::Action => self.handle_action(token),
        }
    }

    fn handle_number(&mut self, token: &str) {
        if token == "." {
            if self.is_new_number {
                self.display_value = "0.".to_string();
                self.is_new_number = false;
            } else if !self.display_value.contains('.') {
                self.display_value.push('.');
            }
            // A second "." on the same operand is a no-op.
        } else if self.is_new_number || self.display_value == "0" {
            self.display_value = token.to_string();
            self.is_new_number = false;
        } else {
            self.display_value.push_str(token);
        }
    }

    fn handle_operator(&mut self, token: &str) {
        let Some(op) = Op::parse(token) else {
            return;
        };
        self.expression
            .push(ExprPart::Operand(self.display_value.clone()));
        self.expression.push(ExprPart::Operator(op));
        self.is_new_number = true;
    }

    fn handle_scientific(&mut self, token: &str) {
        match token {
            "π" => {
                self.display_value = eval::format_number(std::f64::consts::PI);
                self.is_new_number = true;
            }
            "e" => {
                self.display_value = eval::format_number(std::f64::consts::E);
                self.is_new_number = true;
            }
            func => {
                // Unary functions apply immediately to the current operand.
                let Ok(value) = self.display_value.parse::<f64>() else {
                    self.enter_error_state();
                    return;
                };
                let result = match func {
                    "sin" => value.sin(),
                    "cos" => value.cos(),
                    "tan" => value.tan(),
                    "log" => value.log10(),
                    "ln" => value.ln(),
                    "√" => value.sqrt(),
                    "x²" => value * value,
                    _ => return,
                };
                if result.is_finite() {
                    self.display_value = eval::format_number(eval::round_decimal(result));
                    self.is_new_number = true;
                } else {
                    // Domain errors (log of a negative, √ of a negative)
                    // share the evaluation error state.
                    self.enter_error_state();
                }
            }
        }
    }

    fn handle_action(&mut self, token: &str) -> Option<Evaluation> {
        match token {
            "AC" => {
                self.display_value = "0".to_string();
                self.expression.clear();
                self.is_new_number = true;
                None
            }
            "C" => {
                self.display_value = "0".to_string();
                self.is_new_number = true;
                None
            }
            "⌫" => {
                if self.is_new_number {
                    return None;
                }
                if self.display_value.chars().count() == 1 {
                    self.display_value = "0".to_string();
                    self.is_new_number = true;
                } else {
                    self.display_value.pop();
                }
                None
            }
            "=" => self.evaluate(),
            "%" => {
                self.apply_in_place(|value| value / 100.0);
                None
            }
            "+/-" => {
                self.apply_in_place(|value| -value);
                None
            }
            _ => None,
        }
    }

    /// In-place numeric transform of the operand (`%` and `+/-` are not
    /// expression-aware).
    fn apply_in_place(&mut self, transform: impl FnOnce(f64) -> f64) {
        let Ok(value) = self.display_value.parse::<f64>() else {
            self.enter_error_state();
            return;
        };
        self.display_value = eval::format_number(transform(value));
    }

    fn evaluate(&mut self) -> Option<Evaluation> {
        if self.expression.is_empty() {
            return None;
        }

        let expression = format!("{} {}", self.expression_text(), self.display_value);

        match self.eval_tokens().and_then(|tokens| eval::evaluate_to_string(&tokens)) {
            Ok(result) => {
                self.display_value = result.clone();
                self.expression.clear();
                self.is_new_number = true;
                Some(Evaluation { expression, result })
            }
            Err(err) => {
                tracing::debug!(%err, "keypad evaluation failed");
                // The accumulator is retained; only the display enters
                // the error state.
                self.enter_error_state();
                None
            }
        }
    }

    fn eval_tokens(&self) -> Result<Vec<Token>, eval::EvalError> {
        let mut tokens = Vec::with_capacity(self.expression.len() + 1);
        for part in &self.expression {
            match part {
                ExprPart::Operand(text) => tokens.push(parse_operand(text)?),
                ExprPart::Operator(op) => tokens.push(Token::Op(*op)),
            }
        }
        tokens.push(parse_operand(&self.display_value)?);
        Ok(tokens)
    }

    fn enter_error_state(&mut self) {
        self.error = true;
        self.display_value = "Error".to_string();
        self.is_new_number = true;
    }
}

fn parse_operand(text: &str) -> Result<Token, eval::EvalError> {
    text.parse::<f64>()
        .map(Token::Number)
        .map_err(|_| eval::EvalError::InvalidNumber(text.to_string()))
}

#[cfg(test)]
mod tests {
    use nebula_types::KeyType;

    use super::{Evaluation, InputState};

    fn press(state: &mut InputState, keys: &[(&str, KeyType)]) -> Option<Evaluation> {
        let mut last = None;
        for (token, kind) in keys {
            last = state.handle_key(token, *kind);
        }
        last
    }

    fn digits(state: &mut InputState, s: &str) {
        for c in s.chars() {
            state.handle_key(&c.to_string(), KeyType::Number);
        }
    }

    #[test]
    fn digits_concatenate_after_clear() {
        let mut state = InputState::new();
        digits(&mut state, "123");
        assert_eq!(state.display_value(), "123");
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut state = InputState::new();
        digits(&mut state, "07");
        assert_eq!(state.display_value(), "7");
    }

    #[test]
    fn decimal_point_starts_with_zero() {
        let mut state = InputState::new();
        state.handle_key(".", KeyType::Number);
        assert_eq!(state.display_value(), "0.");
        assert!(!state.is_new_number());
    }

    #[test]
    fn second_decimal_point_is_noop() {
        let mut state = InputState::new();
        digits(&mut state, "1.5");
        let before = state.clone();
        state.handle_key(".", KeyType::Number);
        assert_eq!(state, before);
    }

    #[test]
    fn operator_commits_operand() {
        let mut state = InputState::new();
        digits(&mut state, "12");
        state.handle_key("+", KeyType::Operator);
        assert_eq!(state.expression_text(), "12 +");
        assert!(state.is_new_number());
        assert_eq!(state.display_value(), "12");
    }

    #[test]
    fn multiplication_renders_glyph() {
        let mut state = InputState::new();
        digits(&mut state, "6");
        state.handle_key("*", KeyType::Operator);
        assert_eq!(state.expression_text(), "6 ×");
    }

    #[test]
    fn round_trip_two_plus_two() {
        let mut state = InputState::new();
        let evaluation = press(
            &mut state,
            &[
                ("2", KeyType::Number),
                ("+", KeyType::Operator),
                ("2", KeyType::Number),
                ("=", KeyType::Action),
            ],
        )
        .expect("= should evaluate");

        assert_eq!(evaluation.expression, "2 + 2");
        assert_eq!(evaluation.result, "4");
        assert_eq!(state.display_value(), "4");
        assert!(state.expression().is_empty());
        assert!(state.is_new_number());
    }

    #[test]
    fn equals_without_expression_is_noop() {
        let mut state = InputState::new();
        digits(&mut state, "42");
        assert!(state.handle_key("=", KeyType::Action).is_none());
        assert_eq!(state.display_value(), "42");
    }

    #[test]
    fn chained_operators_recommit_display() {
        let mut state = InputState::new();
        press(
            &mut state,
            &[
                ("2", KeyType::Number),
                ("+", KeyType::Operator),
                ("3", KeyType::Number),
                ("*", KeyType::Operator),
                ("4", KeyType::Number),
            ],
        );
        let evaluation = state.handle_key("=", KeyType::Action).unwrap();
        // Standard precedence, not sequential: 2 + 3 * 4.
        assert_eq!(evaluation.result, "14");
    }

    #[test]
    fn result_chains_into_next_expression() {
        let mut state = InputState::new();
        press(
            &mut state,
            &[
                ("2", KeyType::Number),
                ("+", KeyType::Operator),
                ("2", KeyType::Number),
                ("=", KeyType::Action),
                ("*", KeyType::Operator),
                ("3", KeyType::Number),
            ],
        );
        let evaluation = state.handle_key("=", KeyType::Action).unwrap();
        assert_eq!(evaluation.expression, "4 × 3");
        assert_eq!(evaluation.result, "12");
    }

    #[test]
    fn division_by_zero_enters_error_state() {
        let mut state = InputState::new();
        let evaluation = press(
            &mut state,
            &[
                ("5", KeyType::Number),
                ("/", KeyType::Operator),
                ("0", KeyType::Number),
                ("=", KeyType::Action),
            ],
        );
        assert!(evaluation.is_none());
        assert!(state.is_error());
        assert_eq!(state.display_value(), "Error");
        assert!(state.is_new_number());
    }

    #[test]
    fn next_keystroke_clears_error() {
        let mut state = InputState::new();
        press(
            &mut state,
            &[
                ("5", KeyType::Number),
                ("/", KeyType::Operator),
                ("0", KeyType::Number),
                ("=", KeyType::Action),
            ],
        );
        assert!(state.is_error());
        state.handle_key("7", KeyType::Number);
        assert!(!state.is_error());
        assert_eq!(state.display_value(), "7");
    }

    #[test]
    fn ac_resets_to_initial_state() {
        let mut state = InputState::new();
        press(
            &mut state,
            &[
                ("9", KeyType::Number),
                ("+", KeyType::Operator),
                ("1", KeyType::Number),
            ],
        );
        state.handle_key("AC", KeyType::Action);
        assert_eq!(state, InputState::new());
    }

    #[test]
    fn c_clears_display_but_keeps_expression() {
        let mut state = InputState::new();
        press(
            &mut state,
            &[
                ("9", KeyType::Number),
                ("+", KeyType::Operator),
                ("5", KeyType::Number),
            ],
        );
        state.handle_key("C", KeyType::Action);
        assert_eq!(state.display_value(), "0");
        assert_eq!(state.expression_text(), "9 +");
    }

    #[test]
    fn backspace_on_fresh_display_is_noop() {
        let mut state = InputState::new();
        state.handle_key("AC", KeyType::Action);
        let before = state.clone();
        state.handle_key("⌫", KeyType::Action);
        assert_eq!(state, before);
    }

    #[test]
    fn backspace_drops_last_digit() {
        let mut state = InputState::new();
        digits(&mut state, "123");
        state.handle_key("⌫", KeyType::Action);
        assert_eq!(state.display_value(), "12");
    }

    #[test]
    fn backspace_on_single_digit_resets_to_zero() {
        let mut state = InputState::new();
        digits(&mut state, "7");
        state.handle_key("⌫", KeyType::Action);
        assert_eq!(state.display_value(), "0");
        assert!(state.is_new_number());
    }

    #[test]
    fn percent_divides_display_in_place() {
        let mut state = InputState::new();
        digits(&mut state, "50");
        state.handle_key("%", KeyType::Action);
        assert_eq!(state.display_value(), "0.5");
    }

    #[test]
    fn negate_toggles_sign() {
        let mut state = InputState::new();
        digits(&mut state, "8");
        state.handle_key("+/-", KeyType::Action);
        assert_eq!(state.display_value(), "-8");
        state.handle_key("+/-", KeyType::Action);
        assert_eq!(state.display_value(), "8");
    }

    #[test]
    fn negate_zero_stays_zero() {
        let mut state = InputState::new();
        state.handle_key("+/-", KeyType::Action);
        assert_eq!(state.display_value(), "0");
    }

    #[test]
    fn square_root_applies_immediately() {
        let mut state = InputState::new();
        digits(&mut state, "9");
        state.handle_key("√", KeyType::Scientific);
        assert_eq!(state.display_value(), "3");
        assert!(state.is_new_number());
    }

    #[test]
    fn square_function() {
        let mut state = InputState::new();
        digits(&mut state, "12");
        state.handle_key("x²", KeyType::Scientific);
        assert_eq!(state.display_value(), "144");
    }

    #[test]
    fn sin_uses_radians_and_rounds() {
        let mut state = InputState::new();
        digits(&mut state, "0");
        state.handle_key("sin", KeyType::Scientific);
        assert_eq!(state.display_value(), "0");
    }

    #[test]
    fn log_of_hundred() {
        let mut state = InputState::new();
        digits(&mut state, "100");
        state.handle_key("log", KeyType::Scientific);
        assert_eq!(state.display_value(), "2");
    }

    #[test]
    fn log_of_negative_enters_error_state() {
        let mut state = InputState::new();
        digits(&mut state, "5");
        state.handle_key("+/-", KeyType::Action);
        state.handle_key("log", KeyType::Scientific);
        assert!(state.is_error());
        assert_eq!(state.display_value(), "Error");
    }

    #[test]
    fn pi_replaces_display() {
        let mut state = InputState::new();
        digits(&mut state, "99");
        state.handle_key("π", KeyType::Scientific);
        assert_eq!(state.display_value(), "3.141592653589793");
        assert!(state.is_new_number());
    }

    #[test]
    fn unrecognized_scientific_token_is_noop() {
        let mut state = InputState::new();
        digits(&mut state, "5");
        let before = state.clone();
        state.handle_key("sinh", KeyType::Scientific);
        assert_eq!(state, before);
    }

    #[test]
    fn constant_then_operator_builds_expression() {
        let mut state = InputState::new();
        state.handle_key("π", KeyType::Scientific);
        state.handle_key("*", KeyType::Operator);
        digits(&mut state, "2");
        let evaluation = state.handle_key("=", KeyType::Action).unwrap();
        assert_eq!(evaluation.result, "6.2831853072");
    }
}
