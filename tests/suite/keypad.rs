//! Calculator input engine properties, driven through the public App API.

use nebula_engine::{App, AppOptions, KeyType};
use nebula_types::EntryKind;

fn app() -> App {
    App::with_api(AppOptions::default(), None)
}

fn press_digits(app: &mut App, digits: &str) {
    for c in digits.chars() {
        app.press_key(&c.to_string(), KeyType::Number);
    }
}

#[test]
fn digits_after_clear_concatenate() {
    let mut app = app();
    app.press_key("AC", KeyType::Action);
    press_digits(&mut app, "1234567890");
    assert_eq!(app.calc().display_value(), "1234567890");
}

#[test]
fn at_most_one_decimal_point() {
    let mut app = app();
    press_digits(&mut app, "3.14");
    app.press_key(".", KeyType::Number);
    press_digits(&mut app, "15");
    assert_eq!(app.calc().display_value(), "3.1415");
    assert_eq!(
        app.calc().display_value().matches('.').count(),
        1,
        "display holds at most one decimal point"
    );
}

#[test]
fn double_decimal_press_is_idempotent() {
    let mut once = app();
    press_digits(&mut once, "2");
    once.press_key(".", KeyType::Number);

    let mut twice = app();
    press_digits(&mut twice, "2");
    twice.press_key(".", KeyType::Number);
    twice.press_key(".", KeyType::Number);

    assert_eq!(once.calc().display_value(), twice.calc().display_value());
}

#[test]
fn ac_restores_exact_initial_state() {
    let mut app = app();
    press_digits(&mut app, "9.5");
    app.press_key("+", KeyType::Operator);
    press_digits(&mut app, "1");
    app.press_key("sin", KeyType::Scientific);
    app.press_key("AC", KeyType::Action);

    let calc = app.calc();
    assert_eq!(calc.display_value(), "0");
    assert_eq!(calc.expression_text(), "");
    assert!(calc.is_new_number());
    assert!(!calc.is_error());
}

#[test]
fn round_trip_appends_history_item() {
    let mut app = app();
    press_digits(&mut app, "2");
    app.press_key("+", KeyType::Operator);
    press_digits(&mut app, "2");
    app.press_key("=", KeyType::Action);

    assert_eq!(app.calc().display_value(), "4");
    assert_eq!(app.history().len(), 1);
    let entry = &app.history().entries()[0];
    assert_eq!(entry.expression(), "2 + 2");
    assert_eq!(entry.result(), "4");
    assert_eq!(entry.kind(), EntryKind::Standard);
}

#[test]
fn division_by_zero_is_an_error_without_history() {
    let mut app = app();
    press_digits(&mut app, "5");
    app.press_key("/", KeyType::Operator);
    press_digits(&mut app, "0");
    app.press_key("=", KeyType::Action);

    assert!(app.calc().is_error());
    assert_eq!(app.calc().display_value(), "Error");
    assert!(app.history().is_empty());
}

#[test]
fn square_root_of_nine_is_three() {
    let mut app = app();
    press_digits(&mut app, "9");
    app.press_key("√", KeyType::Scientific);
    assert_eq!(app.calc().display_value(), "3");
    assert!(app.calc().is_new_number());
}

#[test]
fn backspace_after_clear_is_a_noop() {
    let mut app = app();
    app.press_key("AC", KeyType::Action);
    let display_before = app.calc().display_value().to_string();
    app.press_key("⌫", KeyType::Action);
    assert_eq!(app.calc().display_value(), display_before);
    assert!(app.calc().is_new_number());
}

#[test]
fn percent_is_an_in_place_transform() {
    let mut app = app();
    press_digits(&mut app, "50");
    app.press_key("%", KeyType::Action);
    assert_eq!(app.calc().display_value(), "0.5");
    // Not expression-aware: nothing was committed.
    assert_eq!(app.calc().expression_text(), "");
}

#[test]
fn percentage_inside_expression_uses_percent_term() {
    // The evaluator itself still understands percent terms.
    let tokens = nebula_engine::eval::tokenize("200 + 10%").unwrap();
    assert_eq!(
        nebula_engine::eval::evaluate_to_string(&tokens).unwrap(),
        "200.1"
    );
}

#[test]
fn error_state_is_cleared_by_any_keystroke() {
    let mut app = app();
    press_digits(&mut app, "1");
    app.press_key("/", KeyType::Operator);
    press_digits(&mut app, "0");
    app.press_key("=", KeyType::Action);
    assert!(app.calc().is_error());

    app.press_key("C", KeyType::Action);
    assert!(!app.calc().is_error());
    assert_eq!(app.calc().display_value(), "0");
}
