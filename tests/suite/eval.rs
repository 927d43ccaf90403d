//! Evaluator properties across the text and token interfaces.

use nebula_engine::eval::{EvalError, evaluate_to_string, tokenize};

fn eval(input: &str) -> Result<String, EvalError> {
    evaluate_to_string(&tokenize(input)?)
}

#[test]
fn standard_precedence_and_associativity() {
    assert_eq!(eval("2 + 3 * 4").unwrap(), "14");
    assert_eq!(eval("20 - 12 / 4").unwrap(), "17");
    assert_eq!(eval("100 / 10 / 2").unwrap(), "5");
    assert_eq!(eval("10 - 3 - 2").unwrap(), "5");
}

#[test]
fn parenthesized_terms() {
    assert_eq!(eval("(2 + 3) * 4").unwrap(), "20");
    assert_eq!(eval("((1 + 1))").unwrap(), "2");
}

#[test]
fn percent_terms_divide_by_one_hundred() {
    assert_eq!(eval("50%").unwrap(), "0.5");
    assert_eq!(eval("(15/100) * 80").unwrap(), "12");
}

#[test]
fn ten_decimal_place_rounding() {
    assert_eq!(eval("0.1 + 0.2").unwrap(), "0.3");
    assert_eq!(eval("1 / 3").unwrap(), "0.3333333333");
}

#[test]
fn non_finite_results_are_rejected() {
    assert_eq!(eval("1 / 0").unwrap_err(), EvalError::NonFinite);
    assert_eq!(eval("0 / 0").unwrap_err(), EvalError::NonFinite);
    assert_eq!(eval("-1 / 0").unwrap_err(), EvalError::NonFinite);
}

#[test]
fn glyph_operators_match_ascii_operators() {
    assert_eq!(eval("6 × 7").unwrap(), eval("6 * 7").unwrap());
    assert_eq!(eval("9 ÷ 2").unwrap(), eval("9 / 2").unwrap());
}

#[test]
fn constants_are_standalone_tokens() {
    assert_eq!(eval("π").unwrap(), "3.1415926536");
    assert_eq!(eval("e").unwrap(), "2.7182818285");
    // A digit adjacent to a constant is a parse error, never a silent
    // substring substitution.
    assert!(eval("2e3").is_err());
    assert!(eval("e2").is_err());
}

#[test]
fn malformed_expressions_fail_cleanly() {
    assert!(eval("").is_err());
    assert!(eval("+ 2").is_err());
    assert!(eval("2 +").is_err());
    assert!(eval("(2").is_err());
    assert!(eval("2)").is_err());
}

#[test]
fn results_have_no_thousands_separators() {
    assert_eq!(eval("1000 * 1000").unwrap(), "1000000");
}
