//! Tests for error factories and diagnostic mapping.

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn factory_message_matches_kind_display() {
    let err = operator_not_permitted("+", "Vector");
    assert_eq!(err.message, err.kind.to_string());

    let err = no_binary_overload("*", "Vector", "Vector");
    assert_eq!(err.message, "no overload of `*` for `Vector` and `Vector`");
}

#[test]
fn invalid_name_messages_distinguish_tables() {
    let unknown = invalid_operator_name("&&");
    assert_eq!(unknown.message, "`&&` is not an overloadable operator");

    let unary_in_cross = cross_table_operator("neg");
    assert_eq!(
        unary_in_cross.message,
        "operator `neg` cannot appear in a cross-type table"
    );

    // Both render distinct messages but share the E7001 registration code.
    assert_eq!(unknown.kind.error_code(), "E7001");
    assert_eq!(unary_in_cross.kind.error_code(), "E7001");
}

#[test]
fn error_codes_follow_category_ranges() {
    assert_eq!(ambiguous_pairing().kind.error_code(), "E7002");
    assert_eq!(operator_not_open("*", "Vector").kind.error_code(), "E7003");
    assert_eq!(not_overloadable("Number").kind.error_code(), "E7101");
    assert_eq!(
        operator_not_permitted("+", "Vector").kind.error_code(),
        "E7201"
    );
    assert_eq!(
        no_unary_overload("neg", "Vector").kind.error_code(),
        "E7202"
    );
    assert_eq!(coercion_failure("Record").kind.error_code(), "E7301");
    assert_eq!(division_by_zero().kind.error_code(), "E7401");
    assert_eq!(EvalError::new("boom").kind.error_code(), "E7999");
}

#[test]
fn custom_error_keeps_message() {
    let err = EvalError::new("something went wrong");
    assert_eq!(err.to_string(), "something went wrong");
    assert_eq!(err.kind.primary_label(), "runtime error");
}

#[test]
fn labels_are_short_and_stable() {
    assert_eq!(division_by_zero().kind.primary_label(), "division by zero here");
    assert_eq!(
        binary_type_mismatch("BigInt", "Number").kind.primary_label(),
        "mismatched operand types"
    );
}
