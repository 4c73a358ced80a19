//! Operand classification and primitive reduction.
//!
//! Classification is a pure function of a value's variant: it reads no
//! mutable state and is re-derived on every dispatch. There is nothing to
//! cache or invalidate because a record's operator set is fixed for the
//! lifetime of the value.
//!
//! Reduction (`to_primitive`) applies only to plain records and runs the
//! `value_of` then `to_text` hooks in that fixed order. It can never
//! upgrade a value to an overloaded operand: only a record constructed
//! with an operator set classifies as overloaded.

use kova_values::{coercion_failure, EvalError, EvalResult, SharedSet, Value};

/// A classified operand.
///
/// Carries the original value so a resolved entry is invoked with the
/// operands exactly as written, not with classification artifacts.
#[derive(Debug, Clone)]
pub enum Operand {
    /// `Number` or `BigInt`.
    Numeric(Value),
    /// `String`.
    Textual(Value),
    /// Any other non-overloaded value.
    Plain(Value),
    /// A record tagged with an operator set.
    Overloaded(Value, SharedSet),
}

/// Classify a value.
pub fn classify(value: &Value) -> Operand {
    match value {
        Value::Number(_) | Value::BigInt(_) => Operand::Numeric(value.clone()),
        Value::Str(_) => Operand::Textual(value.clone()),
        Value::Record(record) => match record.operators() {
            Some(set) => Operand::Overloaded(value.clone(), set.clone()),
            None => Operand::Plain(value.clone()),
        },
        Value::Undefined | Value::Null | Value::Bool(_) => Operand::Plain(value.clone()),
    }
}

impl Operand {
    /// The carried value.
    pub fn value(&self) -> &Value {
        match self {
            Operand::Numeric(v) | Operand::Textual(v) | Operand::Plain(v) => v,
            Operand::Overloaded(v, _) => v,
        }
    }

    /// Whether this operand participates in overloaded dispatch.
    #[inline]
    pub fn is_overloaded(&self) -> bool {
        matches!(self, Operand::Overloaded(..))
    }

    /// The operator set ordinal this operand dispatches under.
    ///
    /// Primitives map onto the built-in sets (`Number` 0, `BigInt` 1,
    /// `String` 2); plain non-numeric operands have no ordinal until the
    /// resolver numericizes them.
    pub fn ordinal(&self) -> Option<u32> {
        match self {
            Operand::Numeric(Value::BigInt(_)) => Some(1),
            Operand::Numeric(_) => Some(0),
            Operand::Textual(_) => Some(2),
            Operand::Overloaded(_, set) => Some(set.ordinal()),
            Operand::Plain(_) => None,
        }
    }
}

/// Reduce a value toward a primitive.
///
/// Primitives pass through unchanged. A plain record runs its `value_of`
/// hook, then its `to_text` hook; the first hook that yields a
/// non-record value wins. Exhausting the chain is a `CoercionFailure`.
///
/// Overloaded records are returned unchanged: classification routes them
/// before coercion applies, and reduction never upgrades or downgrades
/// overloadability.
pub fn to_primitive(value: &Value) -> EvalResult {
    let Value::Record(record) = value else {
        return Ok(value.clone());
    };
    if record.operators().is_some() {
        return Ok(value.clone());
    }
    for hook_result in [record.run_value_of(), record.run_to_text()] {
        if let Some(v) = hook_result {
            if !matches!(v, Value::Record(_)) {
                return Ok(v);
            }
        }
    }
    Err(coercion_failure(&value.type_label()))
}

/// Reduce a classified operand: plain records are replaced by their
/// primitive reduction, everything else is unchanged.
pub fn reduce(operand: Operand) -> Result<Operand, EvalError> {
    match operand {
        Operand::Plain(value @ Value::Record(_)) => Ok(classify(&to_primitive(&value)?)),
        other => Ok(other),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use kova_values::{EvalErrorKind, OperatorSetSpec, OverloadRegistry, RecordValue};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn primitives_classify_without_consulting_sets() {
        assert!(matches!(classify(&Value::Number(1.0)), Operand::Numeric(_)));
        assert!(matches!(classify(&Value::bigint(1)), Operand::Numeric(_)));
        assert!(matches!(classify(&Value::string("x")), Operand::Textual(_)));
        assert!(matches!(classify(&Value::Bool(true)), Operand::Plain(_)));
        assert!(matches!(classify(&Value::Null), Operand::Plain(_)));
    }

    #[test]
    fn ordinals_map_onto_builtin_sets() {
        assert_eq!(classify(&Value::Number(1.0)).ordinal(), Some(0));
        assert_eq!(classify(&Value::bigint(1)).ordinal(), Some(1));
        assert_eq!(classify(&Value::string("x")).ordinal(), Some(2));
        assert_eq!(classify(&Value::Undefined).ordinal(), None);
    }

    #[test]
    fn tagged_records_classify_as_overloaded() {
        let registry = OverloadRegistry::new();
        let set = registry
            .register(OperatorSetSpec::new("Vector"))
            .unwrap_or_else(|e| panic!("register: {e}"));
        let v = Value::record(RecordValue::with_operators(set.clone()));

        let operand = classify(&v);
        assert!(operand.is_overloaded());
        assert_eq!(operand.ordinal(), Some(set.ordinal()));
    }

    #[test]
    fn classification_is_idempotent_and_pure() {
        let v = Value::record(RecordValue::plain().with_field("x", Value::Number(1.0)));
        let first = classify(&v);
        let second = classify(&v);
        assert!(matches!(first, Operand::Plain(_)));
        assert!(matches!(second, Operand::Plain(_)));
        // The value is untouched by classification.
        if let Value::Record(record) = &v {
            assert_eq!(record.field("x").unwrap(), Value::Number(1.0));
        }
    }

    #[test]
    fn reduction_prefers_value_of_over_to_text() {
        fn as_number(_: &RecordValue) -> Option<Value> {
            Some(Value::Number(7.0))
        }
        fn as_text(_: &RecordValue) -> Option<Value> {
            Some(Value::string("seven"))
        }
        let both = Value::record(
            RecordValue::plain()
                .with_value_of(as_number)
                .with_to_text(as_text),
        );
        assert_eq!(to_primitive(&both).unwrap(), Value::Number(7.0));

        let text_only = Value::record(RecordValue::plain().with_to_text(as_text));
        assert_eq!(to_primitive(&text_only).unwrap(), Value::string("seven"));
    }

    #[test]
    fn reduction_skips_hooks_yielding_records() {
        fn nested(_: &RecordValue) -> Option<Value> {
            Some(Value::record(RecordValue::plain()))
        }
        fn as_text(_: &RecordValue) -> Option<Value> {
            Some(Value::string("fallback"))
        }
        let record = Value::record(
            RecordValue::plain()
                .with_value_of(nested)
                .with_to_text(as_text),
        );
        assert_eq!(to_primitive(&record).unwrap(), Value::string("fallback"));
    }

    #[test]
    fn exhausted_chain_is_a_coercion_failure() {
        let bare = Value::record(RecordValue::plain());
        let err = to_primitive(&bare).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::CoercionFailure { .. }));
    }

    #[test]
    fn reduction_never_touches_overloaded_records() {
        let registry = OverloadRegistry::new();
        let set = registry
            .register(OperatorSetSpec::new("Vector"))
            .unwrap_or_else(|e| panic!("register: {e}"));
        let v = Value::record(RecordValue::with_operators(set));
        assert_eq!(to_primitive(&v).unwrap(), v);
        assert!(reduce(classify(&v)).unwrap().is_overloaded());
    }
}
