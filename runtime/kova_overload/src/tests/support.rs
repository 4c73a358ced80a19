//! Shared fixtures: vector-like values and common table entries.
#![expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Test fixtures index with small integers"
)]

use std::sync::Arc;

use kova_values::{OperatorFn, RecordValue, SharedSet, Value};

/// Build a vector-like value: elements in numeric fields plus `length`.
pub(crate) fn vector(set: &SharedSet, elements: &[f64]) -> Value {
    let mut record = RecordValue::with_operators(set.clone())
        .with_field("length", Value::Number(elements.len() as f64));
    for (i, e) in elements.iter().enumerate() {
        record = record.with_field(i.to_string(), Value::Number(*e));
    }
    Value::record(record)
}

/// Read a named field of a record result as a number.
pub(crate) fn field_num(value: &Value, name: &str) -> f64 {
    let Value::Record(record) = value else {
        panic!("expected record, got {value:?}");
    };
    match record.field(name) {
        Some(Value::Number(n)) => n,
        other => panic!("expected numeric field `{name}`, got {other:?}"),
    }
}

/// Read element `index` of a vector-like result.
pub(crate) fn element(value: &Value, index: usize) -> f64 {
    field_num(value, &index.to_string())
}

/// Element count of a vector-like value.
pub(crate) fn len_of(value: &Value) -> f64 {
    field_num(value, "length")
}

/// Elementwise binary entry producing a plain (untagged) record result.
pub(crate) fn elementwise(op: fn(f64, f64) -> f64) -> OperatorFn {
    Arc::new(move |args| {
        let (a, b) = (&args[0], &args[1]);
        let n = len_of(a).min(len_of(b)) as usize;
        let mut out = RecordValue::plain().with_field("length", Value::Number(n as f64));
        for i in 0..n {
            out = out.with_field(
                i.to_string(),
                Value::Number(op(element(a, i), element(b, i))),
            );
        }
        Ok(Value::record(out))
    })
}

/// Scaling entry for number/vector cross tables; accepts either operand
/// order and scales every element.
pub(crate) fn scale() -> OperatorFn {
    Arc::new(|args| {
        let (k, v) = match (&args[0], &args[1]) {
            (Value::Number(k), v @ Value::Record(_)) => (*k, v),
            (v @ Value::Record(_), Value::Number(k)) => (*k, v),
            other => panic!("unexpected operands: {other:?}"),
        };
        let n = len_of(v) as usize;
        let mut out = RecordValue::plain().with_field("length", Value::Number(n as f64));
        for i in 0..n {
            out = out.with_field(i.to_string(), Value::Number(k * element(v, i)));
        }
        Ok(Value::record(out))
    })
}

/// Entry that returns its first argument; used to observe operand order.
pub(crate) fn first_operand() -> OperatorFn {
    Arc::new(|args| Ok(args[0].clone()))
}
