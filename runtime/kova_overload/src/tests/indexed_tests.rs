//! Indexed-access overlay tests.
#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kova_values::{
    EvalErrorKind, OperatorFn, OperatorSetSpec, OverloadRegistry, RecordValue, SharedSet, Value,
};
use pretty_assertions::assert_eq;

use super::support::field_num;
use crate::indexed::IndexedOverlay;

/// A buffer-like type: indexed get reads `base + index`, indexed set
/// stores into a `slot<i>` field. Both entries bump a shared counter so
/// tests can prove when the table was and was not consulted.
fn buffer_set(registry: &OverloadRegistry, calls: &Arc<AtomicUsize>) -> SharedSet {
    let get_calls = Arc::clone(calls);
    let get: OperatorFn = Arc::new(move |args| {
        get_calls.fetch_add(1, Ordering::Relaxed);
        let base = field_num(&args[0], "base");
        let Value::Number(index) = &args[1] else {
            panic!("non-numeric index reached the table entry");
        };
        Ok(Value::Number(base + *index))
    });
    let set_calls = Arc::clone(calls);
    let set: OperatorFn = Arc::new(move |args| {
        set_calls.fetch_add(1, Ordering::Relaxed);
        let Value::Record(record) = &args[0] else {
            panic!("missing target record");
        };
        let Value::Number(index) = &args[1] else {
            panic!("non-numeric index reached the table entry");
        };
        record.set_field(format!("slot{index}"), args[2].clone());
        Ok(Value::Undefined)
    });
    registry
        .register(
            OperatorSetSpec::new("Buffer")
                .entry("[]", get)
                .entry("[]=", set),
        )
        .unwrap_or_else(|e| panic!("register Buffer: {e}"))
}

fn buffer(set: &SharedSet, length: f64) -> Value {
    Value::record(
        RecordValue::with_operators(set.clone())
            .with_field("length", Value::Number(length))
            .with_field("base", Value::Number(100.0)),
    )
}

#[test]
fn in_range_get_routes_through_the_entry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = OverloadRegistry::new();
    let set = buffer_set(&registry, &calls);
    let b = buffer(&set, 3.0);
    let overlay = IndexedOverlay::new(&b).unwrap();

    assert_eq!(overlay.get(&Value::Number(0.0)).unwrap(), Value::Number(100.0));
    assert_eq!(overlay.get(&Value::Number(2.0)).unwrap(), Value::Number(102.0));
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn out_of_range_get_is_absent_without_invocation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = OverloadRegistry::new();
    let set = buffer_set(&registry, &calls);
    let b = buffer(&set, 3.0);
    let overlay = IndexedOverlay::new(&b).unwrap();

    assert_eq!(overlay.get(&Value::Number(3.0)).unwrap(), Value::Undefined);
    assert_eq!(overlay.get(&Value::Number(1e9)).unwrap(), Value::Undefined);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn non_canonical_keys_fall_through_without_invocation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = OverloadRegistry::new();
    let set = buffer_set(&registry, &calls);
    let b = buffer(&set, 3.0);
    let overlay = IndexedOverlay::new(&b).unwrap();

    assert_eq!(overlay.get(&Value::Number(-0.0)).unwrap(), Value::Undefined);
    assert_eq!(overlay.get(&Value::Number(1.5)).unwrap(), Value::Undefined);
    assert_eq!(overlay.get(&Value::Number(-1.0)).unwrap(), Value::Undefined);
    assert_eq!(overlay.get(&Value::Number(f64::NAN)).unwrap(), Value::Undefined);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn non_numeric_keys_read_ordinary_fields() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = OverloadRegistry::new();
    let set = buffer_set(&registry, &calls);
    let b = buffer(&set, 3.0);
    let overlay = IndexedOverlay::new(&b).unwrap();

    assert_eq!(
        overlay.get(&Value::string("base")).unwrap(),
        Value::Number(100.0)
    );
    assert_eq!(
        overlay.get(&Value::string("missing")).unwrap(),
        Value::Undefined
    );
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn length_is_read_fresh_on_every_access() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = OverloadRegistry::new();
    let set = buffer_set(&registry, &calls);
    let b = buffer(&set, 3.0);
    let overlay = IndexedOverlay::new(&b).unwrap();

    assert_eq!(overlay.get(&Value::Number(2.0)).unwrap(), Value::Number(102.0));
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // Shrink the buffer: the same key now misses, with no invocation.
    if let Value::Record(record) = &b {
        record.set_field("length", Value::Number(1.0));
    }
    assert_eq!(overlay.get(&Value::Number(2.0)).unwrap(), Value::Undefined);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn in_range_set_routes_and_out_of_range_stores_plainly() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = OverloadRegistry::new();
    let set = buffer_set(&registry, &calls);
    let b = buffer(&set, 3.0);
    let overlay = IndexedOverlay::new(&b).unwrap();

    overlay.set(&Value::Number(1.0), Value::Number(55.0)).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(field_num(&b, "slot1"), 55.0);

    overlay.set(&Value::Number(9.0), Value::Number(77.0)).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(field_num(&b, "9"), 77.0);
}

#[test]
fn set_without_entry_is_no_overload_defined() {
    let get: OperatorFn = Arc::new(|_args| Ok(Value::Undefined));
    let registry = OverloadRegistry::new();
    let set = registry
        .register(OperatorSetSpec::new("ReadOnly").entry("[]", get))
        .unwrap();
    let b = Value::record(
        RecordValue::with_operators(set.clone()).with_field("length", Value::Number(2.0)),
    );
    let overlay = IndexedOverlay::new(&b).unwrap();

    let err = overlay
        .set(&Value::Number(0.0), Value::Number(1.0))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NoOverloadDefined { .. }));
}

#[test]
fn overlay_rejects_values_without_indexed_operators() {
    let registry = OverloadRegistry::new();

    let plain = Value::record(RecordValue::plain());
    let err = IndexedOverlay::new(&plain).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NotOverloadable { .. }));

    let set = registry
        .register(OperatorSetSpec::new("NoIndex"))
        .unwrap();
    let tagged = Value::record(RecordValue::with_operators(set));
    assert!(!IndexedOverlay::applies_to(&tagged));
    assert!(IndexedOverlay::new(&tagged).is_err());
}

#[test]
fn missing_length_routes_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = OverloadRegistry::new();
    let set = buffer_set(&registry, &calls);
    let b = Value::record(RecordValue::with_operators(set.clone()));
    let overlay = IndexedOverlay::new(&b).unwrap();

    assert_eq!(overlay.get(&Value::Number(0.0)).unwrap(), Value::Undefined);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}
