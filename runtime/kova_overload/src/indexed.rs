//! Indexed-access overlay.
//!
//! Attached only to values whose operator set defines indexed get and/or
//! set. Canonical index keys — non-negative integral numbers, excluding
//! negative zero — within `[0, length)` route through the table entries;
//! every other key falls through to ordinary field storage. The `length`
//! field is read fresh on every access, never cached.
//!
//! The overlay is independent of the resolver's scope mechanism: indexed
//! access is never permission-scoped, unlike named operators.

use kova_ir::Operator;
use kova_values::{
    no_unary_overload, not_overloadable, EvalError, EvalResult, Heap, RecordValue, SharedSet,
    Value,
};

/// Wrapper routing integer-keyed access through a type's indexed-get/set
/// entries.
#[derive(Debug)]
pub struct IndexedOverlay {
    target: Heap<RecordValue>,
    set: SharedSet,
}

impl IndexedOverlay {
    /// Whether the overlay applies to a value: an overloaded record whose
    /// self table defines `[]` and/or `[]=`.
    pub fn applies_to(value: &Value) -> bool {
        match value {
            Value::Record(record) => record.operators().is_some_and(|set| {
                set.self_table().defines(Operator::IndexGet)
                    || set.self_table().defines(Operator::IndexSet)
            }),
            _ => false,
        }
    }

    /// Wrap a value. Fails with `NotOverloadable` when the value carries
    /// no operator set, and with a plain error when the set defines no
    /// indexed operators — the definition site only attaches the overlay
    /// to types that declare them.
    pub fn new(value: &Value) -> Result<Self, EvalError> {
        let Value::Record(record) = value else {
            return Err(not_overloadable(&value.type_label()));
        };
        let Some(set) = record.operators() else {
            return Err(not_overloadable(&value.type_label()));
        };
        if !set.self_table().defines(Operator::IndexGet)
            && !set.self_table().defines(Operator::IndexSet)
        {
            return Err(EvalError::new(format!(
                "type {} defines no indexed operators",
                set.name()
            )));
        }
        Ok(Self {
            target: record.clone(),
            set: set.clone(),
        })
    }

    /// Indexed read.
    ///
    /// In-range canonical keys invoke the `[]` entry with `[target,
    /// index]`; everything else reads ordinary field storage, absent
    /// fields reading as `Undefined`.
    pub fn get(&self, key: &Value) -> EvalResult {
        if let Some(index) = canonical_index(key) {
            if index < self.length() {
                let entry = self
                    .set
                    .self_table()
                    .get(Operator::IndexGet)
                    .ok_or_else(|| no_unary_overload("[]", self.set.name()))?;
                return (**entry)(&[self.target_value(), Value::Number(index)]);
            }
        }
        Ok(self
            .target
            .field(&key.to_string())
            .unwrap_or(Value::Undefined))
    }

    /// Indexed write.
    ///
    /// In-range canonical keys invoke the `[]=` entry with `[target,
    /// index, value]`; everything else writes ordinary field storage.
    pub fn set(&self, key: &Value, value: Value) -> Result<(), EvalError> {
        if let Some(index) = canonical_index(key) {
            if index < self.length() {
                let entry = self
                    .set
                    .self_table()
                    .get(Operator::IndexSet)
                    .ok_or_else(|| no_unary_overload("[]=", self.set.name()))?;
                (**entry)(&[self.target_value(), Value::Number(index), value])?;
                return Ok(());
            }
        }
        self.target.set_field(key.to_string(), value);
        Ok(())
    }

    /// Current element count, read fresh from the `length` field on every
    /// access. A missing or non-numeric length routes nothing.
    fn length(&self) -> f64 {
        match self.target.field("length") {
            Some(Value::Number(n)) => n,
            _ => 0.0,
        }
    }

    fn target_value(&self) -> Value {
        Value::Record(self.target.clone())
    }
}

/// Canonical index keys: non-negative integral numbers, finite, and not
/// negative zero. Fractional keys, negative keys, `-0.0` and non-numeric
/// keys are not indices and fall through to field storage.
fn canonical_index(key: &Value) -> Option<f64> {
    match key {
        Value::Number(n)
            if n.is_finite()
                && n.fract() == 0.0
                && *n >= 0.0
                && !(*n == 0.0 && n.is_sign_negative()) =>
        {
            Some(*n)
        }
        _ => None,
    }
}
