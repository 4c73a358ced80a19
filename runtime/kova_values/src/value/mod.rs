//! Runtime values for the Kova overload engine.
//!
//! The value model is a closed tagged union: classification of an operand
//! is a pure function of its variant, never a property probe. A value
//! participates in overload dispatch exactly when it is a `Record` whose
//! `operators` slot was filled at construction time; the slot can never be
//! set, cleared, or swapped afterwards.

mod heap;
mod record;

use std::fmt;

use num_bigint::BigInt;
use num_traits::Zero;

pub use heap::Heap;
pub use record::{CoerceFn, RecordValue};

/// Runtime value in the Kova overload engine.
#[derive(Clone, Debug)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Absent value.
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// IEEE 754 double-precision number.
    Number(f64),

    // Heap Types (use Heap<T> for enforced Arc usage)
    /// Arbitrary-precision integer.
    BigInt(Heap<BigInt>),
    /// String value.
    Str(Heap<String>),
    /// Compound value; overloadable when tagged with an operator set.
    Record(Heap<RecordValue>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an arbitrary-precision integer value.
    ///
    /// Accepts anything convertible to `BigInt`, including machine
    /// integers: `Value::bigint(42)`.
    #[inline]
    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Value::BigInt(Heap::new(n.into()))
    }

    /// Create a record value.
    #[inline]
    pub fn record(record: RecordValue) -> Self {
        Value::Record(Heap::new(record))
    }
}

// Value Methods

impl Value {
    /// Static name of this value's variant.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::BigInt(_) => "BigInt",
            Value::Str(_) => "String",
            Value::Record(_) => "Record",
        }
    }

    /// Diagnostic label: the operator set name for overloaded records,
    /// the variant name otherwise.
    pub fn type_label(&self) -> String {
        match self {
            Value::Record(record) => match record.operators() {
                Some(set) => set.name().to_string(),
                None => "Record".to_string(),
            },
            other => other.type_name().to_string(),
        }
    }

    /// Whether this value is `Null` or `Undefined`.
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Boolean conversion used when negating derived comparison results.
    ///
    /// Empty strings, zero, `NaN`, the zero big integer, `Null` and
    /// `Undefined` are falsy; records are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(n) => !n.is_zero(),
            Value::Str(s) => !s.is_empty(),
            Value::Record(_) => true,
        }
    }
}

impl PartialEq for Value {
    /// Same-variant equality.
    ///
    /// Numbers compare by IEEE 754 rules (`NaN != NaN`, `-0.0 == 0.0`);
    /// records compare by identity. Cross-variant comparisons are always
    /// unequal here; loose equality lives in the dispatch layer.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Textual rendering, used by the additive concatenation branch.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
                } else {
                    write!(f, "{n}")
                }
            }
            Value::BigInt(n) => write!(f, "{n}n"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Record(record) => match record.operators() {
                Some(set) => write!(f, "[{}]", set.name()),
                None => write!(f, "[record]"),
            },
        }
    }
}
