//! Kova Values - Runtime values and operator set registry.
//!
//! This crate provides the value model shared by the Kova runtime and the
//! operator overload machinery built on top of it:
//!
//! - `Value`: the runtime value (primitives plus heap records)
//! - `Heap`: enforced-Arc wrapper for heap values
//! - `OperatorSet` / `OverloadRegistry`: per-type operator tables with
//!   ordinal assignment
//! - `EvalError` / `EvalResult`: structured runtime errors
//!
//! # Arc Enforcement Architecture
//!
//! All heap allocations go through factory methods on `Value`. The
//! `Heap<T>` wrapper type has a private constructor, so external code
//! cannot create heap values directly:
//!
//! ```text
//! let s = Value::string("hello");          // OK
//! let n = Value::bigint(42);               // OK
//! let r = Value::record(RecordValue::plain()); // OK
//! let s = Value::Str(Heap::new(...));      // ERROR: Heap::new is crate-private
//! ```
//!
//! # Thread Safety
//!
//! Heap values use `Arc` internally. Operator sets and their tables are
//! immutable after registration and freely shared across threads; record
//! field storage uses `parking_lot::RwLock` for interior mutability.

mod errors;
mod registry;
mod sets;
mod table;
mod value;

// Re-export the arbitrary-precision integer type for consumers.
pub use num_bigint::BigInt;

pub use errors::{
    ambiguous_pairing, binary_type_mismatch, coercion_failure, cross_table_operator,
    division_by_zero, invalid_binary_op_for, invalid_operator_name, invalid_unary_op_for,
    no_binary_overload, no_unary_overload, not_overloadable, operator_not_open,
    operator_not_permitted, EvalError, EvalErrorKind, EvalResult,
};
pub use registry::{CrossTableSpec, OperatorSetSpec, OverloadRegistry};
pub use sets::{OperatorSet, SharedSet, BUILTIN_SET_COUNT};
pub use table::{OperatorFn, OperatorTable};
pub use value::{CoerceFn, Heap, RecordValue, Value};
