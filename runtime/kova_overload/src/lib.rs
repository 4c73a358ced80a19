//! Kova Overload - Operator overload dispatch engine.
//!
//! This crate decides, for two runtime values of possibly-different
//! overloadable types, which implementation of an operator to run — and
//! whether the call is permitted in the current lexical region.
//!
//! # Architecture
//!
//! - `classify` / `to_primitive`: pure operand classification and the
//!   primitive-reduction chain
//! - `evaluate_binary_primitive` / `evaluate_unary_primitive`: built-in
//!   semantics for ordinary values, the scope-independent fast path
//! - `resolve_binary` / `resolve_unary`: the dispatch resolver, including
//!   the additive, equality and relational pre-passes and the
//!   ordinal-ordered cross-type lookup
//! - `PermissionScope` / `declare_scope`: the lexically nested opt-in
//!   mechanism for overloaded dispatch
//! - `IndexedOverlay`: integer-keyed access routed through a type's
//!   indexed-get/set entries
//! - `OverloadEngine`: the facade the compiler's lowering pass calls into
//!
//! # Re-exports
//!
//! Value and registry types from `kova_values` and the operator vocabulary
//! from `kova_ir` are re-exported for convenience.

mod classify;
mod dispatch;
mod engine;
pub mod errors;
mod indexed;
mod primitives;
mod scope;

#[cfg(test)]
mod tests;

// Re-export the operator vocabulary
pub use kova_ir::{BinaryOp, Operator, OperatorMask, UnaryOp};

// Re-export value and registry types from kova_values
pub use kova_values::{
    BigInt, CoerceFn, CrossTableSpec, EvalError, EvalErrorKind, EvalResult, Heap, OperatorFn,
    OperatorSet, OperatorSetSpec, OperatorTable, OverloadRegistry, RecordValue, SharedSet, Value,
    BUILTIN_SET_COUNT,
};

pub use classify::{classify, to_primitive, Operand};
pub use dispatch::{resolve_binary, resolve_unary};
pub use engine::OverloadEngine;
pub use indexed::IndexedOverlay;
pub use primitives::{evaluate_binary_primitive, evaluate_unary_primitive};
pub use scope::{declare_scope, PermissionScope};
