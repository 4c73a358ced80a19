//! Centralized error constructors for the overload engine.
//!
//! This module provides a single import point for all engine error
//! constructors. Centralizing errors here keeps call sites uniform and
//! makes future message changes a one-location edit.
//!
//! # Usage
//!
//! ```ignore
//! use kova_overload::errors::{operator_not_permitted, division_by_zero};
//! ```

// Re-export EvalError and EvalResult types
pub use kova_values::{EvalError, EvalErrorKind, EvalResult};

// Registration Errors

pub use kova_values::{
    ambiguous_pairing, cross_table_operator, invalid_operator_name, operator_not_open,
};

// Scope and Dispatch Errors

pub use kova_values::{
    coercion_failure, no_binary_overload, no_unary_overload, not_overloadable,
    operator_not_permitted,
};

// Primitive Semantics Errors

pub use kova_values::{
    binary_type_mismatch, division_by_zero, invalid_binary_op_for, invalid_unary_op_for,
};
