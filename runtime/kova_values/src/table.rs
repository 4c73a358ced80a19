//! Immutable operator tables.
//!
//! A table is a fixed array of `Operator::COUNT` slots indexed by
//! `Operator::index()` — the operator vocabulary is closed, so lookup is
//! one array read with no hashing. Tables are populated during
//! registration and never change afterwards.

use std::fmt;
use std::sync::Arc;

use kova_ir::{Operator, OperatorMask};

use crate::errors::EvalResult;
use crate::value::Value;

/// An operator implementation.
///
/// Invoked with the operands in original expression order: `[left,
/// right]` for binary operators, `[operand]` for unary ones, `[target,
/// index]` for indexed get and `[target, index, value]` for indexed set.
pub type OperatorFn = Arc<dyn Fn(&[Value]) -> EvalResult + Send + Sync>;

/// Immutable mapping from operator to implementation.
pub struct OperatorTable {
    entries: [Option<OperatorFn>; Operator::COUNT],
}

impl OperatorTable {
    /// Create an empty table. Crate-private: tables are only built by the
    /// registry during registration.
    pub(crate) fn new() -> Self {
        Self {
            entries: std::array::from_fn(|_| None),
        }
    }

    /// Install an entry. Later insertions for the same operator win,
    /// matching the last-wins behavior of the declaration surface.
    pub(crate) fn insert(&mut self, op: Operator, entry: OperatorFn) {
        self.entries[op.index()] = Some(entry);
    }

    /// Look up the entry for an operator.
    #[inline]
    pub fn get(&self, op: Operator) -> Option<&OperatorFn> {
        self.entries[op.index()].as_ref()
    }

    /// Whether an entry exists for an operator.
    #[inline]
    pub fn defines(&self, op: Operator) -> bool {
        self.entries[op.index()].is_some()
    }

    /// The set of operators this table defines.
    pub fn defined_operators(&self) -> OperatorMask {
        Operator::ALL
            .into_iter()
            .filter(|op| self.defines(*op))
            .collect()
    }
}

impl fmt::Debug for OperatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperatorTable({:?})", self.defined_operators())
    }
}
