//! Operator sets.
//!
//! One `OperatorSet` exists per overloadable type, created exactly once by
//! the registry and never mutated. The set's ordinal is its position in
//! registration order; it is the total order that breaks dispatch symmetry
//! between two independently authored types.
//!
//! Cross-type tables live only on the higher-ordinal set of a pair, keyed
//! by the lower set's ordinal. That invariant holds by construction:
//! registering a cross-type table requires a handle to the partner, so the
//! partner always has the lower ordinal.

use std::fmt;
use std::sync::Arc;

use kova_ir::{Operator, OperatorMask};
use rustc_hash::FxHashMap;

use crate::table::OperatorTable;

/// Number of built-in operator sets (`Number` 0, `BigInt` 1, `String` 2).
///
/// Ordinals below this bound are implicitly permitted by every scope:
/// overloading never has to be granted for built-in types.
pub const BUILTIN_SET_COUNT: u32 = 3;

/// The immutable operator record of one overloadable type.
#[derive(Debug)]
pub struct OperatorSet {
    ordinal: u32,
    name: String,
    self_table: OperatorTable,
    /// Tables used when this set is the left operand, keyed by the right
    /// operand's (strictly lower) ordinal.
    left_tables: FxHashMap<u32, OperatorTable>,
    /// Symmetric case with this set on the right.
    right_tables: FxHashMap<u32, OperatorTable>,
    /// Operators a future higher-ordinal type may define cross-type
    /// entries for. Enforced at registration time, not at dispatch time.
    open_operators: OperatorMask,
}

impl OperatorSet {
    pub(crate) fn new(
        ordinal: u32,
        name: String,
        self_table: OperatorTable,
        left_tables: FxHashMap<u32, OperatorTable>,
        right_tables: FxHashMap<u32, OperatorTable>,
        open_operators: OperatorMask,
    ) -> Self {
        Self {
            ordinal,
            name,
            self_table,
            left_tables,
            right_tables,
            open_operators,
        }
    }

    /// Registration-order ordinal; the dispatch tie-break key.
    #[inline]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Diagnostic name supplied at the definition site.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries used when both operands share this set.
    pub fn self_table(&self) -> &OperatorTable {
        &self.self_table
    }

    /// Cross-type table with this set on the left and the given
    /// lower-ordinal set on the right.
    pub fn left_table(&self, lower_ordinal: u32) -> Option<&OperatorTable> {
        self.left_tables.get(&lower_ordinal)
    }

    /// Cross-type table with this set on the right and the given
    /// lower-ordinal set on the left.
    pub fn right_table(&self, lower_ordinal: u32) -> Option<&OperatorTable> {
        self.right_tables.get(&lower_ordinal)
    }

    /// Operators open for cross-type definition by later types.
    pub fn open_operators(&self) -> OperatorMask {
        self.open_operators
    }

    /// Whether a later type may define a cross-type entry for `op`.
    #[inline]
    pub fn is_open(&self, op: Operator) -> bool {
        self.open_operators.contains_operator(op)
    }

    /// Whether this is one of the fixed built-in sets.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.ordinal < BUILTIN_SET_COUNT
    }
}

/// Shared handle to an operator set.
///
/// Uses `Arc` internally; the wrapped set is immutable after creation, so
/// handles are freely shared across threads.
pub struct SharedSet(Arc<OperatorSet>);

impl SharedSet {
    pub(crate) fn new(set: OperatorSet) -> Self {
        SharedSet(Arc::new(set))
    }

    /// Whether two handles refer to the same operator set.
    pub fn same_set(a: &SharedSet, b: &SharedSet) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Clone for SharedSet {
    fn clone(&self) -> Self {
        SharedSet(Arc::clone(&self.0))
    }
}

impl std::ops::Deref for SharedSet {
    type Target = OperatorSet;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSet({} #{})", self.name(), self.ordinal())
    }
}
