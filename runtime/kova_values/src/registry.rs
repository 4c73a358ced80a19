//! Operator set registration.
//!
//! The registry owns the ordinal counter and the three built-in sets. It
//! is an explicit object, injected wherever registration happens — never a
//! process global — so ordinal assignment stays reproducible under test.
//!
//! Registration is all-or-nothing: every table is validated before the
//! ordinal counter moves, so a failed registration consumes no ordinal.

use std::sync::atomic::{AtomicU32, Ordering};

use kova_ir::{Operator, OperatorMask};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{
    ambiguous_pairing, cross_table_operator, invalid_operator_name, operator_not_open, EvalError,
};
use crate::sets::{OperatorSet, SharedSet, BUILTIN_SET_COUNT};
use crate::table::{OperatorFn, OperatorTable};

/// Declaration of a new operator set.
///
/// Entries are keyed by operator *name* because the declaration surface
/// (the sugar layer) collects per-member definitions as strings; names are
/// resolved and validated during registration.
pub struct OperatorSetSpec {
    name: String,
    self_entries: Vec<(String, OperatorFn)>,
    cross: Vec<CrossTableSpec>,
    open_operators: OperatorMask,
}

impl OperatorSetSpec {
    /// Start a declaration for the named type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            self_entries: Vec::new(),
            cross: Vec::new(),
            open_operators: OperatorMask::empty(),
        }
    }

    /// Add a self-table entry, used when both operands share this set.
    pub fn entry(mut self, op_name: impl Into<String>, entry: OperatorFn) -> Self {
        self.self_entries.push((op_name.into(), entry));
        self
    }

    /// Add a cross-type table pairing this set with a lower-ordinal one.
    pub fn cross_table(mut self, spec: CrossTableSpec) -> Self {
        self.cross.push(spec);
        self
    }

    /// Declare operators open for future cross-type definition.
    ///
    /// Defaults to empty: closed to future types.
    pub fn open_operators(mut self, mask: OperatorMask) -> Self {
        self.open_operators = mask;
        self
    }
}

/// Declaration of one cross-type table.
///
/// Exactly one partner position must be named: `left_partner` places the
/// partner as the left operand of every entry (the new type on the
/// right), `right_partner` the reverse. Naming both or neither is the
/// `AmbiguousPairing` registration error.
#[derive(Default)]
pub struct CrossTableSpec {
    left: Option<SharedSet>,
    right: Option<SharedSet>,
    entries: Vec<(String, OperatorFn)>,
}

impl CrossTableSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// The partner appears as the left operand.
    pub fn left_partner(mut self, partner: &SharedSet) -> Self {
        self.left = Some(partner.clone());
        self
    }

    /// The partner appears as the right operand.
    pub fn right_partner(mut self, partner: &SharedSet) -> Self {
        self.right = Some(partner.clone());
        self
    }

    /// Add an entry to this cross-type table.
    pub fn entry(mut self, op_name: impl Into<String>, entry: OperatorFn) -> Self {
        self.entries.push((op_name.into(), entry));
        self
    }
}

/// Roster line for one registered set, kept for diagnostics.
#[derive(Debug, Clone)]
struct SetInfo {
    ordinal: u32,
    name: String,
}

/// Owner of the ordinal counter and the built-in operator sets.
pub struct OverloadRegistry {
    /// Next ordinal. One atomic increment per successful registration;
    /// monotonic, never reused.
    counter: AtomicU32,
    number: SharedSet,
    bigint: SharedSet,
    text: SharedSet,
    roster: RwLock<Vec<SetInfo>>,
}

impl OverloadRegistry {
    /// Create a registry with the three built-in sets pre-assigned the
    /// lowest ordinals: `Number` 0, `BigInt` 1, `String` 2.
    ///
    /// Built-in sets carry empty tables (their semantics are hardwired in
    /// the primitive fast path) and are open to every operator, so any
    /// user type may define interaction with them.
    pub fn new() -> Self {
        let number = Self::builtin(0, "Number");
        let bigint = Self::builtin(1, "BigInt");
        let text = Self::builtin(2, "String");
        let roster = vec![
            SetInfo {
                ordinal: 0,
                name: "Number".to_string(),
            },
            SetInfo {
                ordinal: 1,
                name: "BigInt".to_string(),
            },
            SetInfo {
                ordinal: 2,
                name: "String".to_string(),
            },
        ];
        Self {
            counter: AtomicU32::new(BUILTIN_SET_COUNT),
            number,
            bigint,
            text,
            roster: RwLock::new(roster),
        }
    }

    fn builtin(ordinal: u32, name: &str) -> SharedSet {
        SharedSet::new(OperatorSet::new(
            ordinal,
            name.to_string(),
            OperatorTable::new(),
            FxHashMap::default(),
            FxHashMap::default(),
            OperatorMask::ALL_OVERLOADABLE,
        ))
    }

    /// The built-in numeric set (ordinal 0).
    pub fn number(&self) -> &SharedSet {
        &self.number
    }

    /// The built-in arbitrary-precision integer set (ordinal 1).
    pub fn bigint(&self) -> &SharedSet {
        &self.bigint
    }

    /// The built-in text set (ordinal 2).
    pub fn text(&self) -> &SharedSet {
        &self.text
    }

    /// Diagnostic name of a registered ordinal.
    pub fn set_name(&self, ordinal: u32) -> Option<String> {
        self.roster
            .read()
            .iter()
            .find(|info| info.ordinal == ordinal)
            .map(|info| info.name.clone())
    }

    /// Number of sets registered so far, built-ins included.
    pub fn registered_count(&self) -> usize {
        self.roster.read().len()
    }

    /// Register a new operator set and assign it the next ordinal.
    ///
    /// Validation order: self-table names, then per cross-type table the
    /// pairing, entry names, and partner openness. Any failure aborts the
    /// whole registration before the ordinal counter moves.
    pub fn register(&self, spec: OperatorSetSpec) -> Result<SharedSet, EvalError> {
        let OperatorSetSpec {
            name,
            self_entries,
            cross,
            open_operators,
        } = spec;

        let mut self_table = OperatorTable::new();
        for (op_name, entry) in self_entries {
            let op =
                Operator::from_symbol(&op_name).ok_or_else(|| invalid_operator_name(&op_name))?;
            self_table.insert(op, entry);
        }

        let mut left_tables: FxHashMap<u32, OperatorTable> = FxHashMap::default();
        let mut right_tables: FxHashMap<u32, OperatorTable> = FxHashMap::default();
        for table_spec in cross {
            let (partner, partner_is_left) = match (table_spec.left, table_spec.right) {
                (Some(partner), None) => (partner, true),
                (None, Some(partner)) => (partner, false),
                _ => return Err(ambiguous_pairing()),
            };
            // Partner on the left means the new set sits on the right.
            let target = if partner_is_left {
                &mut right_tables
            } else {
                &mut left_tables
            };
            let table = target
                .entry(partner.ordinal())
                .or_insert_with(OperatorTable::new);
            for (op_name, entry) in table_spec.entries {
                let op = Operator::from_symbol(&op_name)
                    .ok_or_else(|| invalid_operator_name(&op_name))?;
                if !op.is_binary_dispatch() {
                    return Err(cross_table_operator(op.as_symbol()));
                }
                if !partner.is_open(op) {
                    return Err(operator_not_open(op.as_symbol(), partner.name()));
                }
                table.insert(op, entry);
            }
        }

        let ordinal = self.counter.fetch_add(1, Ordering::Relaxed);
        let set = SharedSet::new(OperatorSet::new(
            ordinal,
            name,
            self_table,
            left_tables,
            right_tables,
            open_operators,
        ));
        self.roster.write().push(SetInfo {
            ordinal,
            name: set.name().to_string(),
        });
        tracing::debug!(ordinal, name = set.name(), "registered operator set");
        Ok(set)
    }
}

impl Default for OverloadRegistry {
    fn default() -> Self {
        Self::new()
    }
}
