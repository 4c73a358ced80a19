//! Engine facade.
//!
//! `OverloadEngine` bundles a registry with the call surface the
//! compiler's lowering pass emits: operator set registration at type
//! definition sites, scope declaration at region entry, and the rewritten
//! operator call shapes. All logic lives in the dedicated modules; the
//! engine is thin delegation around an owned registry.

use kova_ir::{BinaryOp, UnaryOp};
use kova_values::{
    EvalError, EvalResult, OperatorSetSpec, OverloadRegistry, SharedSet, Value,
};

use crate::dispatch::{resolve_binary, resolve_unary};
use crate::indexed::IndexedOverlay;
use crate::scope::{declare_scope, PermissionScope};

/// The operator overload engine: one registry plus the dispatch surface.
pub struct OverloadEngine {
    registry: OverloadRegistry,
}

impl OverloadEngine {
    /// Create an engine with a fresh registry (built-in sets only).
    pub fn new() -> Self {
        Self {
            registry: OverloadRegistry::new(),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &OverloadRegistry {
        &self.registry
    }

    /// Register an operator set at a type definition site.
    pub fn register_operator_set(&self, spec: OperatorSetSpec) -> Result<SharedSet, EvalError> {
        self.registry.register(spec)
    }

    /// Construct the scope for a region declaring operator usage.
    pub fn declare_scope(
        &self,
        parent: Option<&PermissionScope>,
        granted: &[Value],
    ) -> Result<PermissionScope, EvalError> {
        declare_scope(parent, granted)
    }

    /// Rewritten binary operator call site.
    pub fn binary_op(
        &self,
        op: BinaryOp,
        left: &Value,
        right: &Value,
        scope: &PermissionScope,
    ) -> EvalResult {
        resolve_binary(op, left, right, scope)
    }

    /// Rewritten unary operator call site.
    pub fn unary_op(&self, op: UnaryOp, operand: &Value, scope: &PermissionScope) -> EvalResult {
        resolve_unary(op, operand, scope)
    }

    /// Rewritten indexed read.
    ///
    /// Values carrying indexed operator entries go through the overlay;
    /// ordinary records read plain field storage. Indexed access is never
    /// permission-scoped.
    pub fn indexed_get(&self, target: &Value, key: &Value) -> EvalResult {
        if IndexedOverlay::applies_to(target) {
            return IndexedOverlay::new(target)?.get(key);
        }
        match target {
            Value::Record(record) => Ok(record
                .field(&key.to_string())
                .unwrap_or(Value::Undefined)),
            other => Err(EvalError::new(format!(
                "cannot index {}",
                other.type_label()
            ))),
        }
    }

    /// Rewritten indexed write.
    pub fn indexed_set(&self, target: &Value, key: &Value, value: Value) -> Result<(), EvalError> {
        if IndexedOverlay::applies_to(target) {
            return IndexedOverlay::new(target)?.set(key, value);
        }
        match target {
            Value::Record(record) => {
                record.set_field(key.to_string(), value);
                Ok(())
            }
            other => Err(EvalError::new(format!(
                "cannot index {}",
                other.type_label()
            ))),
        }
    }
}

impl Default for OverloadEngine {
    fn default() -> Self {
        Self::new()
    }
}
