//! The dispatch resolver.
//!
//! Given an operator and classified operands, locate the applicable table
//! entry — or the built-in fast path — and run it under the active
//! permission scope.
//!
//! # The ordinal tie-break
//!
//! When both operands are overloaded with different operator sets, the
//! *higher*-ordinal set's cross-type table is always the one consulted,
//! keyed by the lower set's ordinal, with the table side chosen by which
//! side of the expression the higher-ordinal operand occupies. The entry
//! is then invoked with the operands in their original left-right order.
//! Construction order is the single total order that breaks symmetry
//! between two independently authored types.
//!
//! # Pre-passes
//!
//! `+`, equality and the relational family have legacy-compatible
//! behavior that short-circuits generic resolution:
//!
//! - additive: a textual operand (after reduction) forces concatenation,
//!   never permission-scoped
//! - equality: nullish mutual equality, boolean numericization, loose
//!   primitive fallback, and a missing overload degrades to `false` —
//!   the one place where "no overload" is not an error
//! - relational: all four operators ride one less-than dispatch, with
//!   operand swaps and negation; textual pairs compare lexicographically

use kova_ir::{BinaryOp, Operator, UnaryOp};
use kova_values::{
    binary_type_mismatch, no_binary_overload, no_unary_overload, operator_not_permitted,
    EvalError, EvalErrorKind, EvalResult, OperatorFn, SharedSet, Value,
};

use crate::classify::{classify, reduce, Operand};
use crate::primitives::{
    evaluate_binary_primitive, evaluate_unary_primitive, loose_equals, to_number,
};
use crate::scope::PermissionScope;

/// Resolve a binary operator application.
#[tracing::instrument(level = "trace", skip(left, right, scope))]
pub fn resolve_binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    scope: &PermissionScope,
) -> EvalResult {
    match op {
        BinaryOp::Add => resolve_additive(left, right, scope),
        BinaryOp::Eq => Ok(Value::Bool(resolve_equality(left, right, scope)?)),
        BinaryOp::NotEq => Ok(Value::Bool(!resolve_equality(left, right, scope)?)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            resolve_relational(op, left, right, scope)
        }
        _ => resolve_arithmetic(op, left, right, scope),
    }
}

/// Resolve a unary operator application.
///
/// The numeric/textual fast path bypasses the scope entirely; overloaded
/// operands require scope membership and a self-table entry.
#[tracing::instrument(level = "trace", skip(operand, scope))]
pub fn resolve_unary(op: UnaryOp, operand: &Value, scope: &PermissionScope) -> EvalResult {
    if let Operand::Overloaded(value, set) = classify(operand) {
        require_permitted(scope, &set, op.as_symbol())?;
        let entry = set
            .self_table()
            .get(op.table_operator())
            .ok_or_else(|| no_unary_overload(op.as_symbol(), &value.type_label()))?;
        return invoke(entry, &[value]);
    }
    let reduced = reduce(classify(operand))?;
    evaluate_unary_primitive(op, reduced.value())
}

// Generic Resolution

/// Arithmetic, bitwise and shift operators: reduce, fast-path when no
/// operand is overloaded, otherwise table dispatch.
fn resolve_arithmetic(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    scope: &PermissionScope,
) -> EvalResult {
    let a = reduce(classify(left))?;
    let b = reduce(classify(right))?;
    if !a.is_overloaded() && !b.is_overloaded() {
        return evaluate_binary_primitive(op, a.value(), b.value());
    }
    dispatch_table(op.table_operator(), a, b, scope, op.as_symbol())
}

/// Table dispatch for one canonical operator over reduced operands, at
/// least one of which is overloaded.
fn dispatch_table(
    op: Operator,
    a: Operand,
    b: Operand,
    scope: &PermissionScope,
    symbol: &'static str,
) -> EvalResult {
    let a = numericize_plain(a);
    let b = numericize_plain(b);

    // Same operator set on both sides: the self table applies.
    if let (Operand::Overloaded(av, aset), Operand::Overloaded(bv, bset)) = (&a, &b) {
        if SharedSet::same_set(aset, bset) {
            require_permitted(scope, aset, symbol)?;
            let entry = aset.self_table().get(op).ok_or_else(|| {
                no_binary_overload(symbol, &av.type_label(), &bv.type_label())
            })?;
            return invoke(entry, &[av.clone(), bv.clone()]);
        }
    }

    // Both ordinals must be enabled, checked independently with the left
    // operand first. Built-in ordinals are implicitly in every scope.
    if let Operand::Overloaded(_, set) = &a {
        require_permitted(scope, set, symbol)?;
    }
    if let Operand::Overloaded(_, set) = &b {
        require_permitted(scope, set, symbol)?;
    }

    let (Some(ao), Some(bo)) = (a.ordinal(), b.ordinal()) else {
        return Err(binary_type_mismatch(
            &a.value().type_label(),
            &b.value().type_label(),
        ));
    };

    // The higher-ordinal set owns the cross-type table, keyed by the
    // lower ordinal; its side of the expression picks left vs right.
    let table = if ao > bo {
        operand_set(&a).and_then(|set| set.left_table(bo))
    } else {
        operand_set(&b).and_then(|set| set.right_table(ao))
    };
    let entry = table.and_then(|t| t.get(op)).ok_or_else(|| {
        no_binary_overload(symbol, &a.value().type_label(), &b.value().type_label())
    })?;
    // Invoke with the operands in original expression order.
    invoke(entry, &[a.value().clone(), b.value().clone()])
}

// Pre-passes

/// The additive operator: a textual operand after reduction forces
/// concatenation of both renderings, before and regardless of scope.
fn resolve_additive(left: &Value, right: &Value, scope: &PermissionScope) -> EvalResult {
    let a = reduce(classify(left))?;
    let b = reduce(classify(right))?;
    if matches!(a, Operand::Textual(_)) || matches!(b, Operand::Textual(_)) {
        return Ok(Value::string(format!("{}{}", a.value(), b.value())));
    }
    if !a.is_overloaded() && !b.is_overloaded() {
        return evaluate_binary_primitive(BinaryOp::Add, a.value(), b.value());
    }
    dispatch_table(Operator::Add, a, b, scope, "+")
}

/// The equality ladder.
///
/// A missing overload yields `false` here instead of failing; this is a
/// deliberate, documented exception confined to equality — every other
/// operator reports `NoOverloadDefined`. Permission failures still
/// surface: only the missing-entry case degrades.
fn resolve_equality(
    left: &Value,
    right: &Value,
    scope: &PermissionScope,
) -> Result<bool, EvalError> {
    let a = classify(left);
    let b = classify(right);

    // Same-classification primitives use built-in equality directly.
    if !a.is_overloaded()
        && !b.is_overloaded()
        && std::mem::discriminant(left) == std::mem::discriminant(right)
    {
        return Ok(left == right);
    }

    // Nullish values equal each other and nothing else.
    if left.is_nullish() || right.is_nullish() {
        return Ok(left.is_nullish() && right.is_nullish());
    }

    // Booleans convert to their numeric equivalent and re-evaluate.
    if matches!(left, Value::Bool(_)) || matches!(right, Value::Bool(_)) {
        return resolve_equality(&numericize_bool(left), &numericize_bool(right), scope);
    }

    // Reduce toward overloaded-or-primitive.
    let a = reduce(a)?;
    let b = reduce(b)?;
    if !a.is_overloaded() && !b.is_overloaded() {
        return Ok(loose_equals(a.value(), b.value()));
    }

    match dispatch_table(Operator::Eq, a, b, scope, "==") {
        Ok(result) => Ok(result.is_truthy()),
        Err(err) if matches!(err.kind, EvalErrorKind::NoOverloadDefined { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

/// The relational family rides a single less-than dispatch: `>` swaps the
/// operand order, `<=` swaps and negates, `>=` negates.
fn resolve_relational(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    scope: &PermissionScope,
) -> EvalResult {
    let a = reduce(classify(left))?;
    let b = reduce(classify(right))?;
    if !a.is_overloaded() && !b.is_overloaded() {
        // Textual pairs compare lexicographically, numeric pairs by the
        // IEEE rules; both live in the primitive evaluator.
        return evaluate_binary_primitive(op, a.value(), b.value());
    }

    let result = match op {
        BinaryOp::Lt => dispatch_table(Operator::Lt, a, b, scope, "<")?.is_truthy(),
        BinaryOp::Gt => dispatch_table(Operator::Lt, b, a, scope, ">")?.is_truthy(),
        BinaryOp::LtEq => !dispatch_table(Operator::Lt, b, a, scope, "<=")?.is_truthy(),
        BinaryOp::GtEq => !dispatch_table(Operator::Lt, a, b, scope, ">=")?.is_truthy(),
        _ => unreachable!("resolve_relational only receives relational operators"),
    };
    Ok(Value::Bool(result))
}

// Helpers

/// Convert a non-overloaded, non-numeric operand (boolean, null,
/// undefined) to its numeric equivalent so it dispatches under the
/// built-in numeric set.
fn numericize_plain(operand: Operand) -> Operand {
    match operand {
        Operand::Plain(v) => match to_number(&v) {
            Some(n) => Operand::Numeric(Value::Number(n)),
            None => Operand::Plain(v),
        },
        other => other,
    }
}

fn numericize_bool(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::Number(if *b { 1.0 } else { 0.0 }),
        other => other.clone(),
    }
}

fn operand_set(operand: &Operand) -> Option<&SharedSet> {
    match operand {
        Operand::Overloaded(_, set) => Some(set),
        _ => None,
    }
}

fn require_permitted(
    scope: &PermissionScope,
    set: &SharedSet,
    op: &'static str,
) -> Result<(), EvalError> {
    if scope.permits(set.ordinal()) {
        Ok(())
    } else {
        Err(operator_not_permitted(op, set.name()))
    }
}

fn invoke(entry: &OperatorFn, args: &[Value]) -> EvalResult {
    (**entry)(args)
}
