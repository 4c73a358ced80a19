//! Built-in operator semantics for ordinary values.
//!
//! Direct enum-based dispatch over the fixed primitive type set; no table
//! lookup and no scope consultation. This is the fast path the resolver
//! takes when neither operand is overloaded, and it must reproduce the
//! host language's primitive semantics exactly so overload-unaware code
//! observes no change in behavior.
//!
//! Numbers follow IEEE 754; bitwise and shift operators fold through the
//! 32-bit integer conversions. Big integers use checked semantics: a zero
//! divisor and a negative exponent are errors rather than wrapped values,
//! and mixing big integers with numbers in arithmetic is rejected.

use std::cmp::Ordering;

use kova_ir::{BinaryOp, UnaryOp};
use kova_values::{
    binary_type_mismatch, division_by_zero, invalid_binary_op_for, invalid_unary_op_for, BigInt,
    EvalError, EvalResult, Heap, Value,
};
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

/// Evaluate a binary operator with built-in semantics.
///
/// Callers have already reduced plain records; a record reaching this
/// function is a type mismatch.
pub fn evaluate_binary_primitive(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    // Null-like and undefined-like values are mutually equal and equal to
    // nothing else; this precedes numeric coercion.
    if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) && (left.is_nullish() || right.is_nullish()) {
        let eq = left.is_nullish() && right.is_nullish();
        let result = if op == BinaryOp::Eq { eq } else { !eq };
        return Ok(Value::Bool(result));
    }

    match (left, right) {
        (Value::Number(x), Value::Number(y)) => eval_number_binary(*x, *y, op),
        (Value::BigInt(x), Value::BigInt(y)) => eval_bigint_binary(x, y, op),
        (Value::Str(x), Value::Str(y)) if has_string_semantics(op) => {
            eval_string_binary(x, y, op)
        }
        (Value::BigInt(_), _) | (_, Value::BigInt(_)) => eval_bigint_mixed_binary(left, right, op),
        _ => eval_coerced_binary(left, right, op),
    }
}

/// Evaluate a unary operator with built-in semantics.
pub fn evaluate_unary_primitive(op: UnaryOp, operand: &Value) -> EvalResult {
    match operand {
        Value::Number(n) => Ok(eval_number_unary(*n, op)),
        Value::BigInt(x) => eval_bigint_unary(x, op),
        other => match to_number(other) {
            Some(n) => Ok(eval_number_unary(n, op)),
            None => Err(invalid_unary_op_for(&other.type_label(), op.as_symbol())),
        },
    }
}

// Numeric Conversion

/// Convert a primitive to a number, following the host conversion rules:
/// booleans become 0/1, null becomes 0, undefined becomes NaN, strings
/// parse (empty string is 0, unparseable is NaN).
///
/// Returns `None` for big integers and records, which never convert
/// implicitly.
pub(crate) fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Undefined => Some(f64::NAN),
        Value::Str(s) => Some(parse_number(s)),
        Value::BigInt(_) | Value::Record(_) => None,
    }
}

/// String-to-number parsing for coercion and loose equality.
pub(crate) fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// 32-bit unsigned fold of a number, per the shift/bitwise conversion
/// rules: non-finite values become 0, the rest truncate modulo 2^32.
pub(crate) fn to_uint32(x: f64) -> u32 {
    if !x.is_finite() || x == 0.0 {
        return 0;
    }
    let m = x.trunc().rem_euclid(4_294_967_296.0);
    // m is integral and in [0, 2^32); the cast is exact.
    m as u32
}

/// 32-bit signed fold of a number.
pub(crate) fn to_int32(x: f64) -> i32 {
    to_uint32(x) as i32
}

// Number Semantics

fn eval_number_binary(x: f64, y: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Number(x + y)),
        BinaryOp::Sub => Ok(Value::Number(x - y)),
        BinaryOp::Mul => Ok(Value::Number(x * y)),
        BinaryOp::Div => Ok(Value::Number(x / y)),
        BinaryOp::Mod => Ok(Value::Number(x % y)),
        BinaryOp::Pow => Ok(Value::Number(x.powf(y))),
        // Use partial_cmp for IEEE 754 compliant comparisons
        // (NaN is unordered, -0.0 == 0.0)
        BinaryOp::Eq => Ok(Value::Bool(x.partial_cmp(&y) == Some(Ordering::Equal))),
        BinaryOp::NotEq => Ok(Value::Bool(x.partial_cmp(&y) != Some(Ordering::Equal))),
        BinaryOp::Lt => Ok(Value::Bool(x.partial_cmp(&y) == Some(Ordering::Less))),
        BinaryOp::LtEq => Ok(Value::Bool(matches!(
            x.partial_cmp(&y),
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::Gt => Ok(Value::Bool(x.partial_cmp(&y) == Some(Ordering::Greater))),
        BinaryOp::GtEq => Ok(Value::Bool(matches!(
            x.partial_cmp(&y),
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        BinaryOp::BitAnd => Ok(Value::Number(f64::from(to_int32(x) & to_int32(y)))),
        BinaryOp::BitOr => Ok(Value::Number(f64::from(to_int32(x) | to_int32(y)))),
        BinaryOp::BitXor => Ok(Value::Number(f64::from(to_int32(x) ^ to_int32(y)))),
        BinaryOp::Shl => Ok(Value::Number(f64::from(
            to_int32(x).wrapping_shl(to_uint32(y) & 31),
        ))),
        BinaryOp::Shr => Ok(Value::Number(f64::from(to_int32(x) >> (to_uint32(y) & 31)))),
        BinaryOp::UShr => Ok(Value::Number(f64::from(
            to_uint32(x) >> (to_uint32(y) & 31),
        ))),
    }
}

fn eval_number_unary(n: f64, op: UnaryOp) -> Value {
    match op {
        UnaryOp::Pos => Value::Number(n),
        UnaryOp::Neg => Value::Number(-n),
        UnaryOp::BitNot => Value::Number(f64::from(!to_int32(n))),
    }
}

/// Coerce both operands to numbers and evaluate.
///
/// This is the catch-all for mixed primitive pairs: `"6" * "2"` is 12,
/// `true + 1` is 2, `undefined < 1` is false (NaN comparison).
fn eval_coerced_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (to_number(left), to_number(right)) {
        (Some(x), Some(y)) => eval_number_binary(x, y, op),
        _ => Err(binary_type_mismatch(
            &left.type_label(),
            &right.type_label(),
        )),
    }
}

// String Semantics

/// Operators with dedicated string-on-string behavior; everything else
/// falls through to numeric coercion.
const fn has_string_semantics(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::Add
            | BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
    )
}

fn eval_string_binary(x: &str, y: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::string(format!("{x}{y}"))),
        BinaryOp::Eq => Ok(Value::Bool(x == y)),
        BinaryOp::NotEq => Ok(Value::Bool(x != y)),
        // Lexicographic comparison
        BinaryOp::Lt => Ok(Value::Bool(x < y)),
        BinaryOp::LtEq => Ok(Value::Bool(x <= y)),
        BinaryOp::Gt => Ok(Value::Bool(x > y)),
        BinaryOp::GtEq => Ok(Value::Bool(x >= y)),
        _ => Err(invalid_binary_op_for("String", op.as_symbol())),
    }
}

// BigInt Semantics

fn eval_bigint_binary(x: &Heap<BigInt>, y: &Heap<BigInt>, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::bigint(&**x + &**y)),
        BinaryOp::Sub => Ok(Value::bigint(&**x - &**y)),
        BinaryOp::Mul => Ok(Value::bigint(&**x * &**y)),
        BinaryOp::Div => {
            if y.is_zero() {
                Err(division_by_zero())
            } else {
                // Truncating division, like the host language.
                Ok(Value::bigint(&**x / &**y))
            }
        }
        BinaryOp::Mod => {
            if y.is_zero() {
                Err(division_by_zero())
            } else {
                Ok(Value::bigint(&**x % &**y))
            }
        }
        BinaryOp::Pow => bigint_pow(x, y),
        BinaryOp::BitAnd => Ok(Value::bigint(&**x & &**y)),
        BinaryOp::BitOr => Ok(Value::bigint(&**x | &**y)),
        BinaryOp::BitXor => Ok(Value::bigint(&**x ^ &**y)),
        BinaryOp::Shl => bigint_shift(x, y, true),
        BinaryOp::Shr => bigint_shift(x, y, false),
        // Big integers have no unsigned representation to shift within.
        BinaryOp::UShr => Err(invalid_binary_op_for("BigInt", ">>>")),
        BinaryOp::Eq => Ok(Value::Bool(x == y)),
        BinaryOp::NotEq => Ok(Value::Bool(x != y)),
        BinaryOp::Lt => Ok(Value::Bool(**x < **y)),
        BinaryOp::LtEq => Ok(Value::Bool(**x <= **y)),
        BinaryOp::Gt => Ok(Value::Bool(**x > **y)),
        BinaryOp::GtEq => Ok(Value::Bool(**x >= **y)),
    }
}

fn eval_bigint_unary(x: &Heap<BigInt>, op: UnaryOp) -> EvalResult {
    match op {
        // Unary plus asserts "number" and never converts a big integer.
        UnaryOp::Pos => Err(invalid_unary_op_for("BigInt", "+")),
        UnaryOp::Neg => Ok(Value::bigint(-&**x)),
        UnaryOp::BitNot => Ok(Value::bigint(-&**x - BigInt::from(1))),
    }
}

fn bigint_pow(x: &Heap<BigInt>, y: &Heap<BigInt>) -> EvalResult {
    if y.is_negative() {
        return Err(EvalError::new("BigInt exponent must be non-negative"));
    }
    let Some(exp) = y.to_u32() else {
        return Err(EvalError::new("BigInt exponent out of range"));
    };
    Ok(Value::bigint(num_traits::Pow::pow(&**x, exp)))
}

fn bigint_shift(x: &Heap<BigInt>, amount: &Heap<BigInt>, left: bool) -> EvalResult {
    let Some(raw) = amount.to_i64() else {
        return Err(EvalError::new("BigInt shift amount out of range"));
    };
    let magnitude = raw.unsigned_abs();
    if magnitude > u64::from(u32::MAX) {
        return Err(EvalError::new("BigInt shift amount out of range"));
    }
    let bits = magnitude as usize;
    // A negative amount shifts the other way; right shifts round toward
    // negative infinity (arithmetic shift).
    let result = if left == (raw >= 0) {
        &**x << bits
    } else {
        &**x >> bits
    };
    Ok(Value::bigint(result))
}

/// Compare a big integer against a number without going through lossy
/// float conversion: split the number into integer and fractional parts
/// and compare exactly.
///
/// `None` means unordered (NaN), which makes every relational operator
/// false.
pub(crate) fn bigint_cmp_number(x: &BigInt, n: f64) -> Option<Ordering> {
    if n.is_nan() {
        return None;
    }
    if n == f64::INFINITY {
        return Some(Ordering::Less);
    }
    if n == f64::NEG_INFINITY {
        return Some(Ordering::Greater);
    }
    let truncated = BigInt::from_f64(n.trunc())?;
    match x.cmp(&truncated) {
        Ordering::Less => Some(Ordering::Less),
        Ordering::Greater => Some(Ordering::Greater),
        Ordering::Equal => {
            if n.fract() > 0.0 {
                Some(Ordering::Less)
            } else if n.fract() < 0.0 {
                Some(Ordering::Greater)
            } else {
                Some(Ordering::Equal)
            }
        }
    }
}

/// Mixed big-integer/other pairs: comparisons are mathematical, strings
/// convert to big integers, and arithmetic mixing is rejected.
fn eval_bigint_mixed_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let comparison = matches!(
        op,
        BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
    );
    if !comparison {
        return Err(binary_type_mismatch(
            &left.type_label(),
            &right.type_label(),
        ));
    }

    let (x, other, bigint_on_left) = match (left, right) {
        (Value::BigInt(x), other) => (x, other, true),
        (other, Value::BigInt(x)) => (x, other, false),
        _ => {
            return Err(binary_type_mismatch(
                &left.type_label(),
                &right.type_label(),
            ))
        }
    };

    // Strings compare as big integers when they parse as one.
    let ordering = match other {
        Value::Str(s) => match s.trim().parse::<BigInt>() {
            Ok(parsed) => Some(x.cmp(&parsed)),
            Err(_) => None,
        },
        _ => match to_number(other) {
            Some(n) => bigint_cmp_number(x, n),
            None => None,
        },
    };
    // The ordering above is bigint-relative-to-other; flip when the big
    // integer sat on the right of the expression.
    let ordering = if bigint_on_left {
        ordering
    } else {
        ordering.map(Ordering::reverse)
    };

    let result = match op {
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::NotEq => ordering != Some(Ordering::Equal),
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        _ => false,
    };
    Ok(Value::Bool(result))
}

/// Loose equality between already-reduced primitives of different
/// variants.
///
/// Same-variant pairs compare directly; numbers and strings compare
/// numerically; big integers compare mathematically against numbers and
/// by parse against strings. Everything else is unequal.
pub(crate) fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(_), Value::Number(_))
        | (Value::Str(_), Value::Str(_))
        | (Value::BigInt(_), Value::BigInt(_))
        | (Value::Bool(_), Value::Bool(_))
        | (Value::Record(_), Value::Record(_)) => left == right,
        (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
            parse_number(s).partial_cmp(n) == Some(Ordering::Equal)
        }
        (Value::BigInt(x), Value::Number(n)) | (Value::Number(n), Value::BigInt(x)) => {
            bigint_cmp_number(x, *n) == Some(Ordering::Equal)
        }
        (Value::BigInt(x), Value::Str(s)) | (Value::Str(s), Value::BigInt(x)) => {
            s.trim().parse::<BigInt>().map(|p| p == **x).unwrap_or(false)
        }
        _ => false,
    }
}
