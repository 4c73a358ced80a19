//! Error types for overload registration and dispatch.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` provides typed error categories for diagnostic
//! conversion. Factory functions (e.g., `division_by_zero()`) are the
//! public construction API; they populate both `kind` and `message`.
//!
//! Every failure in the engine is a synchronous `Err` value. Nothing is
//! silently defaulted: ambiguous or missing operator definitions must
//! always be observable. The single documented exception lives in the
//! resolver's equality pre-pass, which maps a missing overload to `false`
//! instead of surfacing `NoOverloadDefined`.

use std::fmt;

use crate::value::Value;

/// Result of a dispatch or registration step that produces a value.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category for structured diagnostics.
///
/// Each variant carries the data needed to render the error and to map it
/// to a stable `E7xxx` code for the compiler's diagnostic layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Registration
    /// An operator table used a name that is not an overloadable operator,
    /// or a self-table-only operator appeared in a cross-type table.
    InvalidOperatorName {
        name: String,
        cross_table: bool,
    },
    /// A cross-type table named both partner positions, or neither.
    AmbiguousPairing,
    /// A cross-type entry targets an operator the partner type did not
    /// declare open.
    OperatorNotOpen {
        op: &'static str,
        type_name: String,
    },

    // Scope construction
    /// A scope grant named a value that carries no operator set.
    NotOverloadable {
        type_name: String,
    },

    // Dispatch
    /// An operand's type is not enabled in the active permission scope.
    OperatorNotPermitted {
        op: &'static str,
        type_name: String,
    },
    /// No table entry exists for the resolved operand pair.
    NoOverloadDefined {
        op: &'static str,
        operands: String,
    },
    /// Primitive reduction exhausted its accessor chain.
    CoercionFailure {
        type_name: String,
    },

    // Built-in primitive semantics
    DivisionByZero,
    InvalidBinaryOp {
        type_name: String,
        op: &'static str,
    },
    InvalidUnaryOp {
        type_name: String,
        op: &'static str,
    },
    BinaryTypeMismatch {
        left: String,
        right: String,
    },

    /// Catch-all for errors not categorized into structured kinds.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Registration
            Self::InvalidOperatorName { name, cross_table } => {
                if *cross_table {
                    write!(f, "operator `{name}` cannot appear in a cross-type table")
                } else {
                    write!(f, "`{name}` is not an overloadable operator")
                }
            }
            Self::AmbiguousPairing => {
                write!(
                    f,
                    "a cross-type table must name exactly one partner position (left or right)"
                )
            }
            Self::OperatorNotOpen { op, type_name } => {
                write!(
                    f,
                    "type {type_name} does not declare operator `{op}` open for cross-type definition"
                )
            }

            // Scope construction
            Self::NotOverloadable { type_name } => {
                write!(f, "{type_name} carries no operator set")
            }

            // Dispatch
            Self::OperatorNotPermitted { op, type_name } => {
                write!(
                    f,
                    "operator `{op}` on {type_name} is not permitted in this scope"
                )
            }
            Self::NoOverloadDefined { op, operands } => {
                write!(f, "no overload of `{op}` for {operands}")
            }
            Self::CoercionFailure { type_name } => {
                write!(f, "{type_name} cannot be reduced to a primitive value")
            }

            // Built-in primitive semantics
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::InvalidBinaryOp { type_name, op } => {
                write!(f, "operator `{op}` cannot be applied to {type_name}")
            }
            Self::InvalidUnaryOp { type_name, op } => {
                write!(f, "unary `{op}` cannot be applied to {type_name}")
            }
            Self::BinaryTypeMismatch { left, right } => {
                write!(f, "cannot apply operator to `{left}` and `{right}`")
            }

            // Custom
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

impl EvalErrorKind {
    /// Map this error kind to its stable diagnostic code.
    ///
    /// E70xx: registration, E71xx: scope construction, E72xx: dispatch,
    /// E73xx: coercion, E74xx: primitive semantics, E7999: uncategorized.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidOperatorName { .. } => "E7001",
            Self::AmbiguousPairing => "E7002",
            Self::OperatorNotOpen { .. } => "E7003",
            Self::NotOverloadable { .. } => "E7101",
            Self::OperatorNotPermitted { .. } => "E7201",
            Self::NoOverloadDefined { .. } => "E7202",
            Self::CoercionFailure { .. } => "E7301",
            Self::DivisionByZero => "E7401",
            Self::InvalidBinaryOp { .. } => "E7402",
            Self::InvalidUnaryOp { .. } => "E7403",
            Self::BinaryTypeMismatch { .. } => "E7404",
            Self::Custom { .. } => "E7999",
        }
    }

    /// Produce a concise label for the primary diagnostic span.
    pub const fn primary_label(&self) -> &'static str {
        match self {
            Self::InvalidOperatorName { .. } => "unknown operator name",
            Self::AmbiguousPairing => "ambiguous partner position",
            Self::OperatorNotOpen { .. } => "operator not declared open",
            Self::NotOverloadable { .. } => "not an overloadable type",
            Self::OperatorNotPermitted { .. } => "overload not in scope",
            Self::NoOverloadDefined { .. } => "no overload defined",
            Self::CoercionFailure { .. } => "cannot reduce to a primitive",
            Self::DivisionByZero => "division by zero here",
            Self::InvalidBinaryOp { .. } => "operator not supported",
            Self::InvalidUnaryOp { .. } => "operator not supported",
            Self::BinaryTypeMismatch { .. } => "mismatched operand types",
            Self::Custom { .. } => "runtime error",
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category for diagnostic conversion.
    pub kind: EvalErrorKind,
    /// Human-readable error message.
    ///
    /// For factory-created errors, this equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Prefer a specific factory function when a
    /// structured kind is available.
    pub fn new(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: msg.clone(),
            },
            message: msg,
        }
    }

    /// Create an error from a structured kind.
    ///
    /// The message is computed from the kind's `Display` impl.
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory Functions

/// An operator table used an unrecognized operator name.
#[cold]
pub fn invalid_operator_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperatorName {
        name: name.to_string(),
        cross_table: false,
    })
}

/// A self-table-only operator appeared in a cross-type table.
#[cold]
pub fn cross_table_operator(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperatorName {
        name: name.to_string(),
        cross_table: true,
    })
}

/// A cross-type table named both partner positions, or neither.
#[cold]
pub fn ambiguous_pairing() -> EvalError {
    EvalError::from_kind(EvalErrorKind::AmbiguousPairing)
}

/// A cross-type entry targets an operator the partner did not open.
#[cold]
pub fn operator_not_open(op: &'static str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperatorNotOpen {
        op,
        type_name: type_name.to_string(),
    })
}

/// A scope grant named a value without an operator set.
#[cold]
pub fn not_overloadable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotOverloadable {
        type_name: type_name.to_string(),
    })
}

/// An operand's type is not enabled in the active scope.
#[cold]
pub fn operator_not_permitted(op: &'static str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperatorNotPermitted {
        op,
        type_name: type_name.to_string(),
    })
}

/// No table entry for a binary operand pair.
#[cold]
pub fn no_binary_overload(op: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoOverloadDefined {
        op,
        operands: format!("`{left}` and `{right}`"),
    })
}

/// No table entry for a unary operand.
#[cold]
pub fn no_unary_overload(op: &'static str, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoOverloadDefined {
        op,
        operands: format!("`{operand}`"),
    })
}

/// Primitive reduction exhausted the accessor chain.
#[cold]
pub fn coercion_failure(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CoercionFailure {
        type_name: type_name.to_string(),
    })
}

/// Division (or remainder) by an arbitrary-precision zero.
#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// A built-in type does not support the operator.
#[cold]
pub fn invalid_binary_op_for(type_name: &str, op: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

/// A built-in type does not support the unary operator.
#[cold]
pub fn invalid_unary_op_for(type_name: &str, op: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

/// Two built-in types cannot be combined under any operator.
#[cold]
pub fn binary_type_mismatch(left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cfg(test)]
mod tests;
