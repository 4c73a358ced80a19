//! Binary and Unary Operators
//!
//! All operator identities used by the overload dispatch engine.
//!
//! The surface enums (`BinaryOp`, `UnaryOp`) are what the lowering pass
//! emits at rewritten call sites. `Operator` is the canonical table key:
//! derived comparisons (`!=`, `>`, `<=`, `>=`) have no table slot of their
//! own and collapse onto `Eq` and `Lt` via `table_operator()`.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,

    // Equality
    Eq,
    NotEq,

    // Relational
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            // Arithmetic
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            // Bitwise
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            // Equality
            Self::Eq => "==",
            Self::NotEq => "!=",
            // Relational
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }

    /// Returns the canonical table operator this surface operator resolves
    /// through.
    ///
    /// `!=` negates an `Eq` dispatch; the relational family rides a single
    /// `Lt` dispatch with operand swaps and negation handled by the
    /// resolver.
    pub const fn table_operator(self) -> Operator {
        match self {
            Self::Add => Operator::Add,
            Self::Sub => Operator::Sub,
            Self::Mul => Operator::Mul,
            Self::Div => Operator::Div,
            Self::Mod => Operator::Mod,
            Self::Pow => Operator::Pow,
            Self::BitAnd => Operator::BitAnd,
            Self::BitOr => Operator::BitOr,
            Self::BitXor => Operator::BitXor,
            Self::Shl => Operator::Shl,
            Self::Shr => Operator::Shr,
            Self::UShr => Operator::UShr,
            Self::Eq | Self::NotEq => Operator::Eq,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => Operator::Lt,
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Pos,
    Neg,
    BitNot,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Pos => "+",
            Self::Neg => "-",
            Self::BitNot => "~",
        }
    }

    /// Returns the canonical table operator for this unary operator.
    pub const fn table_operator(self) -> Operator {
        match self {
            Self::Pos => Operator::Pos,
            Self::Neg => Operator::Neg,
            Self::BitNot => Operator::BitNot,
        }
    }
}

/// Canonical table-keyed operators.
///
/// Every operator table is an array of `Operator::COUNT` slots indexed by
/// `Operator::index()`. Registration accepts operator *names* (the sugar
/// layer marshals per-member declarations as strings) and resolves them
/// through `from_symbol`; unknown names are a registration-time error.
///
/// Unary operators use the spelled-out names `pos` and `neg` because the
/// symbols `+` and `-` already name their binary counterparts.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    // Binary arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Binary bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,

    // Canonical comparisons
    Eq,
    Lt,

    // Unary
    Pos,
    Neg,
    BitNot,

    // Indexed access
    IndexGet,
    IndexSet,
}

impl Operator {
    /// Number of canonical operators; the fixed size of every operator
    /// table.
    pub const COUNT: usize = 19;

    /// All canonical operators in table order.
    pub const ALL: [Operator; Self::COUNT] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Pow,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::Shl,
        Self::Shr,
        Self::UShr,
        Self::Eq,
        Self::Lt,
        Self::Pos,
        Self::Neg,
        Self::BitNot,
        Self::IndexGet,
        Self::IndexSet,
    ];

    /// Table slot for this operator.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the registration-surface name of this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Eq => "==",
            Self::Lt => "<",
            Self::Pos => "pos",
            Self::Neg => "neg",
            Self::BitNot => "~",
            Self::IndexGet => "[]",
            Self::IndexSet => "[]=",
        }
    }

    /// Resolve a registration-surface name to its operator.
    ///
    /// Returns `None` for unrecognized names; registration reports those
    /// as `InvalidOperatorName`.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        Self::ALL.iter().copied().find(|op| op.as_symbol() == symbol)
    }

    /// Number of operands the table entry for this operator receives.
    pub const fn arity(self) -> usize {
        match self {
            Self::Pos | Self::Neg | Self::BitNot => 1,
            Self::IndexSet => 3,
            _ => 2,
        }
    }

    /// Whether this operator can appear in a cross-type table.
    ///
    /// Cross-type tables pair two operator sets, so only operators that
    /// dispatch on two operands qualify; unary and indexed operators are
    /// self-table-only.
    pub const fn is_binary_dispatch(self) -> bool {
        !matches!(
            self,
            Self::Pos | Self::Neg | Self::BitNot | Self::IndexGet | Self::IndexSet
        )
    }
}
