//! Operator bit-sets.
//!
//! `OperatorMask` packs one bit per canonical operator. Its main consumer
//! is the open-operator list on an operator set: the set of operators a
//! type pre-declares as eligible for later-defined types to provide
//! cross-type behavior for. Masks are checked at registration time only,
//! never during dispatch.

use bitflags::bitflags;

use crate::Operator;

bitflags! {
    /// A set of canonical operators.
    ///
    /// Bit positions follow `Operator::index()`; the alignment is asserted
    /// by test.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct OperatorMask: u32 {
        const ADD = 1 << 0;
        const SUB = 1 << 1;
        const MUL = 1 << 2;
        const DIV = 1 << 3;
        const MOD = 1 << 4;
        const POW = 1 << 5;
        const BIT_AND = 1 << 6;
        const BIT_OR = 1 << 7;
        const BIT_XOR = 1 << 8;
        const SHL = 1 << 9;
        const SHR = 1 << 10;
        const USHR = 1 << 11;
        const EQ = 1 << 12;
        const LT = 1 << 13;
        const POS = 1 << 14;
        const NEG = 1 << 15;
        const BIT_NOT = 1 << 16;
        const INDEX_GET = 1 << 17;
        const INDEX_SET = 1 << 18;

        /// Operators eligible in cross-type tables.
        const BINARY_DISPATCH = Self::ADD.bits()
            | Self::SUB.bits()
            | Self::MUL.bits()
            | Self::DIV.bits()
            | Self::MOD.bits()
            | Self::POW.bits()
            | Self::BIT_AND.bits()
            | Self::BIT_OR.bits()
            | Self::BIT_XOR.bits()
            | Self::SHL.bits()
            | Self::SHR.bits()
            | Self::USHR.bits()
            | Self::EQ.bits()
            | Self::LT.bits();

        /// Every overloadable operator.
        const ALL_OVERLOADABLE = Self::BINARY_DISPATCH.bits()
            | Self::POS.bits()
            | Self::NEG.bits()
            | Self::BIT_NOT.bits()
            | Self::INDEX_GET.bits()
            | Self::INDEX_SET.bits();
    }
}

impl OperatorMask {
    /// The singleton mask for one operator.
    #[inline]
    pub fn from_operator(op: Operator) -> OperatorMask {
        OperatorMask::from_bits_truncate(1 << op.index())
    }

    /// Whether the mask contains the given operator.
    #[inline]
    pub fn contains_operator(self, op: Operator) -> bool {
        self.contains(Self::from_operator(op))
    }
}

impl FromIterator<Operator> for OperatorMask {
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        iter.into_iter()
            .fold(OperatorMask::empty(), |mask, op| {
                mask | OperatorMask::from_operator(op)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_align_with_operator_indices() {
        for op in Operator::ALL {
            let mask = OperatorMask::from_operator(op);
            assert_eq!(mask.bits(), 1 << op.index(), "misaligned bit for {op:?}");
            assert!(!mask.is_empty());
        }
    }

    #[test]
    fn binary_dispatch_group_matches_predicate() {
        for op in Operator::ALL {
            assert_eq!(
                OperatorMask::BINARY_DISPATCH.contains_operator(op),
                op.is_binary_dispatch(),
                "group mismatch for {op:?}"
            );
        }
    }

    #[test]
    fn all_overloadable_covers_every_operator() {
        for op in Operator::ALL {
            assert!(OperatorMask::ALL_OVERLOADABLE.contains_operator(op));
        }
    }

    #[test]
    fn from_iterator_unions() {
        let mask: OperatorMask = [Operator::Add, Operator::Mul].into_iter().collect();
        assert!(mask.contains_operator(Operator::Add));
        assert!(mask.contains_operator(Operator::Mul));
        assert!(!mask.contains_operator(Operator::Sub));
    }
}
