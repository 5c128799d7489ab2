//! Errors reported by the checked value operations.
//!
//! Operator syntax (`a + b`, `a / b`, ...) never fails: it falls back to a
//! neutral result. The checked entry points ([`evaluate_binary`],
//! [`evaluate_unary`], indexed reads, [`parse_number`]) report why instead.
//!
//! [`evaluate_binary`]: crate::evaluate_binary
//! [`evaluate_unary`]: crate::evaluate_unary
//! [`parse_number`]: crate::parse_number

use dynval_decimal::ParseBigNumberError;

use crate::operators::BinaryOp;
use crate::unary_operators::UnaryOp;
use crate::value::{Value, ValueType};

/// Result of a checked value operation.
pub type ValueResult<T = Value> = Result<T, ValueError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("cannot apply `{}` to {left} and {right}", .op.as_symbol())]
    TypeMismatch {
        op: BinaryOp,
        left: ValueType,
        right: ValueType,
    },

    #[error("cannot apply unary `{}` to {operand}", .op.as_symbol())]
    InvalidUnaryOp { op: UnaryOp, operand: ValueType },

    #[error("`{}` has no finite result", .op.as_symbol())]
    NonFinite { op: BinaryOp },

    #[error("exponent {exponent} is too large")]
    ExponentTooLarge { exponent: String },

    #[error("shift amount {amount} is outside 0..64")]
    ShiftOutOfRange { amount: i64 },

    #[error("cannot repeat text {count} times")]
    RepeatTooLarge { count: i64 },

    #[error("invalid number: {0}")]
    InvalidNumber(#[from] ParseBigNumberError),
}

#[cold]
pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> ValueError {
    ValueError::IndexOutOfBounds { index, len }
}

#[cold]
pub(crate) fn type_mismatch(op: BinaryOp, left: &Value, right: &Value) -> ValueError {
    ValueError::TypeMismatch {
        op,
        left: left.value_type(),
        right: right.value_type(),
    }
}
