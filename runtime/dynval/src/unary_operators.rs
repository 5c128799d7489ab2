//! Unary operators on values.
//!
//! Same shape as the binary operators: [`evaluate_unary`] is checked, the
//! `std::ops` impls fall back to a neutral result.

use std::ops::{Neg, Not};

use crate::errors::{ValueError, ValueResult};
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Evaluate a unary operation.
///
/// `Not` is defined for every value: only `False` negates to `True`.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> ValueResult {
    match (value, op) {
        (Value::Number(n), UnaryOp::Neg) => Ok(Value::Number(-n)),
        (Value::BigNumber(n), UnaryOp::Neg) => Ok(Value::big(-&**n)),

        (_, UnaryOp::Not) => Ok(Value::bool(matches!(value, Value::False))),

        (Value::Number(_) | Value::BigNumber(_), UnaryOp::BitNot) => {
            Ok(Value::int(!value.to_long()))
        }

        _ => Err(invalid_unary_op(value, op)),
    }
}

#[cold]
fn invalid_unary_op(value: &Value, op: UnaryOp) -> ValueError {
    ValueError::InvalidUnaryOp {
        op,
        operand: value.value_type(),
    }
}

fn apply_or_neutral(value: &Value, op: UnaryOp) -> Value {
    evaluate_unary(value, op).unwrap_or_else(|err| {
        tracing::debug!(%err, "unary operator fell back to zero");
        Value::ZERO
    })
}

impl Value {
    /// Bitwise complement of the integer view, or `Number(0)`.
    #[must_use]
    pub fn bit_not(&self) -> Value {
        apply_or_neutral(self, UnaryOp::BitNot)
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        apply_or_neutral(self, UnaryOp::Neg)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        -&self
    }
}

impl Not for &Value {
    type Output = Value;

    fn not(self) -> Value {
        apply_or_neutral(self, UnaryOp::Not)
    }
}

impl Not for Value {
    type Output = Value;

    fn not(self) -> Value {
        !&self
    }
}
