//! Binary operators on values.
//!
//! [`evaluate_binary`] is the checked entry point: it dispatches on the
//! operand tags and reports a [`ValueError`] when an operator has no
//! meaning for them. The `std::ops` impls at the bottom of this module wrap
//! it for ordinary operator syntax and fall back to the neutral `Number(0)`
//! instead of failing.

use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::errors::{type_mismatch, ValueError, ValueResult};
use crate::numeric::{self, Arith, NumericPolicy};
use crate::value::Value;

/// Binary operators understood by [`evaluate_binary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }
}

// Direct Dispatch Function

/// Evaluate a binary operation under the default [`NumericPolicy`].
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> ValueResult {
    evaluate_binary_with(left, right, op, &NumericPolicy::DEFAULT)
}

/// Evaluate a binary operation under an explicit [`NumericPolicy`].
pub fn evaluate_binary_with(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    policy: &NumericPolicy,
) -> ValueResult {
    if let Some(arith) = Arith::from_op(op) {
        return match (left.as_num(), right.as_num()) {
            (Some(a), Some(b)) => numeric::arith(arith, a, b, policy),
            _ => eval_mixed_arith(left, right, arith, policy),
        };
    }
    match op {
        BinaryOp::Eq => Ok(Value::bool(left.equals(right))),
        BinaryOp::NotEq => Ok(Value::bool(!left.equals(right))),
        BinaryOp::Lt => Ok(ordering_is(left, right, Ordering::is_lt)),
        BinaryOp::LtEq => Ok(ordering_is(left, right, Ordering::is_le)),
        BinaryOp::Gt => Ok(ordering_is(left, right, Ordering::is_gt)),
        BinaryOp::GtEq => Ok(ordering_is(left, right, Ordering::is_ge)),
        _ => eval_bitwise(left, right, op),
    }
}

/// Relational operators are `False` for incomparable operands.
fn ordering_is(left: &Value, right: &Value, test: fn(Ordering) -> bool) -> Value {
    Value::bool(left.compare(right).is_some_and(test))
}

// Type-Specific Evaluation Functions

/// Arithmetic where at least one operand is not a number.
fn eval_mixed_arith(
    left: &Value,
    right: &Value,
    op: Arith,
    policy: &NumericPolicy,
) -> ValueResult {
    match (op, left, right) {
        (Arith::Add, Value::Text(_), _) | (Arith::Add, _, Value::Text(_)) => {
            Ok(Value::text(format!("{left}{right}")))
        }
        (Arith::Sub, Value::Text(_), _) | (Arith::Sub, _, Value::Text(_)) => {
            Ok(Value::text(remove_first(&left.to_string(), &right.to_string())))
        }
        (Arith::Mul, Value::Text(text), count) | (Arith::Mul, count, Value::Text(text))
            if count.is_number() =>
        {
            repeat_text(text, count, policy)
        }
        _ => Err(type_mismatch(op.op(), left, right)),
    }
}

fn remove_first(haystack: &str, needle: &str) -> String {
    haystack.replacen(needle, "", 1)
}

/// `text * n`: fractional or negative counts repeat zero times. The result
/// is capped at [`NumericPolicy::max_text_len`] bytes.
fn repeat_text(text: &str, count: &Value, policy: &NumericPolicy) -> ValueResult {
    let whole = match count {
        Value::Number(n) => n.fract() == 0.0,
        Value::BigNumber(n) => n.is_integer(),
        _ => false,
    };
    let times = count.to_long();
    if !whole || times <= 0 || text.is_empty() {
        return Ok(Value::text(String::new()));
    }
    let too_large = || ValueError::RepeatTooLarge { count: times };
    let (n, total) = usize::try_from(times)
        .ok()
        .and_then(|n| Some((n, text.len().checked_mul(n)?)))
        .filter(|&(_, total)| total <= policy.max_text_len)
        .ok_or_else(too_large)?;
    let mut repeated = String::new();
    repeated
        .try_reserve_exact(total)
        .map_err(|_| too_large())?;
    for _ in 0..n {
        repeated.push_str(text);
    }
    Ok(Value::text(repeated))
}

/// Bitwise operators act on the integer view of numeric operands.
fn eval_bitwise(left: &Value, right: &Value, op: BinaryOp) -> ValueResult {
    if !(left.is_number() && right.is_number()) {
        return Err(type_mismatch(op, left, right));
    }
    let (a, b) = (left.to_long(), right.to_long());
    let result = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl | BinaryOp::Shr => {
            let amount = u32::try_from(b)
                .ok()
                .filter(|&n| n < i64::BITS)
                .ok_or(ValueError::ShiftOutOfRange { amount: b })?;
            if op == BinaryOp::Shl {
                a << amount
            } else {
                a >> amount
            }
        }
        _ => return Err(type_mismatch(op, left, right)),
    };
    Ok(Value::int(result))
}

// Compound Assignment

/// Apply `target = target op rhs`, reusing the target's buffer for text
/// concatenation when it is not shared.
pub fn assign_binary(target: &mut Value, rhs: &Value, op: BinaryOp) -> ValueResult<()> {
    if op == BinaryOp::Add {
        if let Some(text) = target.text_mut() {
            text.push_str(&rhs.to_string());
            return Ok(());
        }
    }
    *target = evaluate_binary(target, rhs, op)?;
    Ok(())
}

impl Value {
    /// `self ** exponent`, or `Number(0)` if undefined.
    #[must_use]
    pub fn pow(&self, exponent: impl Into<Value>) -> Value {
        apply_or_neutral(self, &exponent.into(), BinaryOp::Pow)
    }

    pub fn checked_pow(&self, exponent: &Value) -> ValueResult {
        evaluate_binary(self, exponent, BinaryOp::Pow)
    }

    /// Add one in place. Non-numeric values are left unchanged.
    pub fn increment(&mut self) {
        self.step(BinaryOp::Add);
    }

    /// Subtract one in place. Non-numeric values are left unchanged.
    pub fn decrement(&mut self) {
        self.step(BinaryOp::Sub);
    }

    fn step(&mut self, op: BinaryOp) {
        if !self.is_number() {
            tracing::debug!(kind = self.type_name(), "step on non-number ignored");
            return;
        }
        match evaluate_binary(self, &Value::ONE, op) {
            Ok(next) => *self = next,
            Err(err) => tracing::debug!(%err, "step failed"),
        }
    }
}

// Operator Syntax

fn apply_or_neutral(left: &Value, right: &Value, op: BinaryOp) -> Value {
    evaluate_binary(left, right, op).unwrap_or_else(|err| {
        tracing::debug!(%err, op = op.as_symbol(), "operator fell back to zero");
        Value::ZERO
    })
}

fn assign_or_neutral(target: &mut Value, right: &Value, op: BinaryOp) {
    if let Err(err) = assign_binary(target, right, op) {
        tracing::debug!(%err, op = op.as_symbol(), "assignment fell back to zero");
        *target = Value::ZERO;
    }
}

macro_rules! impl_binary_operator {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident => $op:ident;)*) => {
        $(
            impl<R: Into<Value>> $trait<R> for Value {
                type Output = Value;

                fn $method(self, rhs: R) -> Value {
                    apply_or_neutral(&self, &rhs.into(), BinaryOp::$op)
                }
            }

            impl<R: Into<Value>> $trait<R> for &Value {
                type Output = Value;

                fn $method(self, rhs: R) -> Value {
                    apply_or_neutral(self, &rhs.into(), BinaryOp::$op)
                }
            }

            impl<R: Into<Value>> $assign<R> for Value {
                fn $assign_method(&mut self, rhs: R) {
                    assign_or_neutral(self, &rhs.into(), BinaryOp::$op);
                }
            }
        )*
    };
}

impl_binary_operator! {
    Add::add, AddAssign::add_assign => Add;
    Sub::sub, SubAssign::sub_assign => Sub;
    Mul::mul, MulAssign::mul_assign => Mul;
    Div::div, DivAssign::div_assign => Div;
    Rem::rem, RemAssign::rem_assign => Mod;
    BitAnd::bitand, BitAndAssign::bitand_assign => BitAnd;
    BitOr::bitor, BitOrAssign::bitor_assign => BitOr;
    BitXor::bitxor, BitXorAssign::bitxor_assign => BitXor;
    Shl::shl, ShlAssign::shl_assign => Shl;
    Shr::shr, ShrAssign::shr_assign => Shr;
}

#[cfg(test)]
mod tests;
