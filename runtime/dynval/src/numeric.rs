//! Numeric fast path and precision promotion.
//!
//! Arithmetic on two `Number`s runs on `f64` as long as the result is
//! certain to be exact. Before computing, the operands' decimal digit spans
//! are checked against [`NumericPolicy`]; after computing, the result's own
//! digit count is checked. If either check fails the operation is redone on
//! [`BigNumber`]s built from the operands' shortest decimal forms, so
//! `0.1 + 0.2` is exactly `0.3`.
//!
//! Once a value is a `BigNumber` it stays one: any operation with a
//! `BigNumber` operand is computed exactly and yields a `BigNumber`. The
//! exception is a NaN or infinite `Number` operand, which has no exact form,
//! so `inf + big` is `inf` just like `inf + 1`.

use std::borrow::Cow;
use std::cmp::Ordering;

use dynval_decimal::BigNumber;

use crate::errors::{ValueError, ValueResult};
use crate::operators::BinaryOp;
use crate::value::Value;

/// Thresholds that decide when the `f64` fast path is trusted, plus the
/// size limits of exact and text results.
///
/// Digit counts are *significant* decimal digits: the span from the first
/// to the last non-zero digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericPolicy {
    /// An operand of `/` or `pow` with more digits than this is promoted.
    pub operand_digits: u32,
    /// Bound on the digits an exact `+`, `-` or `*` result may need.
    pub combined_digits: u32,
    /// A fast-path result with more digits than this is recomputed exactly.
    pub fast_path_digits: u32,
    /// Fractional digits kept by exact division and negative powers.
    pub division_scale: u32,
    /// Largest exponent magnitude `pow` computes exactly.
    pub max_exponent: u32,
    /// Longest text, in bytes, that `text * n` may produce.
    pub max_text_len: usize,
}

impl NumericPolicy {
    pub const DEFAULT: Self = NumericPolicy {
        operand_digits: 8,
        combined_digits: 14,
        fast_path_digits: 15,
        division_scale: 32,
        max_exponent: 4096,
        max_text_len: 1 << 28,
    };

    #[must_use]
    pub const fn with_combined_digits(mut self, digits: u32) -> Self {
        self.combined_digits = digits;
        self
    }

    #[must_use]
    pub const fn with_division_scale(mut self, scale: u32) -> Self {
        self.division_scale = scale;
        self
    }

    #[must_use]
    pub const fn with_max_exponent(mut self, max_exponent: u32) -> Self {
        self.max_exponent = max_exponent;
        self
    }

    #[must_use]
    pub const fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }

    /// Whether a fast-path result can be kept as a `Number`.
    fn keeps(&self, result: f64) -> bool {
        result.is_finite() && digits(DigitSpan::of(result)) <= self.fast_path_digits
    }
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Borrowed view of a numeric value in either representation.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Num<'a> {
    Small(f64),
    Big(&'a BigNumber),
}

impl<'a> Num<'a> {
    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Num::Small(n) => n,
            Num::Big(n) => n.to_f64(),
        }
    }

    fn is_nan(self) -> bool {
        matches!(self, Num::Small(n) if n.is_nan())
    }

    /// Exact form; `None` for NaN and infinities.
    fn to_big(self) -> Option<Cow<'a, BigNumber>> {
        match self {
            Num::Small(n) => BigNumber::from_f64(n).map(Cow::Owned),
            Num::Big(n) => Some(Cow::Borrowed(n)),
        }
    }
}

/// Exact comparison across representations. NaN equals only NaN.
pub(crate) fn compare(lhs: Num<'_>, rhs: Num<'_>) -> Option<Ordering> {
    match (lhs, rhs) {
        (Num::Small(a), Num::Small(b)) if a.is_nan() && b.is_nan() => Some(Ordering::Equal),
        (Num::Small(a), Num::Small(b)) => a.partial_cmp(&b),
        (Num::Big(a), Num::Big(b)) => Some(a.cmp(b)),
        (Num::Small(a), Num::Big(b)) => compare_mixed(a, b),
        (Num::Big(a), Num::Small(b)) => compare_mixed(b, a).map(Ordering::reverse),
    }
}

fn compare_mixed(small: f64, big: &BigNumber) -> Option<Ordering> {
    if small.is_nan() {
        return None;
    }
    match BigNumber::from_f64(small) {
        Some(exact) => Some(exact.cmp(big)),
        None if small > 0.0 => Some(Ordering::Greater),
        None => Some(Ordering::Less),
    }
}

/// Total order used by numeric sorting: NaN sorts after every number.
pub(crate) fn total_cmp(lhs: Num<'_>, rhs: Num<'_>) -> Ordering {
    match (lhs.is_nan(), rhs.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare(lhs, rhs).unwrap_or(Ordering::Equal),
    }
}

/// The arithmetic subset of [`BinaryOp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Arith {
    pub(crate) fn from_op(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::Add => Some(Arith::Add),
            BinaryOp::Sub => Some(Arith::Sub),
            BinaryOp::Mul => Some(Arith::Mul),
            BinaryOp::Div => Some(Arith::Div),
            BinaryOp::Mod => Some(Arith::Rem),
            BinaryOp::Pow => Some(Arith::Pow),
            _ => None,
        }
    }

    pub(crate) fn op(self) -> BinaryOp {
        match self {
            Arith::Add => BinaryOp::Add,
            Arith::Sub => BinaryOp::Sub,
            Arith::Mul => BinaryOp::Mul,
            Arith::Div => BinaryOp::Div,
            Arith::Rem => BinaryOp::Mod,
            Arith::Pow => BinaryOp::Pow,
        }
    }
}

/// Decimal positions of the most and least significant non-zero digits of
/// a finite, non-zero number: `123.45` spans `high = 3`, `low = -2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DigitSpan {
    high: i32,
    low: i32,
}

impl DigitSpan {
    pub(crate) fn of(value: f64) -> Option<Self> {
        if value == 0.0 || !value.is_finite() {
            return None;
        }
        let magnitude = value.abs();
        if magnitude.fract() == 0.0 && magnitude < 1e15 {
            return Some(Self::of_integer(magnitude as u64));
        }
        Some(Self::of_decimal(&magnitude.to_string()))
    }

    fn of_integer(mut n: u64) -> Self {
        let mut low = 0;
        while n % 10 == 0 {
            n /= 10;
            low += 1;
        }
        let mut high = low;
        while n > 0 {
            n /= 10;
            high += 1;
        }
        DigitSpan { high, low }
    }

    fn of_decimal(text: &str) -> Self {
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
        let int_part = int_part.trim_start_matches('0');
        let high = if int_part.is_empty() {
            -((frac_part.len() - frac_part.trim_start_matches('0').len()) as i32)
        } else {
            int_part.len() as i32
        };
        let low = if frac_part.is_empty() {
            (int_part.len() - int_part.trim_end_matches('0').len()) as i32
        } else {
            -(frac_part.len() as i32)
        };
        DigitSpan { high, low }
    }

    pub(crate) fn significant(self) -> u32 {
        (self.high - self.low).unsigned_abs()
    }
}

fn digits(span: Option<DigitSpan>) -> u32 {
    span.map_or(0, DigitSpan::significant)
}

/// Whether the operands alone show that `f64` could lose digits.
fn outgrows_fast_path(op: Arith, a: f64, b: f64, policy: &NumericPolicy) -> bool {
    let (span_a, span_b) = (DigitSpan::of(a), DigitSpan::of(b));
    match op {
        Arith::Add | Arith::Sub => match (span_a, span_b) {
            (Some(x), Some(y)) => {
                let width = x.high.max(y.high) - x.low.min(y.low) + 1;
                width > policy.combined_digits as i32
            }
            _ => false,
        },
        Arith::Mul => digits(span_a) + digits(span_b) > policy.combined_digits,
        Arith::Div => {
            digits(span_a) > policy.operand_digits || digits(span_b) > policy.operand_digits
        }
        Arith::Rem => false,
        Arith::Pow => {
            digits(span_a) > policy.operand_digits
                || f64::from(digits(span_a)) * b.abs() > f64::from(policy.combined_digits)
        }
    }
}

/// Evaluate an arithmetic operator on two numeric operands.
pub(crate) fn arith(op: Arith, lhs: Num<'_>, rhs: Num<'_>, policy: &NumericPolicy) -> ValueResult {
    if let (Num::Small(a), Num::Small(b)) = (lhs, rhs) {
        return fast_arith(op, a, b, policy);
    }
    // NaN and infinities have no exact form; they stay on `f64` as they do
    // against a `Number`.
    let (Some(a), Some(b)) = (lhs.to_big(), rhs.to_big()) else {
        return fast_arith(op, lhs.to_f64(), rhs.to_f64(), policy);
    };
    exact_arith(op, &a, &b, policy)
}

fn fast_arith(op: Arith, a: f64, b: f64, policy: &NumericPolicy) -> ValueResult {
    match op {
        Arith::Div if b == 0.0 => return Err(ValueError::DivisionByZero),
        Arith::Rem if b == 0.0 => return Err(ValueError::ModuloByZero),
        Arith::Pow if b.fract() != 0.0 || b.abs() > f64::from(policy.max_exponent) => {
            return inexact_pow(a, b, policy);
        }
        _ => {}
    }

    let finite = a.is_finite() && b.is_finite();
    if finite && outgrows_fast_path(op, a, b, policy) {
        return promote(op, a, b, policy);
    }
    let result = match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => a / b,
        Arith::Rem => a % b,
        Arith::Pow => a.powi(b as i32),
    };
    if !finite || policy.keeps(result) {
        Ok(Value::Number(result))
    } else {
        promote(op, a, b, policy)
    }
}

/// Fractional or out-of-range exponents have no exact form; `powf` it is.
fn inexact_pow(base: f64, exponent: f64, policy: &NumericPolicy) -> ValueResult {
    let result = base.powf(exponent);
    if result.is_finite() {
        Ok(Value::Number(result))
    } else if exponent.fract() == 0.0 && exponent.abs() > f64::from(policy.max_exponent) {
        Err(ValueError::ExponentTooLarge {
            exponent: exponent.to_string(),
        })
    } else {
        Err(ValueError::NonFinite { op: BinaryOp::Pow })
    }
}

#[cold]
fn promote(op: Arith, a: f64, b: f64, policy: &NumericPolicy) -> ValueResult {
    let (Some(x), Some(y)) = (BigNumber::from_f64(a), BigNumber::from_f64(b)) else {
        return Err(ValueError::NonFinite { op: op.op() });
    };
    tracing::debug!(
        op = op.op().as_symbol(),
        lhs = a,
        rhs = b,
        "promoting to BigNumber"
    );
    exact_arith(op, &x, &y, policy)
}

fn exact_arith(op: Arith, a: &BigNumber, b: &BigNumber, policy: &NumericPolicy) -> ValueResult {
    match op {
        Arith::Add => Ok(Value::big(a + b)),
        Arith::Sub => Ok(Value::big(a - b)),
        Arith::Mul => Ok(Value::big(a * b)),
        Arith::Div => a
            .checked_div(b, policy.division_scale)
            .map(Value::big)
            .ok_or(ValueError::DivisionByZero),
        Arith::Rem => a
            .checked_rem(b)
            .map(Value::big)
            .ok_or(ValueError::ModuloByZero),
        Arith::Pow => exact_pow(a, b, policy),
    }
}

fn exact_pow(base: &BigNumber, exponent: &BigNumber, policy: &NumericPolicy) -> ValueResult {
    if !exponent.is_integer() {
        let approx = base.to_f64().powf(exponent.to_f64());
        return BigNumber::from_f64(approx)
            .map(Value::big)
            .ok_or(ValueError::NonFinite { op: BinaryOp::Pow });
    }
    let exp = exponent
        .to_i64()
        .filter(|e| e.unsigned_abs() <= u64::from(policy.max_exponent))
        .ok_or_else(|| ValueError::ExponentTooLarge {
            exponent: exponent.to_string(),
        })?;
    if base.is_zero() && exp < 0 {
        return Err(ValueError::DivisionByZero);
    }
    base.checked_powi(exp, policy.division_scale)
        .map(Value::big)
        .ok_or_else(|| ValueError::ExponentTooLarge {
            exponent: exponent.to_string(),
        })
}

/// Pick the representation for an exact number read from text: a `Number`
/// when the double reproduces it exactly within the combined digit bound.
pub(crate) fn from_exact(n: BigNumber, policy: &NumericPolicy) -> Value {
    if n.significant_digits() <= policy.combined_digits as usize {
        let approx = n.to_f64();
        if approx.is_finite() && BigNumber::from_f64(approx).as_ref() == Some(&n) {
            return Value::Number(approx);
        }
    }
    Value::big(n)
}

#[cfg(test)]
mod tests;
