//! Arbitrary-precision decimal numbers.
//!
//! A [`BigNumber`] is an integer mantissa with a decimal scale:
//! `value = mantissa * 10^-scale`. Values are kept normalized (no trailing
//! zero digits in the mantissa while `scale > 0`, zero always has scale 0),
//! so the derived `Eq` and `Hash` agree with numeric equality.
//!
//! Addition, subtraction and multiplication are exact. Division, negative
//! powers and the conversions from text or `f64` are the only places where
//! a precision decision is made, and each of them takes it explicitly.

mod parse;

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

pub use parse::ParseBigNumberError;

/// Largest decimal exponent accepted when parsing or scaling.
///
/// Bounds the memory a single literal such as `1e999999999` can demand.
pub const MAX_DECIMAL_EXPONENT: u32 = 100_000;

/// An exact decimal number of unbounded size.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigNumber {
    mantissa: BigInt,
    scale: u32,
}

#[inline]
fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

/// Bring two numbers to a common scale.
fn align(lhs: &BigNumber, rhs: &BigNumber) -> (BigInt, BigInt, u32) {
    match lhs.scale.cmp(&rhs.scale) {
        Ordering::Equal => (lhs.mantissa.clone(), rhs.mantissa.clone(), lhs.scale),
        Ordering::Less => (
            &lhs.mantissa * pow10(rhs.scale - lhs.scale),
            rhs.mantissa.clone(),
            rhs.scale,
        ),
        Ordering::Greater => (
            lhs.mantissa.clone(),
            &rhs.mantissa * pow10(lhs.scale - rhs.scale),
            lhs.scale,
        ),
    }
}

impl BigNumber {
    pub fn zero() -> Self {
        BigNumber {
            mantissa: BigInt::zero(),
            scale: 0,
        }
    }

    pub fn one() -> Self {
        BigNumber {
            mantissa: BigInt::one(),
            scale: 0,
        }
    }

    /// Build `mantissa * 10^-scale`, normalizing the representation.
    pub fn from_parts(mantissa: BigInt, scale: u32) -> Self {
        let mut mantissa = mantissa;
        let mut scale = scale;
        if mantissa.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u8);
        while scale > 0 {
            let (quotient, remainder) = mantissa.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            mantissa = quotient;
            scale -= 1;
        }
        BigNumber { mantissa, scale }
    }

    /// Exact decimal value of the shortest representation of `value`.
    ///
    /// `0.1` becomes exactly `0.1`, not the binary expansion of the double.
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        value.to_string().parse().ok()
    }

    /// Nearest double. Out-of-range magnitudes become infinities.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Integer part, if it fits in an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        self.trunc().mantissa.to_i64()
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        BigNumber {
            mantissa: self.mantissa.abs(),
            scale: self.scale,
        }
    }

    /// Drop the fractional part, rounding toward zero.
    #[must_use]
    pub fn trunc(&self) -> Self {
        if self.scale == 0 {
            return self.clone();
        }
        Self::from_parts(&self.mantissa / pow10(self.scale), 0)
    }

    /// Number of decimal digits between the first and last non-zero digit.
    ///
    /// `1200` has two, `0.0105` has three, zero has none.
    pub fn significant_digits(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        let digits = self.mantissa.magnitude().to_string();
        digits.trim_end_matches('0').len()
    }

    /// Quotient rounded half away from zero to `scale` fractional digits.
    ///
    /// Returns `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self, scale: u32) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let numerator = &self.mantissa * pow10(rhs.scale.checked_add(scale)?);
        let denominator = &rhs.mantissa * pow10(self.scale);
        let (mut quotient, remainder) = numerator.div_rem(&denominator);
        if remainder.abs() * 2u8 >= denominator.abs() {
            if numerator.is_negative() == denominator.is_negative() {
                quotient += BigInt::one();
            } else {
                quotient -= BigInt::one();
            }
        }
        Some(Self::from_parts(quotient, scale))
    }

    /// Exact remainder of truncated division; the sign follows `self`.
    ///
    /// Returns `None` when `rhs` is zero.
    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let (lhs, rhs, scale) = align(self, rhs);
        Some(Self::from_parts(lhs % rhs, scale))
    }

    /// Exact non-negative integer power.
    pub fn powu(&self, exponent: u32) -> Option<Self> {
        let scale = self.scale.checked_mul(exponent)?;
        if scale > MAX_DECIMAL_EXPONENT {
            return None;
        }
        let mantissa = num_traits::pow(self.mantissa.clone(), exponent as usize);
        Some(Self::from_parts(mantissa, scale))
    }

    /// Integer power; negative exponents divide at `scale` fractional digits.
    ///
    /// Returns `None` for a zero base with a negative exponent, or when the
    /// result would exceed [`MAX_DECIMAL_EXPONENT`] digits of scale.
    pub fn checked_powi(&self, exponent: i64, scale: u32) -> Option<Self> {
        let magnitude = u32::try_from(exponent.unsigned_abs()).ok()?;
        let power = self.powu(magnitude)?;
        if exponent >= 0 {
            Some(power)
        } else {
            Self::one().checked_div(&power, scale)
        }
    }
}

impl Default for BigNumber {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for BigNumber {
    fn from(value: i64) -> Self {
        Self::from_parts(BigInt::from(value), 0)
    }
}

impl From<u64> for BigNumber {
    fn from(value: u64) -> Self {
        Self::from_parts(BigInt::from(value), 0)
    }
}

impl From<BigInt> for BigNumber {
    fn from(value: BigInt) -> Self {
        Self::from_parts(value, 0)
    }
}

impl Ord for BigNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.mantissa.cmp(&other.mantissa);
        }
        let (lhs, rhs, _) = align(self, other);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for BigNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &BigNumber {
    type Output = BigNumber;

    fn add(self, rhs: &BigNumber) -> BigNumber {
        let (lhs, rhs, scale) = align(self, rhs);
        BigNumber::from_parts(lhs + rhs, scale)
    }
}

impl Sub for &BigNumber {
    type Output = BigNumber;

    fn sub(self, rhs: &BigNumber) -> BigNumber {
        let (lhs, rhs, scale) = align(self, rhs);
        BigNumber::from_parts(lhs - rhs, scale)
    }
}

impl Mul for &BigNumber {
    type Output = BigNumber;

    fn mul(self, rhs: &BigNumber) -> BigNumber {
        BigNumber::from_parts(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale)
    }
}

impl Neg for &BigNumber {
    type Output = BigNumber;

    fn neg(self) -> BigNumber {
        BigNumber {
            mantissa: -&self.mantissa,
            scale: self.scale,
        }
    }
}

macro_rules! forward_owned {
    ($($trait:ident::$method:ident),*) => {
        $(
            impl $trait for BigNumber {
                type Output = BigNumber;

                #[inline]
                fn $method(self, rhs: BigNumber) -> BigNumber {
                    (&self).$method(&rhs)
                }
            }
        )*
    };
}

forward_owned!(Add::add, Sub::sub, Mul::mul);

impl Neg for BigNumber {
    type Output = BigNumber;

    fn neg(self) -> BigNumber {
        -&self
    }
}

/// Plain positional notation, never exponent form: `-0.0015`, `12300`.
impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.magnitude().to_string();
        if self.mantissa.is_negative() {
            f.write_str("-")?;
        }
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{int_part}.{frac_part}")
        } else {
            write!(f, "0.{}{digits}", "0".repeat(scale - digits.len()))
        }
    }
}

impl fmt::Debug for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigNumber({self})")
    }
}
