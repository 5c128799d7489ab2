//! Decimal literal parsing: `[+-]digits[.digits][(e|E)[+-]digits]`.

use std::str::FromStr;

use num_bigint::BigInt;

use crate::{pow10, BigNumber, MAX_DECIMAL_EXPONENT};

/// Why a text could not be read as a decimal number.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseBigNumberError {
    #[error("empty number literal")]
    Empty,
    #[error("number literal has no digits")]
    NoDigits,
    #[error("unexpected {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
    #[error("exponent out of range")]
    ExponentOutOfRange,
}

#[cold]
fn unexpected(text: &str, offset: usize) -> ParseBigNumberError {
    let found = text[offset..].chars().next().unwrap_or('\0');
    ParseBigNumberError::UnexpectedChar { found, offset }
}

fn split_sign(text: &str) -> (bool, &str, usize) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest, 1)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest, 1)
    } else {
        (false, text, 0)
    }
}

fn parse_exponent(text: &str, start: usize) -> Result<i64, ParseBigNumberError> {
    let (negative, digits, sign_len) = split_sign(&text[start..]);
    if digits.is_empty() {
        return Err(ParseBigNumberError::NoDigits);
    }
    let mut value: i64 = 0;
    for (i, byte) in digits.bytes().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(unexpected(text, start + sign_len + i));
        }
        value = value * 10 + i64::from(byte - b'0');
        if value > i64::from(MAX_DECIMAL_EXPONENT) {
            return Err(ParseBigNumberError::ExponentOutOfRange);
        }
    }
    Ok(if negative { -value } else { value })
}

impl FromStr for BigNumber {
    type Err = ParseBigNumberError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(ParseBigNumberError::Empty);
        }
        let (negative, body, sign_len) = split_sign(text);

        let mut digits = String::with_capacity(body.len());
        let mut frac_len: i64 = 0;
        let mut seen_point = false;
        let mut exponent = 0;
        for (i, byte) in body.bytes().enumerate() {
            match byte {
                b'0'..=b'9' => {
                    digits.push(char::from(byte));
                    if seen_point {
                        frac_len += 1;
                    }
                }
                b'.' if !seen_point => seen_point = true,
                b'e' | b'E' => {
                    exponent = parse_exponent(text, sign_len + i + 1)?;
                    break;
                }
                _ => return Err(unexpected(text, sign_len + i)),
            }
        }
        if digits.is_empty() {
            return Err(ParseBigNumberError::NoDigits);
        }

        let mut mantissa =
            BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(ParseBigNumberError::NoDigits)?;
        if negative {
            mantissa = -mantissa;
        }
        let scale = frac_len - exponent;
        if scale >= 0 {
            let scale = u32::try_from(scale).map_err(|_| ParseBigNumberError::ExponentOutOfRange)?;
            Ok(BigNumber::from_parts(mantissa, scale))
        } else {
            let shift = u32::try_from(-scale).map_err(|_| ParseBigNumberError::ExponentOutOfRange)?;
            if shift > MAX_DECIMAL_EXPONENT {
                return Err(ParseBigNumberError::ExponentOutOfRange);
            }
            Ok(BigNumber::from_parts(mantissa * pow10(shift), 0))
        }
    }
}
