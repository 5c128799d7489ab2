//! Conversions between values and Rust types.

use std::convert::Infallible;
use std::str::FromStr;

use dynval_decimal::BigNumber;

use crate::errors::ValueResult;
use crate::numeric::{self, Num, NumericPolicy};
use crate::text::TRIM_CHARS;
use crate::value::{Value, ValueMap};

/// Read a number from text, choosing `Number` or `BigNumber` by precision.
///
/// Surrounding spaces, tabs and newlines are ignored; anything else that is
/// not a decimal literal is an error.
pub fn parse_number(text: &str) -> ValueResult {
    parse_number_with(text, &NumericPolicy::DEFAULT)
}

pub fn parse_number_with(text: &str, policy: &NumericPolicy) -> ValueResult {
    let exact: BigNumber = text.trim_matches(TRIM_CHARS).parse()?;
    Ok(numeric::from_exact(exact, policy))
}

impl Value {
    /// Numeric form of this value.
    ///
    /// Numbers are returned as they are, `True` is `1`, text is parsed.
    /// Everything else, including text that is not a number, is `0`.
    #[must_use]
    pub fn to_number(&self) -> Value {
        self.to_number_with(&NumericPolicy::DEFAULT)
    }

    #[must_use]
    pub fn to_number_with(&self, policy: &NumericPolicy) -> Value {
        match self {
            Value::Number(_) | Value::BigNumber(_) => self.clone(),
            Value::True => Value::ONE,
            Value::Text(s) => parse_number_with(s, policy).unwrap_or_else(|err| {
                tracing::debug!(%err, "text is not a number");
                Value::ZERO
            }),
            Value::Null | Value::False | Value::Array(_) | Value::Map(_) => Value::ZERO,
        }
    }

    /// Whether [`Value::to_number`] reads an actual number from this value.
    pub fn can_num(&self) -> bool {
        match self {
            Value::Number(_) | Value::BigNumber(_) => true,
            Value::Text(s) => parse_number(s).is_ok(),
            _ => false,
        }
    }

    /// Integer view of a numeric value: truncated toward zero, saturating at
    /// the `i64` range. Every other tag is `0`.
    pub fn to_long(&self) -> i64 {
        match self {
            Value::Number(n) => *n as i64,
            Value::BigNumber(n) => n.to_i64().unwrap_or(if n.is_negative() {
                i64::MIN
            } else {
                i64::MAX
            }),
            _ => 0,
        }
    }

    /// Nearest `f64` to a numeric value; every other tag is `0.0`.
    pub fn to_double(&self) -> f64 {
        self.as_num().map_or(0.0, Num::to_f64)
    }
}

/// Numbers parse to numbers; any other text is kept as text.
impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_number(s).unwrap_or_else(|_| Value::text(s)))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::int(n),
            Err(_) => Value::big(BigNumber::from(n as u64)),
        }
    }
}

impl From<BigNumber> for Value {
    fn from(n: BigNumber) -> Self {
        Value::big(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<ValueMap> for Value {
    fn from(entries: ValueMap) -> Self {
        Value::map(entries)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::array(iter.into_iter().collect())
    }
}

impl FromIterator<(Value, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Value::map(iter.into_iter().collect())
    }
}
