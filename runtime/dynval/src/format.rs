//! Text form of values.
//!
//! `Null` prints `null`, booleans `True`/`False`, numbers in their shortest
//! form (`10`, `0.5`, never `-0`), text verbatim. Arrays print as
//! `[a, b, c]` and maps as `{k = v, ...}`; nested text is not quoted.
//! Containers nested deeper than [`FormatOptions::max_depth`] print as
//! `[...]` or `{...}`.

use std::fmt;

use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Printing limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Container depth past which nested arrays and maps are elided.
    pub max_depth: usize,
}

impl FormatOptions {
    pub const DEFAULT: Self = FormatOptions { max_depth: 128 };

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A value paired with the options to print it with.
#[derive(Clone, Copy)]
pub struct DisplayWith<'a> {
    value: &'a Value,
    options: FormatOptions,
}

impl Value {
    /// Display adapter with explicit [`FormatOptions`].
    pub fn display_with(&self, options: FormatOptions) -> DisplayWith<'_> {
        DisplayWith {
            value: self,
            options,
        }
    }
}

impl fmt::Display for DisplayWith<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.value, &self.options, 0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &FormatOptions::DEFAULT, 0)
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    options: &FormatOptions,
    depth: usize,
) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::True => f.write_str("True"),
        Value::False => f.write_str("False"),
        Value::Number(n) => write_number(f, *n),
        Value::BigNumber(n) => write!(f, "{}", **n),
        Value::Text(s) => f.write_str(s),
        Value::Array(_) if depth >= options.max_depth => f.write_str("[...]"),
        Value::Map(_) if depth >= options.max_depth => f.write_str("{...}"),
        Value::Array(items) => ensure_sufficient_stack(|| {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, options, depth + 1)?;
            }
            f.write_str("]")
        }),
        Value::Map(entries) => ensure_sufficient_stack(|| {
            f.write_str("{")?;
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, key, options, depth + 1)?;
                f.write_str(" = ")?;
                write_value(f, item, options, depth + 1)?;
            }
            f.write_str("}")
        }),
    }
}
