//! Equality, ordering and hashing.
//!
//! Numbers compare by value across both representations, so `Number(10)`
//! equals a `BigNumber` of `10` and both hash alike. NaN equals NaN here,
//! which keeps `Eq` and `Hash` sound for map keys. Maps are equal when they
//! hold equal entries; they have no ordering.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::numeric;
use crate::stack::ensure_sufficient_stack;
use crate::value::{Value, ValueMap};

// Per-tag salts; both number representations share one.
const SALT_NULL: u8 = 0;
const SALT_TRUE: u8 = 1;
const SALT_FALSE: u8 = 2;
const SALT_NUMBER: u8 = 3;
const SALT_TEXT: u8 = 4;
const SALT_ARRAY: u8 = 5;
const SALT_MAP: u8 = 6;

impl Value {
    /// Structural equality.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null)
            | (Value::True, Value::True)
            | (Value::False, Value::False) => true,
            (Value::Text(a), Value::Text(b)) => a.ptr_eq(b) || **a == **b,
            (Value::Array(a), Value::Array(b)) => {
                a.ptr_eq(b)
                    || (a.len() == b.len()
                        && ensure_sufficient_stack(|| {
                            a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
                        }))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.ptr_eq(b) || ensure_sufficient_stack(|| maps_equal(a, b))
            }
            _ => match (self.as_num(), other.as_num()) {
                (Some(a), Some(b)) => numeric::compare(a, b) == Some(Ordering::Equal),
                _ => false,
            },
        }
    }

    /// Equality of the display forms: `Number(10)` looks equal to `"10"`.
    pub fn looks_equal(&self, other: &Value) -> bool {
        self.to_string() == other.to_string()
    }

    /// Ordering, where one exists.
    ///
    /// Numbers compare numerically, text lexicographically by code point,
    /// arrays element by element. Other combinations are only ordered when
    /// they are equal.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.as_str().cmp(b.as_str())),
            (Value::Array(a), Value::Array(b)) => {
                ensure_sufficient_stack(|| compare_arrays(a, b))
            }
            _ => match (self.as_num(), other.as_num()) {
                (Some(a), Some(b)) => numeric::compare(a, b),
                _ if self.equals(other) => Some(Ordering::Equal),
                _ => None,
            },
        }
    }

    /// Hash consistent with [`Value::equals`].
    pub fn hash_code(&self) -> u64 {
        let mut hasher = FxHasher::default();
        match self {
            Value::Null => hasher.write_u8(SALT_NULL),
            Value::True => hasher.write_u8(SALT_TRUE),
            Value::False => hasher.write_u8(SALT_FALSE),
            Value::Number(n) => hash_number(&mut hasher, *n),
            Value::BigNumber(n) => hash_number(&mut hasher, n.to_f64()),
            Value::Text(s) => {
                hasher.write_u8(SALT_TEXT);
                hasher.write(s.as_bytes());
            }
            Value::Array(items) => {
                hasher.write_u8(SALT_ARRAY);
                hasher.write_usize(items.len());
                ensure_sufficient_stack(|| {
                    for (index, item) in items.iter().enumerate() {
                        hasher.write_usize(index);
                        hasher.write_u64(item.hash_code());
                    }
                });
            }
            Value::Map(entries) => {
                hasher.write_u8(SALT_MAP);
                hasher.write_usize(entries.len());
                hasher.write_u64(ensure_sufficient_stack(|| hash_entries(entries)));
            }
        }
        hasher.finish()
    }
}

fn maps_equal(a: &ValueMap, b: &ValueMap) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| value.equals(other)))
}

fn compare_arrays(a: &[Value], b: &[Value]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b) {
        match x.compare(y)? {
            Ordering::Equal => {}
            unequal => return Some(unequal),
        }
    }
    Some(a.len().cmp(&b.len()))
}

/// Numbers hash their double; `-0` and every NaN hash as one value each.
fn hash_number(hasher: &mut FxHasher, n: f64) {
    let canonical = if n == 0.0 {
        0.0
    } else if n.is_nan() {
        f64::NAN
    } else {
        n
    };
    hasher.write_u8(SALT_NUMBER);
    hasher.write_u64(canonical.to_bits());
}

/// Order-independent combination of the entry hashes.
fn hash_entries(entries: &ValueMap) -> u64 {
    entries.iter().fold(0, |acc, (key, value)| {
        let mut entry = FxHasher::default();
        entry.write_u64(key.hash_code());
        entry.write_u64(value.hash_code());
        acc ^ entry.finish()
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

/// Number views for sorting; see [`numeric::total_cmp`].
pub(crate) fn numeric_total_cmp(a: &Value, b: &Value) -> Ordering {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) => numeric::total_cmp(x, y),
        _ => Ordering::Equal,
    }
}
