//! The dynamic value type.
//!
//! # Sharing
//!
//! Scalars (`Null`, `True`, `False`, `Number`) live inline. Everything else
//! is held in a [`Heap`], so cloning a value is O(1) and copies share their
//! payload until one of them is mutated. Every mutator goes through
//! [`Heap::make_mut`], which splits a shared payload first; a mutation can
//! therefore never be observed through another copy.
//!
//! ```text
//! let a = Value::from("Hello");
//! let mut b = a.clone();   // shares a's text
//! b += " World";           // b splits off, a still reads "Hello"
//! ```
//!
//! Because a payload only ever holds values that were complete when they
//! were stored, a value can never contain itself: `a.append(a.clone())`
//! appends a snapshot of `a`.

mod heap;

use std::fmt;

use dynval_decimal::BigNumber;
use rustc_hash::FxHashMap;

use crate::numeric::{self, Num, NumericPolicy};

pub use heap::Heap;

/// Key/value storage of a map value.
pub type ValueMap = FxHashMap<Value, Value>;

/// The tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    True,
    False,
    Number,
    BigNumber,
    Text,
    Array,
    Map,
}

impl ValueType {
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::True => "true",
            ValueType::False => "false",
            ValueType::Number => "number",
            ValueType::BigNumber => "big number",
            ValueType::Text => "text",
            ValueType::Array => "array",
            ValueType::Map => "map",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    True,
    False,
    /// Fast-path number.
    Number(f64),
    /// Exact decimal, used once a computation outgrows `f64`.
    BigNumber(Heap<BigNumber>),
    Text(Heap<String>),
    Array(Heap<Vec<Value>>),
    Map(Heap<ValueMap>),
}

impl Value {
    pub const ZERO: Value = Value::Number(0.0);
    pub const ONE: Value = Value::Number(1.0);

    /// Default value of the given tag: `0`, empty text, empty array, ...
    pub fn new(kind: ValueType) -> Self {
        match kind {
            ValueType::Null => Value::Null,
            ValueType::True => Value::True,
            ValueType::False => Value::False,
            ValueType::Number => Value::ZERO,
            ValueType::BigNumber => Value::big(BigNumber::zero()),
            ValueType::Text => Value::text(String::new()),
            ValueType::Array => Value::empty_array(),
            ValueType::Map => Value::empty_map(),
        }
    }

    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Integer value, represented the way [`parse_number`] would read its
    /// decimal text under the default [`NumericPolicy`].
    ///
    /// [`parse_number`]: crate::parse_number
    pub fn int(n: i64) -> Self {
        const EXACT_LIMIT: u64 = 10_u64.pow(NumericPolicy::DEFAULT.combined_digits);
        if n.unsigned_abs() < EXACT_LIMIT {
            Value::Number(n as f64)
        } else {
            numeric::from_exact(BigNumber::from(n), &NumericPolicy::DEFAULT)
        }
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }

    #[inline]
    pub fn big(n: BigNumber) -> Self {
        Value::BigNumber(Heap::new(n))
    }

    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn empty_array() -> Self {
        Value::array(Vec::new())
    }

    #[inline]
    pub fn map(entries: ValueMap) -> Self {
        Value::Map(Heap::new(entries))
    }

    #[inline]
    pub fn empty_map() -> Self {
        Value::map(ValueMap::default())
    }

    // Inspection

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::True => ValueType::True,
            Value::False => ValueType::False,
            Value::Number(_) => ValueType::Number,
            Value::BigNumber(_) => ValueType::BigNumber,
            Value::Text(_) => ValueType::Text,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `Number` or `BigNumber`.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_) | Value::BigNumber(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// `Null`, `False`, zero and empty text, arrays and maps are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null | Value::False => false,
            Value::True => true,
            Value::Number(n) => *n != 0.0,
            Value::BigNumber(n) => !n.is_zero(),
            Value::Text(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_big(&self) -> Option<&BigNumber> {
        match self {
            Value::BigNumber(n) => Some(&**n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(&**s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(&**items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(entries) => Some(&**entries),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_num(&self) -> Option<Num<'_>> {
        match self {
            Value::Number(n) => Some(Num::Small(*n)),
            Value::BigNumber(n) => Some(Num::Big(&**n)),
            _ => None,
        }
    }

    // Exclusive access (copy-on-write)

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Value::Text(s) => Some(s.make_mut()),
            _ => None,
        }
    }

    pub fn array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items.make_mut()),
            _ => None,
        }
    }

    pub fn map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            Value::Map(entries) => Some(entries.make_mut()),
            _ => None,
        }
    }

    // Sharing

    /// Number of other values sharing this value's payload.
    pub fn share_count(&self) -> usize {
        match self {
            Value::Null | Value::True | Value::False | Value::Number(_) => 0,
            Value::BigNumber(h) => h.share_count(),
            Value::Text(h) => h.share_count(),
            Value::Array(h) => h.share_count(),
            Value::Map(h) => h.share_count(),
        }
    }

    /// Whether the next mutation will have to copy the payload first.
    #[inline]
    pub fn is_copy_pending(&self) -> bool {
        self.share_count() > 0
    }

    /// Whether both values read the very same payload.
    pub fn shares_payload_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::BigNumber(a), Value::BigNumber(b)) => a.ptr_eq(b),
            (Value::Text(a), Value::Text(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Move the content out, leaving `Null` behind.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::True => write!(f, "True"),
            Value::False => write!(f, "False"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::BigNumber(n) => write!(f, "BigNumber({})", **n),
            Value::Text(s) => write!(f, "Text({:?})", &**s),
            Value::Array(items) => write!(f, "Array({:?})", &**items),
            Value::Map(entries) => write!(f, "Map({:?})", &**entries),
        }
    }
}
