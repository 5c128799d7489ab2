//! Array and map operations.
//!
//! Mutators called on a value of the wrong kind do nothing. Indexed writes
//! past the end grow the array with `Null`s; indexed reads past the end are
//! errors.

use crate::compare::numeric_total_cmp;
use crate::errors::{index_out_of_bounds, ValueResult};
use crate::value::Value;

#[cold]
fn ignored(op: &'static str, receiver: &Value) {
    tracing::debug!(op, kind = receiver.type_name(), "collection operation ignored");
}

#[cold]
fn unaddressable(op: &'static str, index: usize) {
    tracing::debug!(op, index, "array cannot grow to index, write ignored");
}

/// Make room for `len` elements in total. False when that much memory
/// cannot be reserved.
fn reserve_to(items: &mut Vec<Value>, len: usize) -> bool {
    len <= items.len() || items.try_reserve(len - items.len()).is_ok()
}

impl Value {
    /// Elements of an array, entries of a map, characters of a text, or 0.
    pub fn length(&self) -> usize {
        match self {
            Value::Text(s) => s.chars().count(),
            Value::Array(items) => items.len(),
            Value::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Elements of an array; empty for anything else.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.as_array().unwrap_or(&[]).iter()
    }

    // Arrays

    pub fn append(&mut self, item: impl Into<Value>) {
        match self.array_mut() {
            Some(items) => items.push(item.into()),
            None => ignored("append", self),
        }
    }

    /// Insert before `index`, padding with `Null` when `index` is past the end.
    pub fn insert(&mut self, index: usize, item: impl Into<Value>) {
        let Some(items) = self.array_mut() else {
            ignored("insert", self);
            return;
        };
        let room = index.checked_add(1).filter(|&len| reserve_to(items, len));
        if room.is_none() {
            unaddressable("insert", index);
            return;
        }
        if index > items.len() {
            items.resize(index, Value::Null);
        }
        items.insert(index, item.into());
    }

    /// Overwrite the element at `index`, growing the array as needed.
    pub fn set(&mut self, index: usize, item: impl Into<Value>) {
        match self.element_mut(index) {
            Some(slot) => *slot = item.into(),
            None => ignored("set", self),
        }
    }

    /// Writable element at `index`, growing the array as needed.
    ///
    /// `None` for a non-array, or when the array cannot grow that far.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut Value> {
        let items = self.array_mut()?;
        if index >= items.len() {
            let Some(len) = index.checked_add(1).filter(|&len| reserve_to(items, len)) else {
                unaddressable("element_mut", index);
                return None;
            };
            items.resize(len, Value::Null);
        }
        items.get_mut(index)
    }

    /// Read the element (or character) at `index`.
    ///
    /// Maps are looked up with the index as a number key. Scalars read as
    /// `Null`.
    pub fn get_index(&self, index: usize) -> ValueResult {
        match self {
            Value::Array(items) => items
                .get(index)
                .cloned()
                .ok_or_else(|| index_out_of_bounds(index, items.len())),
            Value::Text(_) => self.char_at(index),
            Value::Map(_) => Ok(self.get(&Value::from(index))),
            _ => Ok(Value::Null),
        }
    }

    pub fn remove(&mut self, index: usize) -> ValueResult {
        let Some(items) = self.array_mut() else {
            ignored("remove", self);
            return Ok(Value::Null);
        };
        if index < items.len() {
            Ok(items.remove(index))
        } else {
            Err(index_out_of_bounds(index, items.len()))
        }
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.array_mut()?.pop()
    }

    /// Empty an array, map or text in place.
    pub fn clear(&mut self) {
        match self {
            Value::Array(items) => items.make_mut().clear(),
            Value::Map(entries) => entries.make_mut().clear(),
            Value::Text(s) => s.make_mut().clear(),
            other => ignored("clear", other),
        }
    }

    /// Sort by display form.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn sort(&mut self) {
        match self.array_mut() {
            Some(items) => items.sort_by_cached_key(Value::to_string),
            None => ignored("sort", self),
        }
    }

    /// Sort the numeric elements by value among the positions numbers
    /// already occupy; other elements keep their places. NaN sorts last.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn numeric_sort(&mut self) {
        let Some(items) = self.array_mut() else {
            ignored("numeric_sort", self);
            return;
        };
        let slots: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_number())
            .map(|(slot, _)| slot)
            .collect();
        let mut numbers: Vec<Value> = slots.iter().map(|&slot| items[slot].take()).collect();
        numbers.sort_by(numeric_total_cmp);
        for (slot, number) in slots.into_iter().zip(numbers) {
            items[slot] = number;
        }
    }

    /// Reverse an array's elements or a text's characters.
    pub fn reverse(&mut self) {
        match self {
            Value::Array(items) => items.make_mut().reverse(),
            Value::Text(s) => {
                let reversed: String = s.chars().rev().collect();
                *s.make_mut() = reversed;
            }
            other => ignored("reverse", other),
        }
    }

    // Maps

    /// Insert or overwrite the entry for `key`.
    pub fn put(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        match self.map_mut() {
            Some(entries) => {
                entries.insert(key.into(), value.into());
            }
            None => ignored("put", self),
        }
    }

    /// The value stored under `key`, or `Null`.
    pub fn get(&self, key: &Value) -> Value {
        self.as_map()
            .and_then(|entries| entries.get(key))
            .cloned()
            .unwrap_or_default()
    }

    /// Writable entry for `key`, if present.
    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.map_mut()?.get_mut(key)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.as_map().is_some_and(|entries| entries.contains_key(key))
    }

    pub fn remove_key(&mut self, key: &Value) -> Option<Value> {
        if !self.contains_key(key) {
            return None;
        }
        self.map_mut()?.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.as_map().into_iter().flat_map(|entries| entries.keys())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.as_map().into_iter().flat_map(|entries| entries.values())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.as_map().into_iter().flat_map(|entries| entries.iter())
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
