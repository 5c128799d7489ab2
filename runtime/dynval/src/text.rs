//! Text operations.
//!
//! Positions are character indices, not byte offsets. A receiver that is not
//! text behaves like empty text; search operations on arrays look for an
//! equal element instead. Needles and replacements are taken in their
//! display form, so `find(10)` looks for `"10"`.

use crate::errors::{index_out_of_bounds, ValueResult};
use crate::value::Value;

/// Characters stripped by the trim operations.
pub(crate) const TRIM_CHARS: &[char] = &[' ', '\t', '\n'];

/// Byte offset of the `index`th character; `index == len` is the end.
fn byte_offset(text: &str, index: usize) -> Option<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .nth(index)
}

fn char_index(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

impl Value {
    fn text_or_empty(&self) -> &str {
        self.as_text().unwrap_or("")
    }

    #[must_use]
    pub fn trim(&self) -> Value {
        Value::text(self.text_or_empty().trim_matches(TRIM_CHARS))
    }

    #[must_use]
    pub fn trim_left(&self) -> Value {
        Value::text(self.text_or_empty().trim_start_matches(TRIM_CHARS))
    }

    #[must_use]
    pub fn trim_right(&self) -> Value {
        Value::text(self.text_or_empty().trim_end_matches(TRIM_CHARS))
    }

    /// ASCII upper case; other characters are unchanged.
    #[must_use]
    pub fn to_upper(&self) -> Value {
        Value::text(self.text_or_empty().to_ascii_uppercase())
    }

    /// ASCII lower case; other characters are unchanged.
    #[must_use]
    pub fn to_lower(&self) -> Value {
        Value::text(self.text_or_empty().to_ascii_lowercase())
    }

    /// Characters `start..end`.
    pub fn substring(&self, start: usize, end: usize) -> ValueResult {
        let text = self.text_or_empty();
        let len = text.chars().count();
        if start > len {
            return Err(index_out_of_bounds(start, len));
        }
        if end > len || end < start {
            return Err(index_out_of_bounds(end, len));
        }
        Ok(text.chars().skip(start).take(end - start).collect::<String>().into())
    }

    /// Characters from `start` to the end.
    pub fn substring_from(&self, start: usize) -> ValueResult {
        let len = self.text_or_empty().chars().count();
        self.substring(start, len.max(start))
    }

    /// Split around every occurrence of `delimiter`; an empty delimiter
    /// splits into single characters. Non-text yields an empty array.
    pub fn split(&self, delimiter: &Value) -> Value {
        let Some(text) = self.as_text() else {
            return Value::empty_array();
        };
        let delimiter = delimiter.to_string();
        if delimiter.is_empty() {
            return text.chars().map(|c| Value::text(c.to_string())).collect();
        }
        text.split(delimiter.as_str()).map(Value::from).collect()
    }

    pub fn starts_with(&self, prefix: &Value) -> bool {
        self.as_text()
            .is_some_and(|text| text.starts_with(prefix.to_string().as_str()))
    }

    pub fn ends_with(&self, suffix: &Value) -> bool {
        self.as_text()
            .is_some_and(|text| text.ends_with(suffix.to_string().as_str()))
    }

    /// Position of the first occurrence of `needle`.
    pub fn index_of(&self, needle: &Value) -> Option<usize> {
        self.index_of_from(needle, 0)
    }

    /// Position of the first occurrence of `needle` at or after `start`.
    pub fn index_of_from(&self, needle: &Value, start: usize) -> Option<usize> {
        match self {
            Value::Text(text) => {
                let from = byte_offset(text, start)?;
                let found = text[from..].find(needle.to_string().as_str())?;
                Some(char_index(text, from + found))
            }
            Value::Array(items) => items
                .iter()
                .skip(start)
                .position(|item| item == needle)
                .map(|i| i + start),
            _ => None,
        }
    }

    /// Position of the last occurrence of `needle`.
    pub fn last_index_of(&self, needle: &Value) -> Option<usize> {
        match self {
            Value::Text(text) => text
                .rfind(needle.to_string().as_str())
                .map(|byte| char_index(text, byte)),
            Value::Array(items) => items.iter().rposition(|item| item == needle),
            _ => None,
        }
    }

    /// Replace the first occurrence of `find` in place. Returns whether
    /// anything was replaced.
    pub fn replace(&mut self, find: &Value, replacement: &Value) -> bool {
        let find = find.to_string();
        let Some(start) = self.as_text().and_then(|text| text.find(find.as_str())) else {
            return false;
        };
        let replacement = replacement.to_string();
        if let Some(text) = self.text_mut() {
            text.replace_range(start..start + find.len(), &replacement);
        }
        true
    }

    /// The character at `index`, as text.
    pub fn char_at(&self, index: usize) -> ValueResult {
        let text = self.text_or_empty();
        text.chars()
            .nth(index)
            .map(|c| Value::text(c.to_string()))
            .ok_or_else(|| index_out_of_bounds(index, text.chars().count()))
    }

    /// The Unicode scalar value of the character at `index`.
    pub fn code_point_at(&self, index: usize) -> ValueResult<u32> {
        let text = self.text_or_empty();
        text.chars()
            .nth(index)
            .map(u32::from)
            .ok_or_else(|| index_out_of_bounds(index, text.chars().count()))
    }
}

#[cfg(test)]
mod tests;
