#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::ValueError;
use pretty_assertions::assert_eq;

fn text(s: &str) -> Value {
    Value::from(s)
}

#[test]
fn trimming() {
    let padded = text(" \t hi there\n ");
    assert_eq!(padded.trim(), text("hi there"));
    assert_eq!(padded.trim_left(), text("hi there\n "));
    assert_eq!(padded.trim_right(), text(" \t hi there"));
    assert_eq!(text("\r x \r").trim(), text("\r x \r"));
}

#[test]
fn case_mapping_is_ascii_only() {
    assert_eq!(text("Grüße").to_upper(), text("GRüßE"));
    assert_eq!(text("ÀBC").to_lower(), text("Àbc"));
    assert_eq!(Value::from(10).to_upper(), text(""));
}

#[test]
fn substrings_count_characters() {
    let s = text("héllo");
    assert_eq!(s.substring(1, 3).unwrap(), text("él"));
    assert_eq!(s.substring_from(2).unwrap(), text("llo"));
    assert_eq!(s.substring(5, 5).unwrap(), text(""));
    assert_eq!(
        s.substring(2, 9),
        Err(ValueError::IndexOutOfBounds { index: 9, len: 5 })
    );
    assert_eq!(
        s.substring_from(6),
        Err(ValueError::IndexOutOfBounds { index: 6, len: 5 })
    );
    assert!(s.substring(3, 2).is_err());
}

#[test]
fn splitting() {
    let parts = text("a,b,,c").split(&text(","));
    assert_eq!(parts.to_string(), "[a, b, , c]");
    assert_eq!(parts.length(), 4);

    assert_eq!(text("añb").split(&text("")).to_string(), "[a, ñ, b]");
    assert_eq!(text("10203").split(&Value::from(0)).to_string(), "[1, 2, 3]");
    assert_eq!(Value::from(5).split(&text(",")), Value::empty_array());
}

#[test]
fn prefix_and_suffix() {
    assert!(text("Hello").starts_with(&text("He")));
    assert!(text("Hello").ends_with(&text("llo")));
    assert!(!text("Hello").starts_with(&text("lo")));
    assert!(text("v10").ends_with(&Value::from(10)));
    assert!(!Value::from(10).starts_with(&text("1")));
}

#[test]
fn searching_text() {
    let s = text("ünïcode ünïcode");
    assert_eq!(s.index_of(&text("code")), Some(3));
    assert_eq!(s.index_of_from(&text("code"), 4), Some(11));
    assert_eq!(s.last_index_of(&text("ü")), Some(8));
    assert_eq!(s.index_of(&text("xyz")), None);
    assert_eq!(s.index_of_from(&text("c"), 99), None);
}

#[test]
fn searching_arrays() {
    let items = Value::from(vec![Value::from(1), text("two"), Value::from(1)]);
    assert_eq!(items.index_of(&Value::from(1)), Some(0));
    assert_eq!(items.index_of_from(&Value::from(1), 1), Some(2));
    assert_eq!(items.last_index_of(&Value::from(1)), Some(2));
    assert_eq!(items.index_of(&text("1")), None);
    assert_eq!(Value::Null.index_of(&Value::Null), None);
}

#[test]
fn replace_first_occurrence() {
    let mut s = text("one two two");
    assert!(s.replace(&text("two"), &Value::from(2)));
    assert_eq!(s, text("one 2 two"));
    assert!(!s.replace(&text("three"), &text("3")));
    assert_eq!(s, text("one 2 two"));

    let mut number = Value::from(22);
    assert!(!number.replace(&text("2"), &text("x")));
    assert_eq!(number, Value::from(22));
}

#[test]
fn replace_does_not_touch_copies() {
    let original = text("aaa");
    let mut copy = original.clone();
    copy.replace(&text("a"), &text("b"));
    assert_eq!(original, text("aaa"));
    assert_eq!(copy, text("baa"));
}

#[test]
fn characters() {
    let s = text("añ😀");
    assert_eq!(s.char_at(1).unwrap(), text("ñ"));
    assert_eq!(s.code_point_at(2).unwrap(), 0x1F600);
    assert_eq!(
        s.char_at(3),
        Err(ValueError::IndexOutOfBounds { index: 3, len: 3 })
    );
    assert!(s.code_point_at(7).is_err());
}
