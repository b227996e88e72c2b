//! Scalar coercion shared by every record decoder.
//!
//! All functions return `None` instead of failing. Numbers are only ever
//! returned finite.

use crate::value::{Mapping, Value};

/// Finite number from a number or numeric text.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => *n,
        Value::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Boolean from a bool, a number (non-zero is true) or text.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) if n.is_finite() => Some(*n != 0.0),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Text from text, a number, a bool or UTF-8 bytes.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s.clone()),
        Value::Number(n) if n.is_finite() => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Bytes(b) => std::str::from_utf8(b).ok().map(str::to_owned),
        _ => None,
    }
}

/// Non-negative integer that fits in `u32`; fractions are truncated.
pub fn as_u32(value: &Value) -> Option<u32> {
    let n = as_number(value)?;
    (0.0..=u32::MAX as f64).contains(&n).then(|| n as u32)
}

/// Finite numbers of a sequence, dropping everything else. A lone number is
/// read as a one-element sequence.
pub fn finite_numbers(value: &Value) -> Option<Vec<f64>> {
    match value {
        Value::Seq(items) => Some(items.iter().filter_map(as_number).collect()),
        Value::Null => None,
        other => as_number(other).map(|n| vec![n]),
    }
}

/// First alias present in `map` with a non-null value.
pub fn field<'a>(map: &'a Mapping, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| map.get(*alias))
        .find(|value| !value.is_null())
}

pub fn number_field(map: &Mapping, aliases: &[&str]) -> Option<f64> {
    field(map, aliases).and_then(as_number)
}

pub fn bool_field(map: &Mapping, aliases: &[&str]) -> Option<bool> {
    field(map, aliases).and_then(as_bool)
}

pub fn text_field(map: &Mapping, aliases: &[&str]) -> Option<String> {
    field(map, aliases).and_then(as_text)
}
