//! Transport envelope: `["message", payload...]`.

use crate::value::Value;

const ENVELOPE_TAG: &str = "message";

/// Strips the envelope if `value` has one.
///
/// A single payload element is returned as is, several are returned as a
/// sequence, none gives `Null`. Anything else passes through untouched.
pub fn unwrap_envelope(value: Value) -> Value {
    let is_envelope = matches!(
        value.as_seq(),
        Some([Value::Text(tag), ..]) if tag.eq_ignore_ascii_case(ENVELOPE_TAG)
    );
    if !is_envelope {
        return value;
    }
    let Value::Seq(mut items) = value else {
        return Value::Null;
    };
    items.remove(0);
    match items.len() {
        0 => Value::Null,
        1 => items.pop().unwrap_or_default(),
        _ => Value::Seq(items),
    }
}
