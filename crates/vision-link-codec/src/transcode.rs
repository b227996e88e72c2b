//! Image payload transcoding: bytes on the wire, base64 text in the model.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::value::Value;

pub fn bytes_to_text(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn text_to_bytes(text: &str) -> Option<Vec<u8>> {
    STANDARD.decode(text.trim()).ok()
}

/// Model text for an inbound payload.
///
/// Binary is base64 encoded and text is kept as is. A sequence is classified by
/// its first element: numbers are read as byte values, anything else is
/// rendered as JSON text, as is any other non-null value.
pub fn payload_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bytes(bytes) => Some(bytes_to_text(bytes)),
        Value::Text(text) => Some(text.clone()),
        Value::Seq(items) if items.is_empty() => Some(String::new()),
        Value::Seq(items) if matches!(items[0], Value::Number(_)) => {
            let bytes: Vec<u8> = items
                .iter()
                .filter_map(|item| match item {
                    Value::Number(n) if n.is_finite() => Some(n.clamp(0.0, 255.0) as u8),
                    _ => None,
                })
                .collect();
            Some(bytes_to_text(&bytes))
        }
        other => Some(other.to_json_string()),
    }
}

/// Wire bytes for an outbound payload; empty when absent.
pub fn payload_bytes(text: Option<&str>) -> Vec<u8> {
    let Some(text) = text else {
        return Vec::new();
    };
    text_to_bytes(text).unwrap_or_else(|| {
        log::warn!(
            "image payload of {} chars is not base64, sending it as raw text",
            text.len()
        );
        text.as_bytes().to_vec()
    })
}
