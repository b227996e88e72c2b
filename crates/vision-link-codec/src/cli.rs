//! Library side of the `vision-unpack` binary.
//!
//! - `unpack_snapshot` decodes a frame into a [`DataResponse`] and renders it as JSON
//! - `unpack_record` decodes a frame holding one named record
//! - `unpack_json_snapshot` / `unpack_json_record` take the same frame
//!   written as JSON text, with byte payloads as number arrays
//!
//! [`DataResponse`]: crate::DataResponse

use thiserror::Error;

use vision_link_pack::PackValue;

use crate::{decode_record, deserialize_data_response, Codec, CodecError, Value};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("frame decoded to nothing")]
    Empty,
}

fn render<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Decode a MessagePack frame to snapshot JSON.
pub fn unpack_snapshot(bytes: &[u8], pretty: bool) -> Result<String, CliError> {
    let snapshot = Codec::shared().decode_frame(bytes)?.ok_or(CliError::Empty)?;
    render(&snapshot, pretty)
}

/// Decode a MessagePack frame holding a single named record to JSON.
pub fn unpack_record(bytes: &[u8], pretty: bool) -> Result<String, CliError> {
    let record = Codec::shared()
        .decode_record_frame(bytes)?
        .ok_or(CliError::Empty)?;
    render(&record, pretty)
}

fn json_frame(json: &str) -> Result<Value, CliError> {
    let frame: serde_json::Value = serde_json::from_str(json)?;
    Ok(Value::from(PackValue::from(frame)))
}

/// Decode a JSON frame to snapshot JSON.
pub fn unpack_json_snapshot(json: &str, pretty: bool) -> Result<String, CliError> {
    let snapshot = deserialize_data_response(json_frame(json)?).ok_or(CliError::Empty)?;
    render(&snapshot, pretty)
}

/// Decode a JSON frame holding a single named record to JSON.
pub fn unpack_json_record(json: &str, pretty: bool) -> Result<String, CliError> {
    let record = decode_record(json_frame(json)?).ok_or(CliError::Empty)?;
    render(&record, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vision_link_pack::{msgpack, PackValue};

    #[test]
    fn unpack_position_record() {
        let frame = msgpack::encode(&PackValue::Object(vec![
            ("name".into(), PackValue::Str("Position".into())),
            ("status".into(), PackValue::Integer(1)),
            ("x".into(), PackValue::Float(0.5)),
        ]));
        assert_eq!(
            unpack_record(&frame, false).unwrap(),
            r#"{"name":"Position","status":1,"x":0.5,"connected":true}"#
        );
        let snapshot = unpack_snapshot(&frame, false).unwrap();
        assert_eq!(snapshot, r#"{"position":{"status":1,"x":0.5,"connected":true}}"#);
    }

    #[test]
    fn json_frames() {
        let frame = r#"["message", {"name": "Offset", "offX": 2, "unit": "cm"}]"#;
        assert_eq!(
            unpack_json_snapshot(frame, false).unwrap(),
            r#"{"cameraOffset":{"x":2.0,"unit":"cm"}}"#
        );
        assert_eq!(
            unpack_json_record(frame, false).unwrap(),
            r#"{"name":"Offset","x":2.0,"unit":"cm"}"#
        );
        assert!(matches!(
            unpack_json_snapshot("{not json", false),
            Err(CliError::Json(_))
        ));
        assert!(matches!(unpack_json_record("null", false), Err(CliError::Empty)));
    }

    #[test]
    fn scalar_frame_is_empty() {
        let frame = msgpack::encode(&PackValue::Integer(3));
        assert!(matches!(unpack_snapshot(&frame, false), Err(CliError::Empty)));
        assert!(matches!(
            unpack_snapshot(&[], false),
            Err(CliError::Codec(CodecError::MsgPack(_)))
        ));
    }
}
