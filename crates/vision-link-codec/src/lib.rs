//! Typed telemetry snapshots over vision-link MessagePack frames.
//!
//! Inbound, a frame goes through
//!
//! ```text
//! bytes -> PackValue -> Value -> unwrap envelope -> normalize -> merge -> DataResponse
//! ```
//!
//! and never fails once it is valid MessagePack: odd fields degrade to
//! absent ones. Outbound, a typed [`Record`] is encoded into a named
//! envelope and then into bytes.
//!
//! # Example
//!
//! ```
//! use vision_link_codec::{deserialize_data_response, Value};
//!
//! let frame = Value::map([
//!     ("command", Value::from("status")),
//!     ("position", Value::map([("status", Value::Number(1.0)), ("X", Value::Number(2.0))])),
//! ]);
//! let snapshot = deserialize_data_response(frame).unwrap();
//! let position = snapshot.position.unwrap();
//! assert_eq!(position.x, Some(2.0));
//! assert_eq!(position.connected, Some(true));
//! ```

pub mod adapter;
pub mod cli;
pub mod coerce;
pub mod envelope;
mod error;
pub mod merge;
pub mod normalize;
pub mod records;
mod snapshot;
pub mod tensor;
pub mod transcode;
mod value;

use std::sync::OnceLock;

use vision_link_pack::msgpack::{self, DecoderOptions, MsgPackDecoder};
use vision_link_pack::PackValue;

pub use error::CodecError;
pub use records::{
    Color, ColorCorrection, Detection, Image, MapLocation, Offset, Position, Record, RecordKind,
    ScreenLocation, Statistics, CONNECTED_BIT,
};
pub use snapshot::DataResponse;
pub use value::{Mapping, Value};

/// Builds a snapshot from one decoded frame. `None` when the frame is
/// `Null` or not a container.
pub fn deserialize_data_response(raw: Value) -> Option<DataResponse> {
    let value = normalize::normalize(envelope::unwrap_envelope(raw));
    merge::build_snapshot(&value)
}

/// Decodes a single named record.
pub fn decode_record(envelope: Value) -> Option<Record> {
    let value = normalize::normalize(envelope::unwrap_envelope(envelope));
    records::decode_named(&value)
}

/// Encodes `record` as the named envelope for `kind`.
///
/// `kind` is matched like an inbound discriminator. Unknown kinds, kinds
/// without an encoder and a record of another kind are all errors.
pub fn encode_record(kind: &str, record: &Record) -> Result<Value, CodecError> {
    let expected: RecordKind = kind.parse()?;
    if !expected.has_encoder() {
        return Err(CodecError::DecodeOnly(expected));
    }
    let found = record.kind();
    if found != expected {
        return Err(CodecError::KindMismatch { expected, found });
    }
    record.encode()
}

/// Frame-level entry point owning a configured decoder.
#[derive(Debug, Clone)]
pub struct Codec {
    decoder: MsgPackDecoder,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec {
    /// Codec reading binary map keys as text.
    pub fn new() -> Self {
        Self {
            decoder: adapter::configured_decoder(),
        }
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            decoder: MsgPackDecoder::new(options),
        }
    }

    /// Process-wide codec, configured on first use.
    pub fn shared() -> &'static Codec {
        static SHARED: OnceLock<Codec> = OnceLock::new();
        SHARED.get_or_init(Codec::new)
    }

    pub fn options(&self) -> DecoderOptions {
        self.decoder.options()
    }

    /// Decodes the MessagePack value in `bytes` into a [`Value`].
    pub fn decode_value(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::from(self.decoder.decode(bytes)?))
    }

    /// Wire bytes to snapshot. Only a frame that is not MessagePack fails.
    pub fn decode_frame(&self, bytes: &[u8]) -> Result<Option<DataResponse>, CodecError> {
        let value = self.decode_value(bytes)?;
        log::trace!("decoded frame of {} bytes", bytes.len());
        Ok(deserialize_data_response(value))
    }

    pub fn decode_record_frame(&self, bytes: &[u8]) -> Result<Option<Record>, CodecError> {
        Ok(decode_record(self.decode_value(bytes)?))
    }

    pub fn encode_frame(&self, kind: &str, record: &Record) -> Result<Vec<u8>, CodecError> {
        let value = encode_record(kind, record)?;
        Ok(msgpack::encode(&PackValue::from(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_codec_is_built_once() {
        assert!(std::ptr::eq(Codec::shared(), Codec::shared()));
        assert!(Codec::shared().options().coerce_binary_keys);
    }

    #[test]
    fn encode_record_checks_kind() {
        let record = Record::Position(Position::default());
        assert_eq!(
            encode_record("Offset", &record),
            Err(CodecError::KindMismatch {
                expected: RecordKind::Offset,
                found: RecordKind::Position,
            })
        );
        assert_eq!(
            encode_record("Statistics", &Record::Statistics(Statistics::default())),
            Err(CodecError::DecodeOnly(RecordKind::Statistics))
        );
        assert!(encode_record("position", &record).is_ok());
    }
}
