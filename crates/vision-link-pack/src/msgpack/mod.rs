//! MessagePack decoder and encoder.

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::{DecoderOptions, MsgPackDecoder};
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;

use crate::PackValue;

/// Encode a value into a fresh buffer.
pub fn encode(value: &PackValue) -> Vec<u8> {
    MsgPackEncoder::new().encode(value)
}

/// Decode one value with [`DecoderOptions::default`].
pub fn decode(blob: &[u8]) -> Result<PackValue, MsgPackError> {
    MsgPackDecoder::default().decode(blob)
}
