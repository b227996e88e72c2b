//! Decoder configuration for telemetry frames.
//!
//! Some producers write map keys as MessagePack `bin` instead of `str`, so a
//! key like `status` arrives as raw bytes. The decoder used here is told to
//! read those keys as UTF-8 text.

use vision_link_pack::msgpack::{DecoderOptions, MsgPackDecoder};

pub fn telemetry_decoder_options() -> DecoderOptions {
    DecoderOptions {
        coerce_binary_keys: true,
        ..DecoderOptions::default()
    }
}

pub fn configured_decoder() -> MsgPackDecoder {
    MsgPackDecoder::new(telemetry_decoder_options())
}
