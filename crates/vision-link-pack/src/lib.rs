//! MessagePack wire layer for vision-link telemetry frames.
//!
//! Decodes a frame into the loosely typed [`PackValue`] tree and encodes a
//! tree back into bytes. The decoder is configured through
//! [`msgpack::DecoderOptions`]; it keeps no state between calls, so one
//! instance can be shared by every transport in the process.
//!
//! # Example
//!
//! ```
//! use vision_link_pack::msgpack::{decode, encode};
//! use vision_link_pack::PackValue;
//!
//! let value = PackValue::Object(vec![("fps".into(), PackValue::Integer(30))]);
//! let bytes = encode(&value);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```

mod pack_extension;
mod pack_value;

pub mod msgpack;

pub use pack_extension::PackExtension;
pub use pack_value::PackValue;
