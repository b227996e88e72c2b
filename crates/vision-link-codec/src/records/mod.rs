//! Record dispatch table.
//!
//! A named record is a map whose `name` entry says which decoder applies:
//!
//! ```text
//! { name: "Position", status: 1, x: 0.5, Y: 2 }
//! ```
//!
//! Every kind has a decoder; all but [`RecordKind::Statistics`] and
//! [`RecordKind::AiRecord`] also have an encoder. Decoders resolve each
//! field through an ordered alias list and never fail on odd input.

pub mod ai_record;
pub mod color_correction;
pub mod detection;
pub mod image;
pub mod offset;
pub mod position;
pub mod statistics;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CodecError;
use crate::snapshot::DataResponse;
use crate::value::{Mapping, Value};

pub use color_correction::ColorCorrection;
pub use detection::{Detection, MapLocation, ScreenLocation};
pub use image::{Color, Image};
pub use offset::Offset;
pub use position::{Position, CONNECTED_BIT};
pub use statistics::Statistics;

/// Key carrying the record discriminator.
pub const DISCRIMINATOR: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Position,
    Offset,
    Statistics,
    ColorCorrection,
    Detection,
    /// On the wire as `ImageDetection`.
    ScreenLocation,
    /// On the wire as `MapDetection`.
    MapLocation,
    Color,
    Image,
    AiRecord,
}

impl RecordKind {
    pub const ALL: [RecordKind; 10] = [
        RecordKind::Position,
        RecordKind::Offset,
        RecordKind::Statistics,
        RecordKind::ColorCorrection,
        RecordKind::Detection,
        RecordKind::ScreenLocation,
        RecordKind::MapLocation,
        RecordKind::Color,
        RecordKind::Image,
        RecordKind::AiRecord,
    ];

    /// Discriminator written on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Position => "Position",
            RecordKind::Offset => "Offset",
            RecordKind::Statistics => "Statistics",
            RecordKind::ColorCorrection => "ColorCorrection",
            RecordKind::Detection => "Detection",
            RecordKind::ScreenLocation => "ImageDetection",
            RecordKind::MapLocation => "MapDetection",
            RecordKind::Color => "Color",
            RecordKind::Image => "Image",
            RecordKind::AiRecord => "AIRecord",
        }
    }

    /// Matches a discriminator regardless of case and `_`/`-` separators.
    pub fn parse(name: &str) -> Option<RecordKind> {
        let kind = match fold_key(name).as_str() {
            "position" => RecordKind::Position,
            "offset" => RecordKind::Offset,
            "statistics" | "stats" => RecordKind::Statistics,
            "colorcorrection" => RecordKind::ColorCorrection,
            "detection" => RecordKind::Detection,
            "imagedetection" | "screenlocation" => RecordKind::ScreenLocation,
            "mapdetection" | "maplocation" => RecordKind::MapLocation,
            "color" => RecordKind::Color,
            "image" => RecordKind::Image,
            "airecord" => RecordKind::AiRecord,
            _ => return None,
        };
        Some(kind)
    }

    pub fn has_encoder(self) -> bool {
        !matches!(self, RecordKind::Statistics | RecordKind::AiRecord)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::parse(s).ok_or_else(|| CodecError::UnsupportedRecordKind(s.to_owned()))
    }
}

/// A typed record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name")]
pub enum Record {
    Position(Position),
    Offset(Offset),
    Statistics(Statistics),
    ColorCorrection(ColorCorrection),
    Detection(Detection),
    #[serde(rename = "ImageDetection")]
    ScreenLocation(ScreenLocation),
    #[serde(rename = "MapDetection")]
    MapLocation(MapLocation),
    Color(Color),
    Image(Image),
    #[serde(rename = "AIRecord")]
    AiRecord(Box<DataResponse>),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Position(_) => RecordKind::Position,
            Record::Offset(_) => RecordKind::Offset,
            Record::Statistics(_) => RecordKind::Statistics,
            Record::ColorCorrection(_) => RecordKind::ColorCorrection,
            Record::Detection(_) => RecordKind::Detection,
            Record::ScreenLocation(_) => RecordKind::ScreenLocation,
            Record::MapLocation(_) => RecordKind::MapLocation,
            Record::Color(_) => RecordKind::Color,
            Record::Image(_) => RecordKind::Image,
            Record::AiRecord(_) => RecordKind::AiRecord,
        }
    }

    /// Encodes the record as a named envelope.
    pub fn encode(&self) -> Result<Value, CodecError> {
        let fields = match self {
            Record::Position(p) => position::encode(p),
            Record::Offset(o) => offset::encode(o),
            Record::ColorCorrection(c) => color_correction::encode(c),
            Record::Detection(d) => detection::encode(d),
            Record::ScreenLocation(s) => detection::encode_screen_location(s),
            Record::MapLocation(m) => detection::encode_map_location(m),
            Record::Color(c) => image::encode_color(c),
            Record::Image(i) => image::encode_image(i),
            Record::Statistics(_) | Record::AiRecord(_) => {
                return Err(CodecError::DecodeOnly(self.kind()));
            }
        };
        Ok(envelope(self.kind(), fields))
    }
}

/// Decodes a named record. `None` when `value` has no known discriminator or
/// the kind's decoder produced nothing.
pub fn decode_named(value: &Value) -> Option<Record> {
    let name = value.get(DISCRIMINATOR)?.as_str()?;
    decode_as(RecordKind::parse(name)?, value)
}

/// Decodes `value` with the decoder for `kind`, ignoring any discriminator.
pub fn decode_as(kind: RecordKind, value: &Value) -> Option<Record> {
    let record = match kind {
        RecordKind::Position => Record::Position(position::decode(value)?),
        RecordKind::Offset => Record::Offset(offset::decode(value)?),
        RecordKind::Statistics => Record::Statistics(statistics::decode(value)?),
        RecordKind::ColorCorrection => Record::ColorCorrection(color_correction::decode(value)?),
        RecordKind::Detection => Record::Detection(detection::decode(value)?),
        RecordKind::ScreenLocation => {
            Record::ScreenLocation(detection::decode_screen_location(value)?)
        }
        RecordKind::MapLocation => Record::MapLocation(detection::decode_map_location(value)?),
        RecordKind::Color => Record::Color(image::decode_color(value)?),
        RecordKind::Image => Record::Image(image::decode_image(value)?),
        RecordKind::AiRecord => Record::AiRecord(Box::new(ai_record::decode(value)?)),
    };
    Some(record)
}

/// Prefixes the discriminator and drops explicitly absent fields.
pub(crate) fn envelope(kind: RecordKind, fields: Mapping) -> Value {
    let mut out = Mapping::with_capacity(fields.len() + 1);
    out.insert(DISCRIMINATOR.to_owned(), Value::from(kind.as_str()));
    out.extend(fields.into_iter().filter(|(_, v)| !v.is_null()));
    Value::Map(out)
}

/// Lower-cases `key` and drops `_`, `-` and spaces, so `camera_offset`,
/// `cameraOffset` and `Camera-Offset` compare equal.
pub(crate) fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Shorthand for a numeric field in encoder output.
pub(crate) fn num(value: Option<f64>) -> Value {
    Value::Number(value.unwrap_or(0.0))
}
