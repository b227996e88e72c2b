//! Camera frames: [`Image`] and the [`Color`] wrapper used for the color
//! and depth streams.

use serde::Serialize;

use super::{envelope, num, RecordKind};
use crate::coerce::{bool_field, field, number_field};
use crate::transcode::{payload_bytes, payload_text};
use crate::value::{Mapping, Value};

const VALID: &[&str] = &["valid", "Valid", "isValid", "is_valid"];
const WIDTH: &[&str] = &["width", "Width", "w"];
const HEIGHT: &[&str] = &["height", "Height", "h"];
const DATA: &[&str] = &["data", "Data", "bytes", "pixels", "raw"];
const IMAGE: &[&str] = &["image", "Image", "img", "frame"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Pixel payload as base64 text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Color {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

impl From<Image> for Color {
    fn from(image: Image) -> Self {
        Color { image: Some(image) }
    }
}

pub fn decode_image(value: &Value) -> Option<Image> {
    let map = value.as_map()?;
    Some(Image {
        valid: bool_field(map, VALID),
        width: number_field(map, WIDTH),
        height: number_field(map, HEIGHT),
        data: field(map, DATA).and_then(payload_text),
    })
}

/// Accepts both `{image: {...}}` and a bare image map.
pub fn decode_color(value: &Value) -> Option<Color> {
    let map = value.as_map()?;
    let image = match field(map, IMAGE) {
        Some(image) => decode_image(image),
        None if looks_like_image(map) => decode_image(value),
        None => None,
    };
    Some(Color { image })
}

fn looks_like_image(map: &Mapping) -> bool {
    [VALID, WIDTH, HEIGHT, DATA]
        .iter()
        .any(|aliases| field(map, aliases).is_some())
}

pub fn encode_image(image: &Image) -> Mapping {
    Mapping::from_iter([
        ("valid".to_owned(), Value::Bool(image.valid.unwrap_or(false))),
        ("width".to_owned(), num(image.width)),
        ("height".to_owned(), num(image.height)),
        ("data".to_owned(), Value::Bytes(payload_bytes(image.data.as_deref()))),
    ])
}

pub fn encode_color(color: &Color) -> Mapping {
    let image = color.image.clone().unwrap_or_default();
    Mapping::from_iter([(
        "image".to_owned(),
        envelope(RecordKind::Image, encode_image(&image)),
    )])
}
