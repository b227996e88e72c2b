//! HSV color correction applied to the color stream.

use serde::Serialize;

use super::num;
use crate::coerce::number_field;
use crate::value::{Mapping, Value};

const HUE: &[&str] = &["hue", "Hue", "h"];
const SATURATION: &[&str] = &["saturation", "Saturation", "sat", "s"];
const VALUE: &[&str] = &["value", "Value", "val", "v"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorCorrection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// `None` unless at least one of hue, saturation and value resolves.
pub fn decode(value: &Value) -> Option<ColorCorrection> {
    let map = value.as_map()?;
    let correction = ColorCorrection {
        hue: number_field(map, HUE),
        saturation: number_field(map, SATURATION),
        value: number_field(map, VALUE),
    };
    if correction == ColorCorrection::default() {
        return None;
    }
    Some(correction)
}

pub fn encode(correction: &ColorCorrection) -> Mapping {
    Mapping::from_iter([
        ("hue".to_owned(), num(correction.hue)),
        ("saturation".to_owned(), num(correction.saturation)),
        ("value".to_owned(), num(correction.value)),
    ])
}
