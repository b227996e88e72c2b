//! Mount offset of the camera or the GPS antenna relative to the robot.

use serde::Serialize;

use super::num;
use crate::coerce::{number_field, text_field};
use crate::value::{Mapping, Value};

const X: &[&str] = &["x", "X", "off_x", "offX"];
const Y: &[&str] = &["y", "Y", "off_y", "offY"];
const Z: &[&str] = &["z", "Z", "off_z", "offZ"];
const UNIT: &[&str] = &["unit", "Unit", "units"];
const HEADING_OFFSET: &[&str] = &["headingOffset", "heading_offset", "HeadingOffset", "heading"];
const ELEVATION_OFFSET: &[&str] = &[
    "elevationOffset",
    "elevation_offset",
    "ElevationOffset",
    "elevation",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_offset: Option<f64>,
}

pub fn decode(value: &Value) -> Option<Offset> {
    let map = value.as_map()?;
    Some(Offset {
        x: number_field(map, X),
        y: number_field(map, Y),
        z: number_field(map, Z),
        unit: text_field(map, UNIT),
        heading_offset: number_field(map, HEADING_OFFSET),
        elevation_offset: number_field(map, ELEVATION_OFFSET),
    })
}

pub fn encode(offset: &Offset) -> Mapping {
    Mapping::from_iter([
        ("x".to_owned(), num(offset.x)),
        ("y".to_owned(), num(offset.y)),
        ("z".to_owned(), num(offset.z)),
        ("unit".to_owned(), Value::from(offset.unit.clone().unwrap_or_default())),
        ("headingOffset".to_owned(), num(offset.heading_offset)),
        ("elevationOffset".to_owned(), num(offset.elevation_offset)),
    ])
}
