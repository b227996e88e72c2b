//! Object detections and their screen / map locations.

use serde::Serialize;

use super::{envelope, num, RecordKind};
use crate::coerce::{field, finite_numbers, number_field};
use crate::tensor::encode_f32_tensor;
use crate::value::{Mapping, Value};

/// [`Detection::depth`] value meaning the depth could not be measured.
pub const UNKNOWN_DEPTH: f64 = -1.0;

const CLASS_ID: &[&str] = &["classId", "class_id", "ClassId", "label", "class"];
const PROBABILITY: &[&str] = &["probability", "Probability", "confidence", "score"];
const DEPTH: &[&str] = &["depth", "Depth", "distance"];
const SCREEN_LOCATION: &[&str] = &[
    "screenLocation",
    "screen_location",
    "ScreenLocation",
    "imageDetection",
    "image_detection",
    "ImageDetection",
    "bbox",
];
const MAP_LOCATION: &[&str] = &[
    "mapLocation",
    "map_location",
    "MapLocation",
    "mapDetection",
    "map_detection",
    "MapDetection",
];

const SCREEN_X: &[&str] = &["x", "X", "left"];
const SCREEN_Y: &[&str] = &["y", "Y", "top"];
const SCREEN_WIDTH: &[&str] = &["width", "Width", "w"];
const SCREEN_HEIGHT: &[&str] = &["height", "Height", "h"];

const MAP_X: &[&str] = &["x", "X"];
const MAP_Y: &[&str] = &["y", "Y"];
const MAP_Z: &[&str] = &["z", "Z"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Passed through as sent; [`UNKNOWN_DEPTH`] is left for consumers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_location: Option<ScreenLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_location: Option<MapLocation>,
}

impl Detection {
    pub fn has_known_depth(&self) -> bool {
        self.depth.is_some_and(|d| d != UNKNOWN_DEPTH)
    }
}

/// Pixel-space bounding box.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// World coordinates of the points belonging to a detection. The axes are
/// independent and may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapLocation {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

pub fn decode(value: &Value) -> Option<Detection> {
    let map = value.as_map()?;
    Some(Detection {
        class_id: number_field(map, CLASS_ID),
        probability: number_field(map, PROBABILITY),
        depth: number_field(map, DEPTH),
        screen_location: field(map, SCREEN_LOCATION).and_then(decode_screen_location),
        map_location: field(map, MAP_LOCATION).and_then(decode_map_location),
    })
}

pub fn decode_screen_location(value: &Value) -> Option<ScreenLocation> {
    let map = value.as_map()?;
    Some(ScreenLocation {
        x: number_field(map, SCREEN_X),
        y: number_field(map, SCREEN_Y),
        width: number_field(map, SCREEN_WIDTH),
        height: number_field(map, SCREEN_HEIGHT),
    })
}

pub fn decode_map_location(value: &Value) -> Option<MapLocation> {
    let map = value.as_map()?;
    let axis = |aliases: &[&str]| {
        field(map, aliases)
            .and_then(finite_numbers)
            .unwrap_or_default()
    };
    Some(MapLocation {
        x: axis(MAP_X),
        y: axis(MAP_Y),
        z: axis(MAP_Z),
    })
}

/// Sub-records are always written, zero-filled when absent.
pub fn encode(detection: &Detection) -> Mapping {
    let screen = detection.screen_location.clone().unwrap_or_default();
    let map = detection.map_location.clone().unwrap_or_default();
    Mapping::from_iter([
        ("classId".to_owned(), num(detection.class_id)),
        ("probability".to_owned(), num(detection.probability)),
        ("depth".to_owned(), num(detection.depth)),
        (
            "screenLocation".to_owned(),
            envelope(RecordKind::ScreenLocation, encode_screen_location(&screen)),
        ),
        (
            "mapLocation".to_owned(),
            envelope(RecordKind::MapLocation, encode_map_location(&map)),
        ),
    ])
}

pub fn encode_screen_location(location: &ScreenLocation) -> Mapping {
    Mapping::from_iter([
        ("x".to_owned(), num(location.x)),
        ("y".to_owned(), num(location.y)),
        ("width".to_owned(), num(location.width)),
        ("height".to_owned(), num(location.height)),
    ])
}

pub fn encode_map_location(location: &MapLocation) -> Mapping {
    Mapping::from_iter([
        ("x".to_owned(), encode_f32_tensor(&location.x)),
        ("y".to_owned(), encode_f32_tensor(&location.y)),
        ("z".to_owned(), encode_f32_tensor(&location.z)),
    ])
}
