//! `AIRecord`: one inference result bundling position, detections, stats and
//! frames. Decode only; it yields a partial snapshot.

use super::{detection, image, position, statistics};
use crate::coerce::field;
use crate::snapshot::DataResponse;
use crate::value::Value;

const POSITION: &[&str] = &["position", "Position", "pos"];
const DETECTIONS: &[&str] = &["detections", "Detections", "objects"];
const STATS: &[&str] = &["stats", "Stats", "statistics", "Statistics"];
const COLOR: &[&str] = &["color", "Color", "colorImage", "color_image"];
const DEPTH: &[&str] = &["depth", "Depth", "depthImage", "depth_image"];

/// `None` when none of the parts decoded.
pub fn decode(value: &Value) -> Option<DataResponse> {
    let map = value.as_map()?;
    let detections = field(map, DETECTIONS).map(|value| match value {
        Value::Seq(items) => items.iter().filter_map(detection::decode).collect(),
        single => detection::decode(single).into_iter().collect(),
    });
    let snapshot = DataResponse {
        position: field(map, POSITION).and_then(position::decode),
        detections,
        stats: field(map, STATS).and_then(statistics::decode),
        color: field(map, COLOR).and_then(image::decode_color),
        depth: field(map, DEPTH).and_then(image::decode_color),
        ..DataResponse::default()
    };
    (!snapshot.is_empty()).then_some(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_snapshot() {
        let record = Value::map([
            ("name", Value::from("AIRecord")),
            ("pos", Value::map([("x", Value::Number(1.0))])),
            ("objects", Value::map([("label", Value::Number(7.0))])),
        ]);
        let snapshot = decode(&record).unwrap_or_default();
        assert_eq!(snapshot.position.and_then(|p| p.x), Some(1.0));
        assert_eq!(snapshot.detections.map(|d| d.len()), Some(1));
        assert!(snapshot.stats.is_none());
    }

    #[test]
    fn nothing_decoded_is_none() {
        assert_eq!(decode(&Value::map([("name", Value::from("AIRecord"))])), None);
        assert_eq!(decode(&Value::map([("position", Value::Number(3.0))])), None);
    }
}
