//! Robot position.

use serde::Serialize;

use super::num;
use crate::coerce::{as_u32, bool_field, field, number_field};
use crate::value::{Mapping, Value};

/// Bit of [`Position::status`] set while the robot link is up.
pub const CONNECTED_BIT: u32 = 0x0000_0001;

const STATUS: &[&str] = &["status", "Status", "state"];
const X: &[&str] = &["x", "X"];
const Y: &[&str] = &["y", "Y"];
const Z: &[&str] = &["z", "Z"];
const AZIMUTH: &[&str] = &["azimuth", "Azimuth", "az", "yaw"];
const ELEVATION: &[&str] = &["elevation", "Elevation", "el", "pitch"];
const ROTATION: &[&str] = &["rotation", "Rotation", "rot", "roll"];
const CONNECTED: &[&str] = &["connected", "Connected", "isConnected", "is_connected"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Derived from `status` when present, else taken from the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected: Option<bool>,
}

pub fn decode(value: &Value) -> Option<Position> {
    let map = value.as_map()?;
    let status = field(map, STATUS).and_then(as_u32);
    let connected = match status {
        Some(status) => Some(status & CONNECTED_BIT == CONNECTED_BIT),
        None => bool_field(map, CONNECTED),
    };
    Some(Position {
        status,
        x: number_field(map, X),
        y: number_field(map, Y),
        z: number_field(map, Z),
        azimuth: number_field(map, AZIMUTH),
        elevation: number_field(map, ELEVATION),
        rotation: number_field(map, ROTATION),
        connected,
    })
}

/// A missing status is synthesized from `connected`, so the link state
/// survives the trip.
pub fn encode(position: &Position) -> Mapping {
    let status = position.status.unwrap_or(match position.connected {
        Some(true) => CONNECTED_BIT,
        _ => 0,
    });
    Mapping::from_iter([
        ("status".to_owned(), Value::Number(status as f64)),
        ("x".to_owned(), num(position.x)),
        ("y".to_owned(), num(position.y)),
        ("z".to_owned(), num(position.z)),
        ("azimuth".to_owned(), num(position.azimuth)),
        ("elevation".to_owned(), num(position.elevation)),
        ("rotation".to_owned(), num(position.rotation)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_follows_status_bit() {
        let p = decode(&Value::map([("status", Value::Number(3.0)), ("connected", false.into())]));
        assert_eq!(p.and_then(|p| p.connected), Some(true));

        let p = decode(&Value::map([("status", Value::Number(2.0))]));
        assert_eq!(p.and_then(|p| p.connected), Some(false));

        let p = decode(&Value::map([("isConnected", Value::from("true"))]));
        assert_eq!(p.and_then(|p| p.connected), Some(true));

        let p = decode(&Value::map([("X", Value::Number(1.0))]));
        assert_eq!(p.map(|p| (p.x, p.connected)), Some((Some(1.0), None)));
    }

    #[test]
    fn non_map_is_none() {
        assert_eq!(decode(&Value::Number(1.0)), None);
    }
}
