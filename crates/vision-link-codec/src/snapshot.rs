//! The typed [`DataResponse`] snapshot built from one inbound frame.

use serde::Serialize;

use crate::records::{Color, ColorCorrection, Detection, Offset, Position, Statistics};

/// Everything one frame said about the robot and its camera.
///
/// Built fresh for every frame; a field is `None` when the frame did not
/// carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    /// Echo of the command this frame answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_offset: Option<Offset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_offset: Option<Offset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<Color>,
    /// In arrival order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detections: Option<Vec<Detection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Statistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_correction: Option<ColorCorrection>,
}

impl DataResponse {
    pub fn is_empty(&self) -> bool {
        *self == DataResponse::default()
    }

    pub fn push_detection(&mut self, detection: Detection) {
        self.detections.get_or_insert_with(Vec::new).push(detection);
    }

    /// Folds `other` in: populated fields overwrite, detections append.
    pub fn merge_from(&mut self, other: DataResponse) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.command, other.command);
        take(&mut self.valid, other.valid);
        take(&mut self.camera_offset, other.camera_offset);
        take(&mut self.gps_offset, other.gps_offset);
        take(&mut self.color, other.color);
        take(&mut self.depth, other.depth);
        take(&mut self.position, other.position);
        take(&mut self.stats, other.stats);
        take(&mut self.color_correction, other.color_correction);
        if let Some(detections) = other.detections {
            self.detections.get_or_insert_with(Vec::new).extend(detections);
        }
    }
}
