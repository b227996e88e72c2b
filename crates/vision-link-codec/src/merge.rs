//! Folds a normalized frame into one [`DataResponse`].
//!
//! A frame is a flat map, a named record, or a sequence of either. Flat map
//! keys are matched against the snapshot fields ignoring case and `_`/`-`;
//! an unmatched key holding a container is merged recursively with the key
//! kept as the origin hint, which decides between the camera and GPS
//! offsets and between the color and depth frames.

use crate::coerce::{as_bool, as_text, field};
use crate::records::{
    ai_record, color_correction, detection, fold_key, image, offset, position, statistics, Color,
    Offset, RecordKind, DISCRIMINATOR,
};
use crate::snapshot::DataResponse;
use crate::value::{Mapping, Value};

/// Record-level origin, used when the record was not found under a key.
const ORIGIN: &[&str] = &["origin", "source", "mount"];

/// `None` for `Null` and for anything that is not a map or a sequence.
pub fn build_snapshot(value: &Value) -> Option<DataResponse> {
    match value {
        Value::Map(_) | Value::Seq(_) => {
            let mut merger = Merger::default();
            merger.merge_value(value, None);
            Some(merger.out)
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetSlot {
    Camera,
    Gps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameSlot {
    Color,
    Depth,
}

fn offset_slot(hint: Option<&str>) -> Option<OffsetSlot> {
    let hint = hint?.to_lowercase();
    if hint.contains("gps") {
        Some(OffsetSlot::Gps)
    } else if hint.contains("cam") {
        Some(OffsetSlot::Camera)
    } else {
        None
    }
}

fn frame_slot(hint: Option<&str>) -> FrameSlot {
    match hint {
        Some(hint) if hint.to_lowercase().contains("depth") => FrameSlot::Depth,
        _ => FrameSlot::Color,
    }
}

#[derive(Default)]
struct Merger {
    out: DataResponse,
}

impl Merger {
    fn merge_value(&mut self, value: &Value, hint: Option<&str>) {
        match value {
            Value::Map(map) => match map.get(DISCRIMINATOR).and_then(Value::as_str) {
                Some(name) => self.merge_named(name, value, hint),
                None => self.merge_flat(map, hint),
            },
            Value::Seq(items) => {
                for item in items {
                    self.merge_value(item, hint);
                }
            }
            _ => {}
        }
    }

    fn merge_flat(&mut self, map: &Mapping, hint: Option<&str>) {
        for (key, value) in map {
            match fold_key(key).as_str() {
                "command" | "cmd" | "message" | "msg" => {
                    if let Some(command) = as_text(value) {
                        self.out.command = Some(command);
                    }
                }
                "valid" | "isvalid" => {
                    if let Some(valid) = as_bool(value) {
                        self.out.valid = Some(valid);
                    }
                }
                "cameraoffset" | "camoffset" | "offsetcamera" => {
                    if let Some(o) = offset::decode(value) {
                        self.out.camera_offset = Some(o);
                    }
                }
                "gpsoffset" | "offsetgps" => {
                    if let Some(o) = offset::decode(value) {
                        self.out.gps_offset = Some(o);
                    }
                }
                "offset" | "offsets" => match value {
                    Value::Seq(items) => {
                        for o in items.iter().filter_map(offset::decode) {
                            self.place_offset(o, hint);
                        }
                    }
                    single => {
                        if let Some(o) = offset::decode(single) {
                            self.place_offset(o, hint);
                        }
                    }
                },
                "colorcorrection" | "colourcorrection" => {
                    if let Some(cc) = color_correction::decode(value) {
                        self.out.color_correction = Some(cc);
                    }
                }
                "color" | "colour" | "colorimage" | "rgb" => {
                    if let Some(color) = image::decode_color(value) {
                        self.out.color = Some(color);
                    }
                }
                "depth" | "depthimage" => {
                    if let Some(depth) = image::decode_color(value) {
                        self.out.depth = Some(depth);
                    }
                }
                "image" => {
                    if let Some(img) = image::decode_image(value) {
                        self.place_frame(img.into(), hint);
                    }
                }
                "detections" | "detection" | "objects" => match value {
                    Value::Seq(items) => {
                        for d in items.iter().filter_map(detection::decode) {
                            self.out.push_detection(d);
                        }
                    }
                    single => {
                        if let Some(d) = detection::decode(single) {
                            self.out.push_detection(d);
                        }
                    }
                },
                "position" | "pos" | "robotposition" => {
                    if let Some(p) = position::decode(value) {
                        self.out.position = Some(p);
                    }
                }
                "stats" | "statistics" => {
                    if let Some(s) = statistics::decode(value) {
                        self.out.stats = Some(s);
                    }
                }
                _ => {
                    if matches!(value, Value::Map(_) | Value::Seq(_)) {
                        self.merge_value(value, Some(key.as_str()));
                    }
                }
            }
        }
    }

    fn merge_named(&mut self, name: &str, value: &Value, hint: Option<&str>) {
        let Some(kind) = RecordKind::parse(name) else {
            log::debug!("skipping record with unknown discriminator {name:?}");
            return;
        };
        let hint = hint.or_else(|| {
            value
                .as_map()
                .and_then(|map| field(map, ORIGIN))
                .and_then(Value::as_str)
        });
        match kind {
            RecordKind::Position => {
                if let Some(p) = position::decode(value) {
                    self.out.position = Some(p);
                }
            }
            RecordKind::Offset => {
                if let Some(o) = offset::decode(value) {
                    self.place_offset(o, hint);
                }
            }
            RecordKind::Statistics => {
                if let Some(s) = statistics::decode(value) {
                    self.out.stats = Some(s);
                }
            }
            RecordKind::ColorCorrection => {
                if let Some(cc) = color_correction::decode(value) {
                    self.out.color_correction = Some(cc);
                }
            }
            RecordKind::Detection => {
                if let Some(d) = detection::decode(value) {
                    self.out.push_detection(d);
                }
            }
            RecordKind::Color => {
                if let Some(color) = image::decode_color(value) {
                    self.place_frame(color, hint);
                }
            }
            RecordKind::Image => {
                if let Some(img) = image::decode_image(value) {
                    self.place_frame(img.into(), hint);
                }
            }
            RecordKind::AiRecord => {
                if let Some(partial) = ai_record::decode(value) {
                    self.out.merge_from(partial);
                }
            }
            RecordKind::ScreenLocation | RecordKind::MapLocation => {
                log::debug!("ignoring top-level {kind} record outside a detection");
            }
        }
    }

    /// Hinted offsets go to their slot; unhinted ones fill the camera slot
    /// first, then the GPS slot, and are dropped once both are taken.
    fn place_offset(&mut self, o: Offset, hint: Option<&str>) {
        let slot = match offset_slot(hint) {
            Some(slot) => slot,
            None if self.out.camera_offset.is_none() => OffsetSlot::Camera,
            None if self.out.gps_offset.is_none() => OffsetSlot::Gps,
            None => {
                log::trace!("both offset slots taken, dropping unlabelled offset");
                return;
            }
        };
        match slot {
            OffsetSlot::Camera => self.out.camera_offset = Some(o),
            OffsetSlot::Gps => self.out.gps_offset = Some(o),
        }
    }

    fn place_frame(&mut self, color: Color, hint: Option<&str>) {
        match frame_slot(hint) {
            FrameSlot::Color => self.out.color = Some(color),
            FrameSlot::Depth => self.out.depth = Some(color),
        }
    }
}
