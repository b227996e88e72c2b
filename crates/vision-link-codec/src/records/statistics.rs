//! Pipeline statistics reported by the camera host. Decode only.

use serde::Serialize;

use crate::coerce::{bool_field, number_field};
use crate::value::Value;

const FPS: &[&str] = &["fps", "FPS", "Fps", "framesPerSecond"];
const INFERENCE_TIME: &[&str] = &["inferenceTime", "inference_time", "InferenceTime", "inference"];
const VIDEO_WIDTH: &[&str] = &["videoWidth", "video_width", "VideoWidth", "width"];
const VIDEO_HEIGHT: &[&str] = &["videoHeight", "video_height", "VideoHeight", "height"];
const RUN_TIME: &[&str] = &["runTime", "run_time", "RunTime", "uptime"];
const GPS_CONNECTED: &[&str] = &["gpsConnected", "gps_connected", "GpsConnected", "GPSConnected"];
const CPU_TEMPERATURE: &[&str] = &[
    "cpuTemperature",
    "cpu_temperature",
    "CpuTemperature",
    "cpuTemp",
    "cpu_temp",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_connected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_temperature: Option<f64>,
}

pub fn decode(value: &Value) -> Option<Statistics> {
    let map = value.as_map()?;
    Some(Statistics {
        fps: number_field(map, FPS),
        inference_time: number_field(map, INFERENCE_TIME),
        video_width: number_field(map, VIDEO_WIDTH),
        video_height: number_field(map, VIDEO_HEIGHT),
        run_time: number_field(map, RUN_TIME),
        gps_connected: bool_field(map, GPS_CONNECTED),
        cpu_temperature: number_field(map, CPU_TEMPERATURE),
    })
}
