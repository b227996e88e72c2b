use vision_link_codec::merge::build_snapshot;
use vision_link_codec::{deserialize_data_response, Codec, DataResponse, Offset, Value};
use vision_link_pack::msgpack::encode;
use vision_link_pack::PackValue;

fn obj(fields: &[(&str, Value)]) -> Value {
    Value::map(fields.iter().map(|(k, v)| (*k, v.clone())))
}

fn named(name: &str, fields: &[(&str, Value)]) -> Value {
    let mut all = vec![("name", Value::from(name))];
    all.extend(fields.iter().cloned());
    obj(&all)
}

fn offset_x(offset: &Option<Offset>) -> Option<f64> {
    offset.as_ref().and_then(|o| o.x)
}

#[test]
fn null_and_scalars_give_nothing() {
    assert_eq!(deserialize_data_response(Value::Null), None);
    assert_eq!(deserialize_data_response(Value::from("hello")), None);
    assert_eq!(deserialize_data_response(Value::Seq(vec!["message".into()])), None);
}

#[test]
fn unlabelled_offsets_fill_camera_then_gps() {
    let frame = Value::Seq(vec![
        named("Offset", &[("x", Value::Number(1.0))]),
        named("Offset", &[("X", Value::Number(2.0))]),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(offset_x(&snapshot.camera_offset), Some(1.0));
    assert_eq!(offset_x(&snapshot.gps_offset), Some(2.0));
}

#[test]
fn labelled_offset_is_not_displaced_by_slot_filling() {
    let frame = obj(&[
        ("gpsOffset", obj(&[("x", Value::Number(9.0))])),
        ("extra", Value::Seq(vec![named("Offset", &[("x", Value::Number(1.0))])])),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(offset_x(&snapshot.gps_offset), Some(9.0));
    assert_eq!(offset_x(&snapshot.camera_offset), Some(1.0));
}

#[test]
fn detections_accumulate_in_arrival_order() {
    let frame = Value::Seq(vec![
        named("Detection", &[("classId", Value::Number(3.0))]),
        named("Detection", &[("classId", Value::Number(1.0))]),
        named("Detection", &[("classId", Value::Number(2.0))]),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    let classes: Vec<Option<f64>> = snapshot
        .detections
        .unwrap_or_default()
        .iter()
        .map(|d| d.class_id)
        .collect();
    assert_eq!(classes, [Some(3.0), Some(1.0), Some(2.0)]);
}

#[test]
fn unknown_record_is_skipped() {
    let frame = Value::Seq(vec![
        named("Teleport", &[("x", Value::Number(5.0))]),
        named("Position", &[("status", Value::Number(1.0)), ("x", Value::Number(0.5))]),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    let position = snapshot.position.clone().unwrap_or_default();
    assert_eq!(position.x, Some(0.5));
    assert_eq!(position.connected, Some(true));
    assert_eq!(
        snapshot,
        DataResponse {
            position: Some(position),
            ..DataResponse::default()
        }
    );
}

#[test]
fn later_position_overwrites_earlier() {
    let frame = Value::Seq(vec![
        named("Position", &[("x", Value::Number(1.0))]),
        named("Position", &[("y", Value::Number(2.0))]),
    ]);
    let position = deserialize_data_response(frame)
        .and_then(|s| s.position)
        .unwrap_or_default();
    assert_eq!((position.x, position.y), (None, Some(2.0)));
}

#[test]
fn flat_keys_in_any_convention() {
    let frame = obj(&[
        ("Command", "getData".into()),
        ("is_valid", "yes".into()),
        ("camera_offset", obj(&[("off_x", Value::Number(0.1))])),
        ("GPS-Offset", obj(&[("offY", Value::Number(0.2))])),
        ("colourCorrection", obj(&[("Hue", Value::Number(10.0))])),
        ("statistics", obj(&[("fps", Value::Number(30.0))])),
        ("robot_position", obj(&[("Status", Value::Number(0.0))])),
        ("objects", obj(&[("score", Value::Number(0.9))])),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(snapshot.command.as_deref(), Some("getData"));
    assert_eq!(snapshot.valid, Some(true));
    assert_eq!(offset_x(&snapshot.camera_offset), Some(0.1));
    assert_eq!(snapshot.gps_offset.and_then(|o| o.y), Some(0.2));
    assert_eq!(snapshot.color_correction.and_then(|c| c.hue), Some(10.0));
    assert_eq!(snapshot.stats.and_then(|s| s.fps), Some(30.0));
    assert_eq!(snapshot.position.and_then(|p| p.connected), Some(false));
    assert_eq!(snapshot.detections.map(|d| d.len()), Some(1));
}

#[test]
fn container_keys_act_as_origin_hints() {
    let image = |width: f64| named("Image", &[("width", Value::Number(width))]);
    let frame = obj(&[
        ("depthCamera", image(1.0)),
        ("front", obj(&[("frames", Value::Seq(vec![image(2.0)]))])),
        (
            "mounts",
            obj(&[
                ("gps_antenna", named("Offset", &[("z", Value::Number(3.0))])),
                ("camera", named("Offset", &[("z", Value::Number(4.0))])),
            ]),
        ),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    let width =
        |c: Option<vision_link_codec::Color>| c.and_then(|c| c.image).and_then(|i| i.width);
    assert_eq!(width(snapshot.depth), Some(1.0));
    assert_eq!(width(snapshot.color), Some(2.0));
    assert_eq!(snapshot.gps_offset.and_then(|o| o.z), Some(3.0));
    assert_eq!(snapshot.camera_offset.and_then(|o| o.z), Some(4.0));
}

#[test]
fn only_the_innermost_key_is_a_hint() {
    let frame = obj(&[
        ("gps", obj(&[("data", named("Offset", &[("x", Value::Number(1.0))]))])),
        ("depth_rig", obj(&[("frames", named("Image", &[("width", Value::Number(8.0))]))])),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(offset_x(&snapshot.camera_offset), Some(1.0));
    assert!(snapshot.gps_offset.is_none());
    assert!(snapshot.depth.is_none());
    assert_eq!(
        snapshot.color.and_then(|c| c.image).and_then(|i| i.width),
        Some(8.0)
    );
}

#[test]
fn top_level_location_records_are_ignored() {
    let frame = Value::Seq(vec![
        named("ImageDetection", &[("x", Value::Number(1.0))]),
        named("MapDetection", &[("x", Value::Number(1.0))]),
    ]);
    assert_eq!(deserialize_data_response(frame), Some(DataResponse::default()));
}

#[test]
fn ai_record_merges_into_snapshot() {
    let frame = Value::Seq(vec![
        named("Detection", &[("classId", Value::Number(1.0))]),
        named(
            "AIRecord",
            &[
                ("position", obj(&[("x", Value::Number(7.0))])),
                ("detections", Value::Seq(vec![obj(&[("classId", Value::Number(2.0))])])),
                ("depth", obj(&[("image", obj(&[("valid", Value::Bool(true))]))])),
            ],
        ),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(snapshot.position.and_then(|p| p.x), Some(7.0));
    assert_eq!(snapshot.detections.map(|d| d.len()), Some(2));
    assert_eq!(
        snapshot.depth.and_then(|d| d.image).and_then(|i| i.valid),
        Some(true)
    );
    assert!(snapshot.color.is_none());
}

#[test]
fn enveloped_pair_list_frame() {
    let frame = Value::Seq(vec![
        "message".into(),
        Value::Seq(vec!["valid".into(), Value::Bool(true)]),
        Value::Seq(vec!["cmd".into(), "ping".into()]),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(snapshot.valid, Some(true));
    assert_eq!(snapshot.command.as_deref(), Some("ping"));
}

#[test]
fn malformed_fields_degrade_to_absent() {
    let frame = obj(&[
        ("valid", "maybe".into()),
        ("position", obj(&[("x", "abc".into()), ("y", Value::Number(f64::NAN))])),
        ("stats", Value::Number(3.0)),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(snapshot.valid, None);
    let position = snapshot.position.unwrap_or_default();
    assert_eq!((position.x, position.y), (None, None));
    assert!(snapshot.stats.is_none());
}

#[test]
fn image_payload_is_base64_text() {
    let frame = obj(&[(
        "color",
        obj(&[("image", obj(&[("data", Value::Bytes(b"rgb".to_vec()))]))]),
    )]);
    let snapshot = build_snapshot(&frame).unwrap_or_default();
    let data = snapshot.color.and_then(|c| c.image).and_then(|i| i.data);
    assert_eq!(data.as_deref(), Some("cmdi"));
}

#[test]
fn decode_frame_from_wire() {
    let frame = encode(&PackValue::Array(vec![
        PackValue::Str("message".into()),
        PackValue::Object(vec![
            ("name".into(), PackValue::Str("Statistics".into())),
            ("fps".into(), PackValue::Integer(15)),
            ("gpsConnected".into(), PackValue::Bool(true)),
        ]),
    ]));
    let snapshot = Codec::shared().decode_frame(&frame);
    let stats = snapshot.ok().flatten().and_then(|s| s.stats).unwrap_or_default();
    assert_eq!(stats.fps, Some(15.0));
    assert_eq!(stats.gps_connected, Some(true));

    assert!(Codec::shared().decode_frame(&[0x92, 0x01]).is_err());
}

#[test]
fn snapshot_json_rendering() {
    let frame = obj(&[
        ("command", "status".into()),
        ("cameraOffset", obj(&[("x", Value::Number(1.0)), ("unit", "m".into())])),
    ]);
    let snapshot = deserialize_data_response(frame).unwrap_or_default();
    assert_eq!(
        serde_json::to_string(&snapshot).unwrap(),
        r#"{"command":"status","cameraOffset":{"x":1.0,"unit":"m"}}"#
    );
}
