use vision_link_codec::coerce::{as_bool, as_number, as_text, finite_numbers};
use vision_link_codec::transcode::{bytes_to_text, payload_text, text_to_bytes};
use vision_link_codec::Value;

#[test]
fn number_coercion_matrix() {
    assert_eq!(as_number(&Value::from("3.5")), Some(3.5));
    assert_eq!(as_number(&Value::from(" -2 ")), Some(-2.0));
    assert_eq!(as_number(&Value::from("abc")), None);
    assert_eq!(as_number(&Value::from("")), None);
    assert_eq!(as_number(&Value::from("NaN")), None);
    assert_eq!(as_number(&Value::from("inf")), None);
    assert_eq!(as_number(&Value::Number(f64::NAN)), None);
    assert_eq!(as_number(&Value::Number(f64::NEG_INFINITY)), None);
    assert_eq!(as_number(&Value::Bool(true)), None);
    assert_eq!(as_number(&Value::Null), None);
    assert_eq!(as_number(&Value::Number(7.25)), Some(7.25));
}

#[test]
fn bool_coercion_matrix() {
    assert_eq!(as_bool(&Value::from("true")), Some(true));
    assert_eq!(as_bool(&Value::from("FALSE")), Some(false));
    assert_eq!(as_bool(&Value::from("on")), Some(true));
    assert_eq!(as_bool(&Value::from("0")), Some(false));
    assert_eq!(as_bool(&Value::from("maybe")), None);
    assert_eq!(as_bool(&Value::Number(2.0)), Some(true));
    assert_eq!(as_bool(&Value::Number(-0.5)), Some(true));
    assert_eq!(as_bool(&Value::Number(0.0)), Some(false));
    assert_eq!(as_bool(&Value::Number(f64::NAN)), None);
    assert_eq!(as_bool(&Value::Bool(false)), Some(false));
    assert_eq!(as_bool(&Value::Seq(vec![])), None);
}

#[test]
fn text_coercion_matrix() {
    assert_eq!(as_text(&Value::from("m")).as_deref(), Some("m"));
    assert_eq!(as_text(&Value::Number(2.0)).as_deref(), Some("2"));
    assert_eq!(as_text(&Value::Number(0.5)).as_deref(), Some("0.5"));
    assert_eq!(as_text(&Value::Bool(true)).as_deref(), Some("true"));
    assert_eq!(as_text(&Value::Bytes(b"cm".to_vec())).as_deref(), Some("cm"));
    assert_eq!(as_text(&Value::Bytes(vec![0xff, 0xfe])), None);
    assert_eq!(as_text(&Value::Null), None);
}

#[test]
fn numeric_sequences() {
    let mixed = Value::Seq(vec![
        Value::Number(1.0),
        Value::from("2"),
        Value::Bool(true),
        Value::Number(f64::INFINITY),
    ]);
    assert_eq!(finite_numbers(&mixed), Some(vec![1.0, 2.0]));
    assert_eq!(finite_numbers(&Value::Number(4.0)), Some(vec![4.0]));
    assert_eq!(finite_numbers(&Value::from("x")), None);
    assert_eq!(finite_numbers(&Value::Null), None);
}

#[test]
fn base64_helpers() {
    assert_eq!(bytes_to_text(&[0, 1, 2]), "AAEC");
    assert_eq!(text_to_bytes("AAEC"), Some(vec![0, 1, 2]));
    assert_eq!(text_to_bytes(" AAEC\n"), Some(vec![0, 1, 2]));
    assert_eq!(text_to_bytes("%%%"), None);
    assert_eq!(payload_text(&Value::Seq(vec![])).as_deref(), Some(""));
    assert_eq!(payload_text(&Value::from("raw")).as_deref(), Some("raw"));
    assert_eq!(
        payload_text(&Value::map([("a", Value::Number(1.0))])).as_deref(),
        Some(r#"{"a":1}"#)
    );
}
