//! Tensor containers: numeric arrays packed as dtype + shape + raw bytes.
//!
//! ```text
//! { isMultiDimensional: true, dtype: "<f4", shape: [2, 3], data: <24 bytes> }
//!   => [[1, 2, 3], [4, 5, 6]]
//! ```
//!
//! Elements are little-endian. A trailing partial element is ignored.

use crate::coerce::{as_u32, field};
use crate::value::{Mapping, Value};

pub const FLAG_KEYS: &[&str] = &["isMultiDimensional", "is_multi_dimensional", "multiDimensional"];
pub const DTYPE_KEYS: &[&str] = &["dtype", "dType", "data_type"];
pub const DATA_KEYS: &[&str] = &["data", "raw", "buffer"];
pub const SHAPE_KEYS: &[&str] = &["shape", "dims"];

/// Deepest shape that is expanded; longer shapes decode as a flat sequence.
pub const MAX_RANK: usize = 32;

/// Empty groups emitted past the end of the data before a dimension is cut
/// short. Groups past the end are not expanded further.
const MAX_PADDING_GROUPS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Float32,
    Float64,
    Int32,
    Int16,
    Int8,
    Uint32,
    Uint16,
    Uint8,
}

impl DType {
    /// Parses a long (`"float32"`) or numpy-style (`"<f4"`) tag.
    pub fn from_tag(tag: &str) -> Option<DType> {
        let tag = tag.trim();
        let dtype = match tag {
            "<f4" | "f4" => DType::Float32,
            "<f8" | "f8" => DType::Float64,
            "<i4" | "i4" => DType::Int32,
            "<i2" | "i2" => DType::Int16,
            "<i1" | "|i1" | "i1" => DType::Int8,
            "<u4" | "u4" => DType::Uint32,
            "<u2" | "u2" => DType::Uint16,
            "<u1" | "|u1" | "u1" => DType::Uint8,
            _ => match tag.to_ascii_lowercase().as_str() {
                "float32" => DType::Float32,
                "float64" => DType::Float64,
                "int32" => DType::Int32,
                "int16" => DType::Int16,
                "int8" => DType::Int8,
                "uint32" => DType::Uint32,
                "uint16" => DType::Uint16,
                "uint8" => DType::Uint8,
                _ => return None,
            },
        };
        Some(dtype)
    }

    /// The numpy-style tag written by the encoder.
    pub fn short_tag(self) -> &'static str {
        match self {
            DType::Float32 => "<f4",
            DType::Float64 => "<f8",
            DType::Int32 => "<i4",
            DType::Int16 => "<i2",
            DType::Int8 => "|i1",
            DType::Uint32 => "<u4",
            DType::Uint16 => "<u2",
            DType::Uint8 => "|u1",
        }
    }

    pub fn width(self) -> usize {
        match self {
            DType::Float64 => 8,
            DType::Float32 | DType::Int32 | DType::Uint32 => 4,
            DType::Int16 | DType::Uint16 => 2,
            DType::Int8 | DType::Uint8 => 1,
        }
    }

    fn read(self, b: &[u8]) -> f64 {
        match self {
            DType::Float32 => f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64,
            DType::Float64 => f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
            DType::Int32 => i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64,
            DType::Int16 => i16::from_le_bytes([b[0], b[1]]) as f64,
            DType::Int8 => b[0] as i8 as f64,
            DType::Uint32 => u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64,
            DType::Uint16 => u16::from_le_bytes([b[0], b[1]]) as f64,
            DType::Uint8 => b[0] as f64,
        }
    }

    /// Decodes every whole element in `bytes`.
    pub fn decode_all(self, bytes: &[u8]) -> Vec<f64> {
        bytes
            .chunks_exact(self.width())
            .map(|chunk| self.read(chunk))
            .collect()
    }
}

/// Whether `map` has the shape of a tensor container.
pub fn is_tensor_container(map: &Mapping) -> bool {
    matches!(field(map, FLAG_KEYS), Some(Value::Bool(_)))
        && field(map, DTYPE_KEYS).is_some()
        && field(map, DATA_KEYS).is_some()
}

/// Decodes a tensor container into a number, a (nested) sequence of
/// numbers, or `Null` for an empty scalar.
pub fn decode_tensor(container: &Mapping) -> Value {
    let multi = matches!(field(container, FLAG_KEYS), Some(Value::Bool(true)));
    let bytes = raw_bytes(field(container, DATA_KEYS));

    let tag = match field(container, DTYPE_KEYS) {
        Some(Value::Seq(tags)) => tags.first().and_then(Value::as_str),
        Some(other) => other.as_str(),
        None => None,
    };
    let Some(dtype) = tag.and_then(DType::from_tag) else {
        log::trace!("unrecognized tensor dtype {tag:?}, returning raw bytes");
        return numbers(bytes.iter().map(|&b| b as f64));
    };

    let flat = dtype.decode_all(&bytes);
    if !multi {
        return flat.first().copied().map(Value::Number).unwrap_or(Value::Null);
    }

    let shape = shape(field(container, SHAPE_KEYS));
    if shape.is_empty() {
        return numbers(flat);
    }
    if shape.len() > MAX_RANK {
        log::trace!("tensor rank {} exceeds {MAX_RANK}, returning flat data", shape.len());
        return numbers(flat);
    }
    nest(&flat, &shape)
}

/// Packs `values` as a one-dimensional float32 tensor container.
pub fn encode_f32_tensor(values: &[f64]) -> Value {
    let data: Vec<u8> = values
        .iter()
        .flat_map(|&v| (v as f32).to_le_bytes())
        .collect();
    Value::map([
        ("isMultiDimensional", Value::Bool(true)),
        ("dtype", Value::from(DType::Float32.short_tag())),
        ("shape", Value::Seq(vec![Value::Number(values.len() as f64)])),
        ("data", Value::Bytes(data)),
    ])
}

fn raw_bytes(value: Option<&Value>) -> Vec<u8> {
    match value {
        Some(Value::Bytes(b)) => b.clone(),
        Some(Value::Seq(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Number(n) if n.is_finite() => Some(n.clamp(0.0, 255.0) as u8),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn shape(value: Option<&Value>) -> Vec<usize> {
    match value {
        Some(Value::Seq(dims)) => dims.iter().filter_map(as_u32).map(|d| d as usize).collect(),
        Some(other) => as_u32(other).map(|d| vec![d as usize]).unwrap_or_default(),
        None => Vec::new(),
    }
}

fn numbers(values: impl IntoIterator<Item = f64>) -> Value {
    Value::Seq(values.into_iter().map(Value::Number).collect())
}

fn nest(flat: &[f64], shape: &[usize]) -> Value {
    let Some((&outer, inner)) = shape.split_first() else {
        return numbers(flat.iter().copied());
    };
    // Past the end of the data.
    if flat.is_empty() {
        return Value::Seq(Vec::new());
    }
    if inner.is_empty() {
        return numbers(flat.iter().take(outer).copied());
    }

    let group = inner.iter().fold(1usize, |acc, &d| acc.saturating_mul(d));
    let available = if group == 0 { 0 } else { flat.len().div_ceil(group) };
    let groups = outer.min(available.max(MAX_PADDING_GROUPS));

    Value::Seq(
        (0..groups)
            .map(|i| {
                let start = i.saturating_mul(group).min(flat.len());
                let end = start.saturating_add(group).min(flat.len());
                nest(&flat[start..end], inner)
            })
            .collect(),
    )
}
