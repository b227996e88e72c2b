//! MessagePack extension payload, [`PackExtension`].

/// A MessagePack extension value (`fixext*` / `ext*` families).
///
/// Telemetry producers use extensions for typed binary views; the codec
/// only ever looks at the raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackExtension {
    pub tag: i8,
    pub data: Vec<u8>,
}

impl PackExtension {
    pub fn new(tag: i8, data: Vec<u8>) -> Self {
        Self { tag, data }
    }
}
