use thiserror::Error;
use vision_link_pack::msgpack::MsgPackError;

use crate::records::RecordKind;

/// Errors raised on the outbound path and by frame decoding.
///
/// Inbound value trees never produce one of these; only a frame that is not
/// MessagePack at all does.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("unsupported record kind: {0:?}")]
    UnsupportedRecordKind(String),
    #[error("record kind {0} has no encoder")]
    DecodeOnly(RecordKind),
    #[error("record is a {found}, but was asked to encode as {expected}")]
    KindMismatch {
        expected: RecordKind,
        found: RecordKind,
    },
    #[error("malformed frame: {0}")]
    MsgPack(#[from] MsgPackError),
}
