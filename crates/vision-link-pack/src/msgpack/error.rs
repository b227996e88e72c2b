//! MessagePack decoder error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsgPackError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8 at offset {0}")]
    InvalidUtf8(usize),
    #[error("invalid MessagePack byte at offset {0}")]
    InvalidByte(usize),
    #[error("map key at offset {0} is not a string, binary or integer")]
    InvalidKeyType(usize),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}
