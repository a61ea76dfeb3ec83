//! Error type shared by the header codec, the packers and the dispatcher.

use extpack_buffers::BufferError;
use thiserror::Error;

/// Failure of a single encode or decode call.
///
/// Every variant is fatal for the call that produced it; no bytes written
/// before the failure are considered valid. An unknown extension type code is
/// not an error: it decodes to a [`GenericExtValue`](crate::GenericExtValue).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtError {
    #[error("unrecognized marker byte: 0x{0:02x}")]
    UnrecognizedMarker(u8),
    #[error("truncated input: need {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    #[error("extension payload of {0} bytes exceeds the ext32 length field")]
    LengthOverflow(usize),
    #[error("no extension type registered for {0}")]
    UnsupportedType(&'static str),
    #[error("invalid payload for extension type 0x{code:02x}: {reason}")]
    InvalidPayload { code: u8, reason: &'static str },
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    #[error("containers nested deeper than {0} levels")]
    DepthLimit(usize),
}

impl From<BufferError> for ExtError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::UnexpectedEof { needed, remaining } => {
                ExtError::TruncatedInput { needed, remaining }
            }
            BufferError::InvalidUtf8 => ExtError::InvalidUtf8,
        }
    }
}
