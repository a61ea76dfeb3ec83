//! Convenience helpers over a process-wide default codec.

use std::sync::OnceLock;

use crate::msgpack::{MsgPackDecoder, MsgPackEncoder};
use crate::{ExtCodec, ExtError, Value};

static DEFAULT_CODEC: OnceLock<ExtCodec> = OnceLock::new();

/// Codec with the built-in packers, built on first use and never mutated.
///
/// Callers needing custom types build their own [`ExtCodec`].
pub fn default_codec() -> &'static ExtCodec {
    DEFAULT_CODEC.get_or_init(ExtCodec::new)
}

/// Encode a value as MessagePack using the default codec.
pub fn encode(value: &Value) -> Result<Vec<u8>, ExtError> {
    MsgPackEncoder::new(default_codec()).encode(value)
}

/// Decode MessagePack using the default codec.
pub fn decode(blob: &[u8]) -> Result<Value, ExtError> {
    MsgPackDecoder::new(default_codec()).decode(blob)
}
