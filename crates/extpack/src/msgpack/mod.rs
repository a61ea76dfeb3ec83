//! Host MessagePack codec for the core types.
//!
//! Native values (nil, booleans, integers, floats, strings, binary, arrays,
//! string-keyed maps) are handled here; every other [`Value`](crate::Value)
//! and every extension marker goes through an [`ExtCodec`](crate::ExtCodec).

pub mod decoder;
pub mod encoder;

pub use decoder::{MsgPackDecoder, MAX_DEPTH};
pub use encoder::MsgPackEncoder;
