//! MessagePack extension types.
//!
//! Values MessagePack cannot represent natively travel as extension frames:
//! a marker (fixext 1/2/4/8/16 or ext 8/16/32), a one-byte type code and a
//! payload. This crate provides
//!
//! - the header codec ([`header`]),
//! - an ordered type registry with first-match-wins lookup ([`ExtRegistry`]),
//! - built-in packers for boxed primitives, dates, errors and regular
//!   expressions ([`packer`]),
//! - a byte-exact passthrough for unknown type codes ([`GenericExtValue`]),
//! - the dispatcher tying them together ([`ExtCodec`]),
//! - a small host MessagePack codec using it ([`msgpack`]).
//!
//! ```
//! use extpack::{Boxed, ExtCodec, Value};
//!
//! let codec = ExtCodec::new();
//! let bytes = codec.encode(&Value::Boxed(Boxed::Bool(true))).unwrap();
//! assert_eq!(bytes, [0xd4, 0x0b, 0x01]);
//! assert_eq!(codec.decode(&bytes).unwrap(), Value::Boxed(Boxed::Bool(true)));
//! ```

mod dispatch;
mod error;
mod registry;
mod value;

pub mod constants;
pub mod header;
pub mod msgpack;
pub mod packer;
pub mod passthrough;
pub mod util;

pub use constants::{codes, ExtMarker};
pub use dispatch::{ExtCodec, ExtCodecOptions};
pub use error::ExtError;
pub use header::ExtHeader;
pub use registry::{ExtRegistry, RegistryEntry};
pub use util::{decode, default_codec, encode};
pub use value::{
    Boxed, DateValue, ErrorKind, ErrorValue, GenericExtValue, OpaqueValue, RegExpValue, Value,
};
