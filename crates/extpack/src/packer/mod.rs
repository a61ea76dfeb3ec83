//! Built-in packers for boxed primitives, dates, errors and regular
//! expressions.
//!
//! | Code | Kind |
//! |------|------|
//! | 0x0a | RegExp |
//! | 0x0b | boxed boolean |
//! | 0x0c | boxed string |
//! | 0x0d | Date |
//! | 0x0e | Error (all kinds) |
//! | 0x0f | boxed number |

mod boxed;
mod date;
mod error;
mod regexp;

pub use boxed::{
    decode_boolean, decode_number, decode_string, encode_boolean, encode_number, encode_string,
};
pub use date::{decode_date, encode_date};
pub use error::{decode_error, encode_error};
pub use regexp::{decode_regexp, encode_regexp};

use crate::constants::{codes, FLOAT64};
use crate::{Boxed, ExtError, ExtRegistry, Value};

/// Registers every built-in packer under its code from [`codes`].
pub fn register_builtins(registry: &mut ExtRegistry) {
    registry.register(
        codes::BOOLEAN,
        |v| matches!(v, Value::Boxed(Boxed::Bool(_))),
        encode_boolean,
        decode_boolean,
    );
    registry.register(
        codes::NUMBER,
        |v| matches!(v, Value::Boxed(Boxed::Number(_))),
        encode_number,
        decode_number,
    );
    registry.register(
        codes::STRING,
        |v| matches!(v, Value::Boxed(Boxed::String(_))),
        encode_string,
        decode_string,
    );
    registry.register(
        codes::DATE,
        |v| matches!(v, Value::Date(_)),
        encode_date,
        decode_date,
    );
    registry.register(
        codes::ERROR,
        |v| matches!(v, Value::Error(_)),
        encode_error,
        decode_error,
    );
    registry.register(
        codes::REGEXP,
        |v| matches!(v, Value::RegExp(_)),
        encode_regexp,
        decode_regexp,
    );
}

/// MsgPack float64: marker byte then big-endian IEEE-754 double.
fn write_float64(num: f64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    out.push(FLOAT64);
    out.extend_from_slice(&num.to_be_bytes());
    out
}

/// Accepts the 9-byte float64 form and a bare 8-byte double.
fn read_float64(code: u8, payload: &[u8]) -> Result<f64, ExtError> {
    let bytes = match payload {
        [FLOAT64, rest @ ..] if rest.len() == 8 => rest,
        bare if bare.len() == 8 => bare,
        _ => {
            return Err(ExtError::InvalidPayload {
                code,
                reason: "expected a float64",
            })
        }
    };
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Ok(f64::from_be_bytes(buf))
}
