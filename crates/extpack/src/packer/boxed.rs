//! Boxed boolean, number and string.

use crate::constants::codes;
use crate::{Boxed, ExtError, Value};

use super::{read_float64, write_float64};

/// One byte, 0x01 for true and 0x00 for false.
pub fn encode_boolean(value: &Value) -> Result<Vec<u8>, ExtError> {
    match value {
        Value::Boxed(Boxed::Bool(b)) => Ok(vec![u8::from(*b)]),
        other => Err(ExtError::UnsupportedType(other.type_name())),
    }
}

/// Also accepts the MsgPack `false`/`true` markers (0xc2/0xc3).
pub fn decode_boolean(payload: &[u8]) -> Result<Value, ExtError> {
    let b = match payload {
        [0x00] | [0xc2] => false,
        [0x01] | [0xc3] => true,
        _ => {
            return Err(ExtError::InvalidPayload {
                code: codes::BOOLEAN,
                reason: "expected a single boolean byte",
            })
        }
    };
    Ok(Value::Boxed(Boxed::Bool(b)))
}

pub fn encode_number(value: &Value) -> Result<Vec<u8>, ExtError> {
    match value {
        Value::Boxed(Boxed::Number(n)) => Ok(write_float64(*n)),
        other => Err(ExtError::UnsupportedType(other.type_name())),
    }
}

pub fn decode_number(payload: &[u8]) -> Result<Value, ExtError> {
    let n = read_float64(codes::NUMBER, payload)?;
    Ok(Value::Boxed(Boxed::Number(n)))
}

/// Raw UTF-8, length implied by the frame.
pub fn encode_string(value: &Value) -> Result<Vec<u8>, ExtError> {
    match value {
        Value::Boxed(Boxed::String(s)) => Ok(s.as_bytes().to_vec()),
        other => Err(ExtError::UnsupportedType(other.type_name())),
    }
}

pub fn decode_string(payload: &[u8]) -> Result<Value, ExtError> {
    let s = std::str::from_utf8(payload).map_err(|_| ExtError::InvalidUtf8)?;
    Ok(Value::Boxed(Boxed::String(s.to_owned())))
}
