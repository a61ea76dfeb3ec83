//! Date as epoch milliseconds in a MsgPack float64.

use crate::constants::codes;
use crate::{DateValue, ExtError, Value};

use super::{read_float64, write_float64};

pub fn encode_date(value: &Value) -> Result<Vec<u8>, ExtError> {
    match value {
        Value::Date(date) => Ok(write_float64(date.millis())),
        other => Err(ExtError::UnsupportedType(other.type_name())),
    }
}

pub fn decode_date(payload: &[u8]) -> Result<Value, ExtError> {
    let millis = read_float64(codes::DATE, payload)?;
    Ok(Value::Date(DateValue::from_millis(millis)))
}
