//! Regular expressions: `source`, `/`, `flags`.
//!
//! Flags never contain `/`, so the last slash in the payload is always the
//! separator even when the source holds escaped slashes.

use crate::constants::codes;
use crate::{ExtError, RegExpValue, Value};

pub fn encode_regexp(value: &Value) -> Result<Vec<u8>, ExtError> {
    let re = match value {
        Value::RegExp(re) => re,
        other => return Err(ExtError::UnsupportedType(other.type_name())),
    };
    if re.flags.contains('/') {
        return Err(ExtError::InvalidValue("regular expression flags may not contain '/'"));
    }
    let mut out = Vec::with_capacity(re.source.len() + 1 + re.flags.len());
    out.extend_from_slice(re.source.as_bytes());
    out.push(b'/');
    out.extend_from_slice(re.flags.as_bytes());
    Ok(out)
}

pub fn decode_regexp(payload: &[u8]) -> Result<Value, ExtError> {
    let text = std::str::from_utf8(payload).map_err(|_| ExtError::InvalidUtf8)?;
    let (source, flags) = text.rsplit_once('/').ok_or(ExtError::InvalidPayload {
        code: codes::REGEXP,
        reason: "missing flags separator",
    })?;
    Ok(Value::RegExp(RegExpValue::new(source, flags)))
}
