//! Error objects: kind name and message as two u32-prefixed UTF-8 fields.

use extpack_buffers::{Reader, Writer};

use crate::constants::codes;
use crate::{ErrorKind, ErrorValue, ExtError, Value};

pub fn encode_error(value: &Value) -> Result<Vec<u8>, ExtError> {
    let err = match value {
        Value::Error(err) => err,
        other => return Err(ExtError::UnsupportedType(other.type_name())),
    };
    let name = err.name();
    let mut writer = Writer::with_alloc_size(8 + name.len() + err.message.len());
    write_field(&mut writer, name)?;
    write_field(&mut writer, &err.message)?;
    Ok(writer.flush())
}

pub fn decode_error(payload: &[u8]) -> Result<Value, ExtError> {
    let mut reader = Reader::new(payload);
    let name = read_field(&mut reader)?;
    let message = read_field(&mut reader)?;
    if reader.size() != 0 {
        return Err(ExtError::InvalidPayload {
            code: codes::ERROR,
            reason: "trailing bytes after error message",
        });
    }
    Ok(Value::Error(ErrorValue::new(
        ErrorKind::from_name(name),
        message,
    )))
}

fn write_field(writer: &mut Writer, field: &str) -> Result<(), ExtError> {
    let len = u32::try_from(field.len()).map_err(|_| ExtError::LengthOverflow(field.len()))?;
    writer.u32(len);
    writer.utf8(field);
    Ok(())
}

fn read_field<'a>(reader: &mut Reader<'a>) -> Result<&'a str, ExtError> {
    let truncated = || ExtError::InvalidPayload {
        code: codes::ERROR,
        reason: "truncated error field",
    };
    let len = reader.u32().map_err(|_| truncated())? as usize;
    if len > reader.size() {
        return Err(truncated());
    }
    Ok(reader.utf8(len)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let value = Value::Error(ErrorValue::new(ErrorKind::RangeError, "bad"));
        let payload = encode_error(&value).unwrap();
        let mut expected = vec![0, 0, 0, 10];
        expected.extend_from_slice(b"RangeError");
        expected.extend_from_slice(&[0, 0, 0, 3]);
        expected.extend_from_slice(b"bad");
        assert_eq!(payload, expected);
        assert_eq!(decode_error(&payload), Ok(value));
    }

    #[test]
    fn message_with_delimiters_and_unicode() {
        let value = Value::Error(ErrorValue::new(
            ErrorKind::SyntaxError,
            "a:b\0c\u{1f600}\n\"quoted\"",
        ));
        let payload = encode_error(&value).unwrap();
        assert_eq!(decode_error(&payload), Ok(value));
    }

    #[test]
    fn unknown_kind_keeps_name() {
        let value = Value::Error(ErrorValue::new(
            ErrorKind::Unknown("AggregateError".into()),
            "many",
        ));
        let payload = encode_error(&value).unwrap();
        let Value::Error(decoded) = decode_error(&payload).unwrap() else {
            panic!("expected error value");
        };
        assert_eq!(decoded.kind, ErrorKind::Unknown("AggregateError".into()));
        assert_eq!(decoded.name(), "AggregateError");
    }

    #[test]
    fn malformed_payloads() {
        assert!(matches!(
            decode_error(&[0, 0, 0, 9, b'E']),
            Err(ExtError::InvalidPayload { .. })
        ));
        assert!(matches!(
            decode_error(&[0, 0]),
            Err(ExtError::InvalidPayload { .. })
        ));
        let mut trailing = encode_error(&Value::Error(ErrorValue::new(ErrorKind::Error, ""))).unwrap();
        trailing.push(0);
        assert!(matches!(
            decode_error(&trailing),
            Err(ExtError::InvalidPayload { .. })
        ));
    }
}
