//! `MsgPackDecoder` — core MessagePack decoder that hands extension frames to
//! an [`ExtCodec`].

use extpack_buffers::Reader;

use crate::{ExtCodec, ExtError, Value};

/// Deepest array/map nesting the decoder follows before giving up.
pub const MAX_DEPTH: usize = 512;

pub struct MsgPackDecoder<'c> {
    ext: &'c ExtCodec,
}

impl<'c> MsgPackDecoder<'c> {
    pub fn new(ext: &'c ExtCodec) -> Self {
        Self { ext }
    }

    /// Decodes the first value in `input`; trailing bytes are ignored.
    pub fn decode(&self, input: &[u8]) -> Result<Value, ExtError> {
        let mut reader = Reader::new(input);
        self.read_any(&mut reader)
    }

    pub fn read_any(&self, reader: &mut Reader<'_>) -> Result<Value, ExtError> {
        self.read_nested(reader, 0)
    }

    /// `depth` counts the containers already open around this value.
    fn read_nested(&self, reader: &mut Reader<'_>, depth: usize) -> Result<Value, ExtError> {
        let byte = reader.peek()?;

        // extension markers go to the dispatcher with the marker unread
        if matches!(byte, 0xc7..=0xc9 | 0xd4..=0xd8) {
            return self.ext.decode_from(reader);
        }
        reader.x += 1;

        // negative fixint: 0xe0–0xff → -32..–1
        if byte >= 0xe0 {
            return Ok(Value::Integer(byte as i8 as i64));
        }
        // positive fixint: 0x00–0x7f
        if byte <= 0x7f {
            return Ok(Value::Integer(byte as i64));
        }
        // fixmap: 0x80–0x8f
        if (0x80..=0x8f).contains(&byte) {
            return self.read_obj(reader, byte as usize & 0xf, depth);
        }
        // fixarray: 0x90–0x9f
        if (0x90..=0x9f).contains(&byte) {
            return self.read_arr(reader, byte as usize & 0xf, depth);
        }
        // fixstr: 0xa0–0xbf
        if (0xa0..=0xbf).contains(&byte) {
            return read_str(reader, byte as usize & 0x1f);
        }

        match byte {
            0xc0 => Ok(Value::Null),
            0xc1 => Ok(Value::Undefined),
            0xc2 => Ok(Value::Bool(false)),
            0xc3 => Ok(Value::Bool(true)),
            // bin8, bin16, bin32
            0xc4 => {
                let n = reader.u8()? as usize;
                Ok(Value::Bytes(reader.buf(n)?.to_vec()))
            }
            0xc5 => {
                let n = reader.u16()? as usize;
                Ok(Value::Bytes(reader.buf(n)?.to_vec()))
            }
            0xc6 => {
                let n = reader.u32()? as usize;
                Ok(Value::Bytes(reader.buf(n)?.to_vec()))
            }
            // float32, float64
            0xca => Ok(Value::Float(reader.f32()? as f64)),
            0xcb => Ok(Value::Float(reader.f64()?)),
            // uint8, uint16, uint32, uint64
            0xcc => Ok(Value::Integer(reader.u8()? as i64)),
            0xcd => Ok(Value::Integer(reader.u16()? as i64)),
            0xce => Ok(Value::Integer(reader.u32()? as i64)),
            0xcf => {
                let n = reader.u64()?;
                Ok(match i64::try_from(n) {
                    Ok(i) => Value::Integer(i),
                    Err(_) => Value::UInteger(n),
                })
            }
            // int8, int16, int32, int64
            0xd0 => Ok(Value::Integer(reader.i8()? as i64)),
            0xd1 => Ok(Value::Integer(reader.i16()? as i64)),
            0xd2 => Ok(Value::Integer(reader.i32()? as i64)),
            0xd3 => Ok(Value::Integer(reader.i64()?)),
            // str8, str16, str32
            0xd9 => {
                let n = reader.u8()? as usize;
                read_str(reader, n)
            }
            0xda => {
                let n = reader.u16()? as usize;
                read_str(reader, n)
            }
            0xdb => {
                let n = reader.u32()? as usize;
                read_str(reader, n)
            }
            // array16, array32
            0xdc => {
                let n = reader.u16()? as usize;
                self.read_arr(reader, n, depth)
            }
            0xdd => {
                let n = reader.u32()? as usize;
                self.read_arr(reader, n, depth)
            }
            // map16, map32
            0xde => {
                let n = reader.u16()? as usize;
                self.read_obj(reader, n, depth)
            }
            0xdf => {
                let n = reader.u32()? as usize;
                self.read_obj(reader, n, depth)
            }
            _ => Err(ExtError::UnrecognizedMarker(byte)),
        }
    }

    fn read_arr(
        &self,
        reader: &mut Reader<'_>,
        size: usize,
        depth: usize,
    ) -> Result<Value, ExtError> {
        let depth = enter(depth)?;
        // each element takes at least one byte
        let mut arr = Vec::with_capacity(size.min(reader.size()));
        for _ in 0..size {
            arr.push(self.read_nested(reader, depth)?);
        }
        Ok(Value::Array(arr))
    }

    fn read_obj(
        &self,
        reader: &mut Reader<'_>,
        size: usize,
        depth: usize,
    ) -> Result<Value, ExtError> {
        let depth = enter(depth)?;
        let mut obj = Vec::with_capacity(size.min(reader.size() / 2));
        for _ in 0..size {
            let key = match self.read_nested(reader, depth)? {
                Value::Str(key) => key,
                _ => return Err(ExtError::InvalidValue("map keys must be strings")),
            };
            let val = self.read_nested(reader, depth)?;
            obj.push((key, val));
        }
        Ok(Value::Object(obj))
    }
}

fn enter(depth: usize) -> Result<usize, ExtError> {
    if depth >= MAX_DEPTH {
        return Err(ExtError::DepthLimit(MAX_DEPTH));
    }
    Ok(depth + 1)
}

fn read_str(reader: &mut Reader<'_>, size: usize) -> Result<Value, ExtError> {
    Ok(Value::Str(reader.utf8(size)?.to_owned()))
}
