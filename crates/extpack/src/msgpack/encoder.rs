//! `MsgPackEncoder` — core MessagePack encoder that hands non-native values to
//! an [`ExtCodec`].

use extpack_buffers::Writer;

use crate::{ExtCodec, ExtError, Value};

pub struct MsgPackEncoder<'c> {
    pub writer: Writer,
    ext: &'c ExtCodec,
}

impl<'c> MsgPackEncoder<'c> {
    pub fn new(ext: &'c ExtCodec) -> Self {
        Self {
            writer: Writer::with_alloc_size(ext.options().alloc_size),
            ext,
        }
    }

    /// Encodes one value. On error nothing from this call stays in the
    /// writer.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, ExtError> {
        self.writer.reset();
        if let Err(err) = self.write_any(value) {
            tracing::debug!(
                discarded = self.writer.pending(),
                error = %err,
                "dropping partial msgpack output"
            );
            self.writer.discard();
            return Err(err);
        }
        Ok(self.writer.flush())
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), ExtError> {
        match value {
            Value::Null => self.writer.u8(0xc0),
            Value::Undefined => self.writer.u8(0xc1),
            Value::Bool(b) => self.writer.u8(if *b { 0xc3 } else { 0xc2 }),
            Value::Integer(i) => self.write_integer(*i),
            Value::UInteger(u) => self.write_u_integer(*u),
            Value::Float(f) => self.writer.u8f64(0xcb, *f),
            Value::Bytes(b) => self.write_bin(b)?,
            Value::Str(s) => self.write_str(s)?,
            Value::Array(arr) => {
                self.write_arr_hdr(arr.len())?;
                for item in arr {
                    self.write_any(item)?;
                }
            }
            Value::Object(obj) => {
                self.write_obj_hdr(obj.len())?;
                for (key, val) in obj {
                    self.write_str(key)?;
                    self.write_any(val)?;
                }
            }
            other => self.ext.encode_into(&mut self.writer, other)?,
        }
        Ok(())
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -0x20 {
            // negative fixint: 0xe0..0xff
            self.writer.u8(int as i8 as u8);
        } else if int >= i8::MIN as i64 {
            self.writer.u16(0xd000 | (int as i8 as u8) as u16);
        } else if int >= i16::MIN as i64 {
            self.writer.u8u16(0xd1, int as i16 as u16);
        } else if int >= i32::MIN as i64 {
            self.writer.u8u32(0xd2, int as i32 as u32);
        } else {
            self.writer.u8u64(0xd3, int as u64);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        if uint <= 0x7f {
            self.writer.u8(uint as u8);
        } else if uint <= 0xff {
            self.writer.u16(0xcc00 | uint as u16);
        } else if uint <= 0xffff {
            self.writer.u8u16(0xcd, uint as u16);
        } else if uint <= 0xffff_ffff {
            self.writer.u8u32(0xce, uint as u32);
        } else {
            self.writer.u8u64(0xcf, uint);
        }
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), ExtError> {
        let length = s.len();
        if length <= 0x1f {
            self.writer.u8(0xa0 | length as u8);
        } else if length <= 0xff {
            self.writer.u16(0xd900 | length as u16);
        } else if length <= 0xffff {
            self.writer.u8u16(0xda, length as u16);
        } else {
            self.writer.u8u32(0xdb, fits_u32(length)?);
        }
        self.writer.utf8(s);
        Ok(())
    }

    pub fn write_bin(&mut self, buf: &[u8]) -> Result<(), ExtError> {
        let length = buf.len();
        if length <= 0xff {
            self.writer.u16(0xc400 | length as u16);
        } else if length <= 0xffff {
            self.writer.u8u16(0xc5, length as u16);
        } else {
            self.writer.u8u32(0xc6, fits_u32(length)?);
        }
        self.writer.buf(buf);
        Ok(())
    }

    pub fn write_arr_hdr(&mut self, length: usize) -> Result<(), ExtError> {
        if length <= 0xf {
            self.writer.u8(0x90 | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(0xdc, length as u16);
        } else {
            self.writer.u8u32(0xdd, fits_u32(length)?);
        }
        Ok(())
    }

    pub fn write_obj_hdr(&mut self, length: usize) -> Result<(), ExtError> {
        if length <= 0xf {
            self.writer.u8(0x80 | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(0xde, length as u16);
        } else {
            self.writer.u8u32(0xdf, fits_u32(length)?);
        }
        Ok(())
    }
}

fn fits_u32(length: usize) -> Result<u32, ExtError> {
    u32::try_from(length).map_err(|_| ExtError::LengthOverflow(length))
}
