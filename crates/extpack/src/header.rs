//! Extension header codec: payload length <-> marker, type code, length field.

use extpack_buffers::{Reader, Writer};

use crate::constants::ExtMarker;
use crate::ExtError;

/// Parsed extension header. Lives only for the duration of one decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtHeader {
    pub code: u8,
    pub length: u32,
}

/// Writes the marker, length field (if any) and type code for a payload of
/// `length` bytes. Nothing is written on error.
pub fn write_ext_header(writer: &mut Writer, code: u8, length: usize) -> Result<(), ExtError> {
    let marker = ExtMarker::for_len(length).ok_or(ExtError::LengthOverflow(length))?;
    match marker {
        ExtMarker::Ext8 => {
            writer.u16(((marker as u16) << 8) | length as u16);
            writer.u8(code);
        }
        ExtMarker::Ext16 => {
            writer.u8u16(marker as u8, length as u16);
            writer.u8(code);
        }
        ExtMarker::Ext32 => {
            writer.u8u32(marker as u8, length as u32);
            writer.u8(code);
        }
        _ => writer.u16(((marker as u16) << 8) | code as u16),
    }
    Ok(())
}

/// Writes a complete extension frame: header followed by the payload.
pub fn write_ext(writer: &mut Writer, code: u8, payload: &[u8]) -> Result<(), ExtError> {
    write_ext_header(writer, code, payload.len())?;
    writer.buf(payload);
    Ok(())
}

/// Reads an extension header starting at the marker byte.
pub fn read_ext_header(reader: &mut Reader<'_>) -> Result<ExtHeader, ExtError> {
    let byte = reader.u8()?;
    let marker = ExtMarker::from_byte(byte).ok_or(ExtError::UnrecognizedMarker(byte))?;
    read_ext_header_after_marker(reader, marker)
}

/// Reads the length field (for explicit-length markers) and type code that
/// follow an already consumed marker.
pub fn read_ext_header_after_marker(
    reader: &mut Reader<'_>,
    marker: ExtMarker,
) -> Result<ExtHeader, ExtError> {
    let length = match marker {
        ExtMarker::Ext8 => reader.u8()? as u32,
        ExtMarker::Ext16 => reader.u16()? as u32,
        ExtMarker::Ext32 => reader.u32()?,
        fixed => fixed.fixed_len().unwrap_or_default(),
    };
    let code = reader.u8()?;
    Ok(ExtHeader { code, length })
}

/// Reads a full extension frame and returns its header and borrowed payload.
pub fn read_ext<'a>(reader: &mut Reader<'a>) -> Result<(ExtHeader, &'a [u8]), ExtError> {
    let header = read_ext_header(reader)?;
    let payload = reader.buf(header.length as usize)?;
    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(code: u8, length: usize) -> Vec<u8> {
        let mut writer = Writer::new();
        write_ext(&mut writer, code, &vec![0x5a; length]).unwrap();
        writer.flush()
    }

    #[test]
    fn fixed_sizes_use_fixext_markers() {
        for (len, marker) in [(1, 0xd4), (2, 0xd5), (4, 0xd6), (8, 0xd7), (16, 0xd8)] {
            let bytes = frame(0x21, len);
            assert_eq!(bytes[0], marker);
            assert_eq!(bytes[1], 0x21);
            assert_eq!(bytes.len(), 2 + len);
        }
    }

    #[test]
    fn other_sizes_use_smallest_explicit_marker() {
        assert_eq!(&frame(0x21, 0)[..3], &[0xc7, 0x00, 0x21]);
        assert_eq!(&frame(0x21, 9)[..3], &[0xc7, 0x09, 0x21]);
        assert_eq!(&frame(0x21, 0xff)[..3], &[0xc7, 0xff, 0x21]);
        assert_eq!(&frame(0x21, 0x100)[..4], &[0xc8, 0x01, 0x00, 0x21]);
        assert_eq!(
            &frame(0x21, 0x1_0000)[..6],
            &[0xc9, 0x00, 0x01, 0x00, 0x00, 0x21]
        );
    }

    #[test]
    fn read_back_every_size_class() {
        for len in [0usize, 1, 2, 3, 4, 8, 16, 17, 0xff, 0x100, 0xffff, 0x1_0000] {
            let bytes = frame(0x7f, len);
            let mut reader = Reader::new(&bytes);
            let (header, payload) = read_ext(&mut reader).unwrap();
            assert_eq!(header, ExtHeader { code: 0x7f, length: len as u32 });
            assert_eq!(payload.len(), len);
            assert_eq!(reader.size(), 0);
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_payload_is_rejected_before_writing() {
        assert_eq!(ExtMarker::for_len(u32::MAX as usize), Some(ExtMarker::Ext32));
        let mut writer = Writer::new();
        let length = u32::MAX as usize + 1;
        assert_eq!(
            write_ext_header(&mut writer, 0x20, length),
            Err(ExtError::LengthOverflow(length))
        );
        assert_eq!(writer.pending(), 0);
    }

    #[test]
    fn unrecognized_marker() {
        let mut reader = Reader::new(&[0xc4, 0x01, 0x00]);
        assert_eq!(read_ext(&mut reader), Err(ExtError::UnrecognizedMarker(0xc4)));
    }

    #[test]
    fn truncated_length_field() {
        let mut reader = Reader::new(&[0xc8, 0x01]);
        assert_eq!(
            read_ext(&mut reader),
            Err(ExtError::TruncatedInput { needed: 2, remaining: 1 })
        );
    }

    #[test]
    fn truncated_payload() {
        let mut reader = Reader::new(&[0xd6, 0x01, 0xaa, 0xbb]);
        assert_eq!(
            read_ext(&mut reader),
            Err(ExtError::TruncatedInput { needed: 4, remaining: 2 })
        );
    }

    #[test]
    fn empty_input_is_truncated() {
        let mut reader = Reader::new(&[]);
        assert_eq!(
            read_ext_header(&mut reader),
            Err(ExtError::TruncatedInput { needed: 1, remaining: 0 })
        );
    }
}
