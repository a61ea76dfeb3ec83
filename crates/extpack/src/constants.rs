//! Extension marker bytes and the built-in type code table.

/// One-byte MessagePack extension markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExtMarker {
    Ext8 = 0xc7,
    Ext16 = 0xc8,
    Ext32 = 0xc9,
    FixExt1 = 0xd4,
    FixExt2 = 0xd5,
    FixExt4 = 0xd6,
    FixExt8 = 0xd7,
    FixExt16 = 0xd8,
}

impl ExtMarker {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0xc7 => ExtMarker::Ext8,
            0xc8 => ExtMarker::Ext16,
            0xc9 => ExtMarker::Ext32,
            0xd4 => ExtMarker::FixExt1,
            0xd5 => ExtMarker::FixExt2,
            0xd6 => ExtMarker::FixExt4,
            0xd7 => ExtMarker::FixExt8,
            0xd8 => ExtMarker::FixExt16,
            _ => return None,
        })
    }

    /// Payload length implied by a fixext marker.
    pub fn fixed_len(self) -> Option<u32> {
        match self {
            ExtMarker::FixExt1 => Some(1),
            ExtMarker::FixExt2 => Some(2),
            ExtMarker::FixExt4 => Some(4),
            ExtMarker::FixExt8 => Some(8),
            ExtMarker::FixExt16 => Some(16),
            _ => None,
        }
    }

    /// Width in bytes of the explicit length field (0 for fixext markers).
    pub fn length_field_width(self) -> usize {
        match self {
            ExtMarker::Ext8 => 1,
            ExtMarker::Ext16 => 2,
            ExtMarker::Ext32 => 4,
            _ => 0,
        }
    }

    /// Marker a canonical encoder picks for a payload of `length` bytes.
    pub fn for_len(length: usize) -> Option<Self> {
        Some(match length {
            1 => ExtMarker::FixExt1,
            2 => ExtMarker::FixExt2,
            4 => ExtMarker::FixExt4,
            8 => ExtMarker::FixExt8,
            16 => ExtMarker::FixExt16,
            n if n <= 0xff => ExtMarker::Ext8,
            n if n <= 0xffff => ExtMarker::Ext16,
            n if n as u64 <= u32::MAX as u64 => ExtMarker::Ext32,
            _ => return None,
        })
    }
}

/// MessagePack float64 marker, the leading byte of Number and Date payloads.
pub const FLOAT64: u8 = 0xcb;

/// Type codes of the built-in packers.
///
/// All codes sit below 0x20 so the range 0x20..=0xff stays free for
/// application types and passes through untouched when unregistered.
pub mod codes {
    pub const REGEXP: u8 = 0x0a;
    pub const BOOLEAN: u8 = 0x0b;
    pub const STRING: u8 = 0x0c;
    pub const DATE: u8 = 0x0d;
    pub const ERROR: u8 = 0x0e;
    pub const NUMBER: u8 = 0x0f;
}
