//! Byte-exact fallback for extensions without a registered codec.

use extpack_buffers::Writer;

use crate::header::{write_ext, ExtHeader};
use crate::{ExtError, GenericExtValue};

/// Wraps an unresolved extension frame.
pub fn decode_generic(header: ExtHeader, payload: &[u8]) -> GenericExtValue {
    tracing::trace!(
        code = header.code,
        length = header.length,
        "no codec for extension type, keeping raw payload"
    );
    GenericExtValue::new(header.code, payload)
}

/// Re-frames a generic extension. The marker is chosen from the payload
/// length exactly as a canonical encoder would, so decoding and re-encoding a
/// canonical frame reproduces it byte-for-byte.
pub fn encode_generic(writer: &mut Writer, ext: &GenericExtValue) -> Result<(), ExtError> {
    write_ext(writer, ext.code, &ext.payload)
}
