//! `ExtCodec` — the extension entry point the host MessagePack codec calls.

use extpack_buffers::{Reader, Writer};
use serde::{Deserialize, Serialize};

use crate::header::{read_ext, write_ext};
use crate::packer::register_builtins;
use crate::passthrough::{decode_generic, encode_generic};
use crate::{ExtError, ExtRegistry, Value};

/// Options for building an [`ExtCodec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtCodecOptions {
    /// Register the built-in packers (boxed primitives, Date, Error, RegExp).
    pub builtins: bool,
    /// Initial buffer size for [`ExtCodec::encode`].
    pub alloc_size: usize,
}

impl Default for ExtCodecOptions {
    fn default() -> Self {
        Self {
            builtins: true,
            alloc_size: 256,
        }
    }
}

/// Encodes values to extension frames and decodes frames back to values.
///
/// Owns its [`ExtRegistry`]. Register custom types through
/// [`ExtCodec::registry_mut`] before sharing the codec; afterwards it is only
/// read, and it is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct ExtCodec {
    registry: ExtRegistry,
    options: ExtCodecOptions,
}

impl Default for ExtCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtCodec {
    /// Codec with the built-in packers registered.
    pub fn new() -> Self {
        Self::with_options(ExtCodecOptions::default())
    }

    /// Codec with an empty registry: every extension decodes to
    /// [`GenericExtValue`](crate::GenericExtValue).
    pub fn bare() -> Self {
        Self::with_options(ExtCodecOptions {
            builtins: false,
            ..ExtCodecOptions::default()
        })
    }

    pub fn with_options(options: ExtCodecOptions) -> Self {
        let mut registry = ExtRegistry::new();
        if options.builtins {
            register_builtins(&mut registry);
        }
        Self { registry, options }
    }

    pub fn registry(&self) -> &ExtRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ExtRegistry {
        &mut self.registry
    }

    pub fn options(&self) -> &ExtCodecOptions {
        &self.options
    }

    /// Shorthand for [`ExtRegistry::register`].
    pub fn register_extension_type<M, E, D>(&mut self, code: u8, matches: M, encode: E, decode: D)
    where
        M: Fn(&Value) -> bool + Send + Sync + 'static,
        E: Fn(&Value) -> Result<Vec<u8>, ExtError> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<Value, ExtError> + Send + Sync + 'static,
    {
        self.registry.register(code, matches, encode, decode);
    }

    // ----------------------------------------------------------------
    // Encoding

    /// Encodes `value` as one extension frame.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, ExtError> {
        let mut writer = Writer::with_alloc_size(self.options.alloc_size);
        self.encode_into(&mut writer, value)?;
        Ok(writer.flush())
    }

    /// Appends the extension frame for `value` to `writer`. Writes nothing on
    /// error.
    pub fn encode_into(&self, writer: &mut Writer, value: &Value) -> Result<(), ExtError> {
        if let Some(entry) = self.registry.resolve_for_encode(value) {
            let payload = entry.encode(value)?;
            tracing::trace!(
                code = entry.code,
                length = payload.len(),
                "encoding registered extension"
            );
            return write_ext(writer, entry.code, &payload);
        }
        match value {
            Value::Ext(ext) => encode_generic(writer, ext),
            other => {
                tracing::debug!(kind = other.type_name(), "no extension type matches value");
                Err(ExtError::UnsupportedType(other.type_name()))
            }
        }
    }

    // ----------------------------------------------------------------
    // Decoding

    /// Decodes the extension frame at the start of `bytes`. Bytes after the
    /// frame are ignored.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, ExtError> {
        let mut reader = Reader::new(bytes);
        self.decode_from(&mut reader)
    }

    /// Reads one extension frame (marker included) from `reader`.
    pub fn decode_from(&self, reader: &mut Reader<'_>) -> Result<Value, ExtError> {
        let (header, payload) = read_ext(reader)?;
        match self.registry.resolve_for_decode(header.code) {
            Some(entry) => entry.decode(payload),
            None => Ok(Value::Ext(decode_generic(header, payload))),
        }
    }
}
