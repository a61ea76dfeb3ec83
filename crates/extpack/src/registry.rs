//! Ordered extension type registry.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{ExtError, Value};

pub type MatchFn = dyn Fn(&Value) -> bool + Send + Sync;
pub type EncodeFn = dyn Fn(&Value) -> Result<Vec<u8>, ExtError> + Send + Sync;
pub type DecodeFn = dyn Fn(&[u8]) -> Result<Value, ExtError> + Send + Sync;

/// One registered extension type.
#[derive(Clone)]
pub struct RegistryEntry {
    pub code: u8,
    matches: Arc<MatchFn>,
    encode: Arc<EncodeFn>,
    decode: Arc<DecodeFn>,
}

impl RegistryEntry {
    pub fn matches(&self, value: &Value) -> bool {
        (self.matches)(value)
    }

    /// Produces the payload (without header) for `value`.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, ExtError> {
        (self.encode)(value)
    }

    pub fn decode(&self, payload: &[u8]) -> Result<Value, ExtError> {
        (self.decode)(payload)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("code", &format_args!("0x{:02x}", self.code))
            .finish_non_exhaustive()
    }
}

/// Maps values to encoders and type codes to decoders.
///
/// Entries keep registration order and encode-side lookup returns the first
/// entry whose predicate accepts the value, so overlapping predicates must be
/// registered most-specific first and any catch-all last. Each code appears at
/// most once: registering a used code replaces that entry in place.
///
/// The registry does no locking. Configure it up front, then share it
/// read-only or guard it with an external lock.
#[derive(Clone, Default)]
pub struct ExtRegistry {
    entries: Vec<RegistryEntry>,
    by_code: Vec<Option<usize>>,
}

impl ExtRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_code: vec![None; 256],
        }
    }

    pub fn register<M, E, D>(&mut self, code: u8, matches: M, encode: E, decode: D)
    where
        M: Fn(&Value) -> bool + Send + Sync + 'static,
        E: Fn(&Value) -> Result<Vec<u8>, ExtError> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<Value, ExtError> + Send + Sync + 'static,
    {
        let entry = RegistryEntry {
            code,
            matches: Arc::new(matches),
            encode: Arc::new(encode),
            decode: Arc::new(decode),
        };
        if self.by_code.is_empty() {
            self.by_code = vec![None; 256];
        }
        match self.by_code[code as usize] {
            Some(index) => {
                tracing::warn!(code, "extension type code registered twice, replacing codec");
                self.entries[index] = entry;
            }
            None => {
                tracing::debug!(code, "registered extension type");
                self.by_code[code as usize] = Some(self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Registers an application type carried as [`Value::Opaque`].
    ///
    /// The predicate matches opaque values holding a `T`; the decoder wraps
    /// the decoded `T` into a fresh opaque value.
    pub fn register_type<T, E, D>(&mut self, code: u8, encode: E, decode: D)
    where
        T: Any + Send + Sync,
        E: Fn(&T) -> Result<Vec<u8>, ExtError> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<T, ExtError> + Send + Sync + 'static,
    {
        self.register(
            code,
            |value| matches!(value, Value::Opaque(v) if v.is::<T>()),
            move |value| match value {
                Value::Opaque(v) => match v.downcast_ref::<T>() {
                    Some(inner) => encode(inner),
                    None => Err(ExtError::UnsupportedType(v.type_name())),
                },
                other => Err(ExtError::UnsupportedType(other.type_name())),
            },
            move |payload| decode(payload).map(Value::opaque),
        );
    }

    /// Removes the entry for `code`, keeping the order of the others.
    pub fn unregister(&mut self, code: u8) -> Option<RegistryEntry> {
        let index = self.by_code.get_mut(code as usize)?.take()?;
        let entry = self.entries.remove(index);
        for slot in self.by_code.iter_mut().flatten() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(entry)
    }

    pub fn resolve_for_encode(&self, value: &Value) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.matches(value))
    }

    pub fn resolve_for_decode(&self, code: u8) -> Option<&RegistryEntry> {
        let index = (*self.by_code.get(code as usize)?)?;
        self.entries.get(index)
    }

    /// Registered codes in match order.
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.iter().map(|entry| entry.code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExtRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
