//! [`Value`] — the value tree handled by the host codec and the extension
//! dispatcher, plus the object kinds carried over extension types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A decoded or to-be-encoded value.
///
/// The first block of variants maps onto core MessagePack types. Everything
/// after `Object` has no native representation and travels as an extension.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// MsgPack nil
    Null,
    /// 0xc1, never used by the core format
    Undefined,
    Bool(bool),
    /// Signed integer in i64 range
    Integer(i64),
    /// Unsigned integer > i64::MAX
    UInteger(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<Value>),
    /// Map with string keys, in wire order
    Object(Vec<(String, Value)>),
    // ---- extension-only ----
    Boxed(Boxed),
    Date(DateValue),
    Error(ErrorValue),
    RegExp(RegExpValue),
    /// Extension the registry could not interpret, kept byte-for-byte
    Ext(GenericExtValue),
    /// Application object for a user-registered extension type
    Opaque(OpaqueValue),
}

impl Value {
    /// Short name of the variant, used in error messages and logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "bool",
            Value::Integer(_) | Value::UInteger(_) => "integer",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Boxed(Boxed::Bool(_)) => "boxed boolean",
            Value::Boxed(Boxed::Number(_)) => "boxed number",
            Value::Boxed(Boxed::String(_)) => "boxed string",
            Value::Date(_) => "date",
            Value::Error(_) => "error",
            Value::RegExp(_) => "regexp",
            Value::Ext(_) => "extension",
            Value::Opaque(v) => v.type_name(),
        }
    }

    /// Wraps an application object for a type registered with
    /// [`ExtRegistry::register_type`](crate::ExtRegistry::register_type).
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(OpaqueValue::new(value))
    }
}

/// A primitive wrapped in an object, distinct from the bare primitive.
///
/// Equality compares the wrapped values.
#[derive(Debug, Clone, PartialEq)]
pub enum Boxed {
    Bool(bool),
    Number(f64),
    String(String),
}

/// Point in time as milliseconds since the Unix epoch.
///
/// Fractional and non-finite values are kept as-is; they only matter when
/// converting to a calendar type.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DateValue(pub f64);

impl DateValue {
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis() as f64)
    }

    pub fn millis(self) -> f64 {
        self.0
    }

    /// Converts to a UTC timestamp, truncating sub-millisecond precision.
    /// Returns `None` for non-finite or out-of-range values.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        Utc.timestamp_millis_opt(self.0.trunc() as i64).single()
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis() as f64)
    }
}

/// Kind of an [`ErrorValue`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Error,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    UriError,
    /// Any other name, preserved verbatim.
    Unknown(String),
}

impl ErrorKind {
    /// The seven built-in kinds, in their conventional order.
    pub const BUILTIN: [ErrorKind; 7] = [
        ErrorKind::Error,
        ErrorKind::EvalError,
        ErrorKind::RangeError,
        ErrorKind::ReferenceError,
        ErrorKind::SyntaxError,
        ErrorKind::TypeError,
        ErrorKind::UriError,
    ];

    pub fn name(&self) -> &str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::UriError => "URIError",
            ErrorKind::Unknown(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "Error" => ErrorKind::Error,
            "EvalError" => ErrorKind::EvalError,
            "RangeError" => ErrorKind::RangeError,
            "ReferenceError" => ErrorKind::ReferenceError,
            "SyntaxError" => ErrorKind::SyntaxError,
            "TypeError" => ErrorKind::TypeError,
            "URIError" => ErrorKind::UriError,
            other => ErrorKind::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error object: kind plus message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorValue {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorValue {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }
}

/// Formats as `Name: message`, or just `Name` when the message is empty.
impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(self.name())
        } else {
            write!(f, "{}: {}", self.name(), self.message)
        }
    }
}

impl std::error::Error for ErrorValue {}

/// Regular expression as pattern source plus flag string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegExpValue {
    pub source: String,
    pub flags: String,
}

impl RegExpValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    /// Compiles the pattern with the `regex` engine.
    ///
    /// `i`, `m` and `s` become inline flags; `g`, `y`, `u` and `d` describe
    /// matching state rather than the pattern and are ignored. Any other flag
    /// is rejected, as is a pattern the engine cannot parse.
    pub fn to_regex(&self) -> Result<regex::Regex, regex::Error> {
        let mut inline = String::new();
        for flag in self.flags.chars() {
            match flag {
                'i' | 'm' | 's' => inline.push(flag),
                'g' | 'y' | 'u' | 'd' => {}
                other => {
                    return Err(regex::Error::Syntax(format!(
                        "unsupported regular expression flag '{other}'"
                    )))
                }
            }
        }
        let source = self.source.replace("\\/", "/");
        if inline.is_empty() {
            regex::Regex::new(&source)
        } else {
            regex::Regex::new(&format!("(?{inline}){source}"))
        }
    }
}

/// Formats as `/source/flags`.
impl fmt::Display for RegExpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Extension whose type code has no registered codec.
///
/// Re-encoding reproduces the original frame byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericExtValue {
    pub code: u8,
    pub payload: Vec<u8>,
}

impl GenericExtValue {
    pub fn new(code: u8, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            payload: payload.into(),
        }
    }
}

/// Shared, type-erased application object.
///
/// Two opaque values are equal only when they share the same allocation; use
/// [`OpaqueValue::downcast_ref`] to compare contents.
#[derive(Clone)]
pub struct OpaqueValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.type_name).finish()
    }
}
