use thiserror::Error;

/// Errors raised by [`Reader`](crate::Reader).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer: need {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
