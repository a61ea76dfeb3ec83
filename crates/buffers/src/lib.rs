//! Byte buffers for the extpack codecs.
//!
//! [`Writer`] is an auto-growing output buffer with big-endian primitive
//! writers. [`Reader`] walks a borrowed byte slice and reports running off the
//! end as a [`BufferError`] instead of panicking.

mod error;
mod reader;
mod writer;

pub use error::BufferError;
pub use reader::Reader;
pub use writer::Writer;
