//! Byte-level reading and writing primitives for the wirepack codec.
//!
//! [`ByteCursor`] is a bounded, forward-only view over a byte slice; every
//! read is checked and fails with [`BufferError::OutOfRange`] instead of
//! panicking. [`Writer`] is its counterpart on the encode side: an
//! auto-growing byte sink with big-endian typed writes.

mod cursor;
mod writer;

pub use cursor::ByteCursor;
pub use writer::Writer;

use thiserror::Error;

/// Error produced by checked buffer reads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A read requested more bytes than the buffer has left.
    #[error("requested {requested} bytes but only {remaining} remain")]
    OutOfRange { requested: usize, remaining: usize },
}
