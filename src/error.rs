//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by the compression and decompression entry points.
///
/// Caller-contract violations (undersized destination or work memory) are
/// not validated here; they panic at the offending slice access.
#[derive(Debug, Error)]
pub enum Error {
    /// Compression level outside the supported `5..=10` range.
    #[error("invalid compression level {0} (supported levels are 5..=10)")]
    InvalidLevel(i32),

    /// The packed stream is inconsistent with the declared output length: a
    /// match referenced bytes not yet produced, ran past the end of the
    /// output, or the input ended early.
    #[error("corrupt packed stream")]
    CorruptStream,

    /// I/O failure while reading packed bytes from a stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
