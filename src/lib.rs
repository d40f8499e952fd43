// crush — lossless block compressor, bit-compatible with the CRUSH
// container format by Ilya Muravyov.

pub mod block;
pub mod cli;
pub mod error;
pub mod io;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level re-exports for the primary API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by compression and decompression.
pub use error::Error;

/// Worst-case packed size for a given input size.
pub use block::compress::max_packed_size;

/// Bytes of work memory `pack` needs for a given input size and level.
pub use block::compress::workmem_size;

/// Size of one work-memory word in bytes.
pub use block::compress::WORKMEM_WORD;

/// One-shot block compression into a caller-supplied buffer.
pub use block::compress::pack;

/// One-shot block compression into a freshly allocated `Vec`.
pub use block::compress::compress_to_vec;

/// One-shot block decompression into a caller-supplied buffer.
pub use block::decompress::depack;

/// Block decompression reading packed bytes lazily from a stream.
pub use block::decompress::depack_from_stream;

/// One-shot block decompression into a freshly allocated `Vec`.
pub use block::decompress::decompress_to_vec;

/// Compression level bounds and defaults.
pub use block::types::{CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN, CLEVEL_OPT};

// ─────────────────────────────────────────────────────────────────────────────
// Version API
// ─────────────────────────────────────────────────────────────────────────────

pub const CRUSH_VERSION_MAJOR: i32 = 0;
pub const CRUSH_VERSION_MINOR: i32 = 2;
pub const CRUSH_VERSION_RELEASE: i32 = 1;
pub const CRUSH_VERSION_NUMBER: i32 =
    CRUSH_VERSION_MAJOR * 100 * 100 + CRUSH_VERSION_MINOR * 100 + CRUSH_VERSION_RELEASE;
pub const CRUSH_VERSION_STRING: &str = "0.2.1";

/// Returns the library version number (e.g. 201 for v0.2.1).
pub fn version_number() -> i32 {
    CRUSH_VERSION_NUMBER
}

/// Returns the library version string (e.g. `"0.2.1"`).
pub fn version_string() -> &'static str {
    CRUSH_VERSION_STRING
}
