//! File-level block container.
//!
//! A compressed file is a bare sequence of blocks. Each block is a 4-byte
//! little-endian **uncompressed** length (at most [`BLOCK_SIZE`]) followed
//! by the packed bytes `pack` produced for that length. There is no file
//! header, no trailer, and no checksum; end-of-file ends the last block.
//! Blocks are independent, so a reader needs no state across them.

pub mod compress;
pub mod decompress;
pub mod file_io;

/// Maximum uncompressed bytes per block: 64 MiB.
pub const BLOCK_SIZE: usize = 64 << 20;

/// Byte length of the per-block uncompressed-size header.
pub const BLOCK_HEADER_SIZE: usize = 4;

pub use compress::{compress_filename, CompressResult};
pub use decompress::{decompress_filename, DecompressResult};
