//! CRUSH block compression core.
//!
//! Everything in this module operates on in-memory blocks: the bit-stream
//! primitives, the token codec and its cost model, the two match-finding
//! parsers, and the compression/decompression entry points. File framing
//! lives in [`crate::io`].

pub mod bitio;
pub mod codec;
pub mod compress;
pub mod decompress;
pub mod types;

pub(crate) mod btparse;
pub(crate) mod leparse;

pub use compress::{compress_to_vec, max_packed_size, pack, workmem_size, WORKMEM_WORD};
pub use decompress::{decompress_to_vec, depack, depack_from_stream};
