//! Block compression entry points: buffer sizing, work-memory sizing, and
//! the level → parser dispatch.

use super::bitio::BitWriter;
use super::codec::put_literal;
use super::types::{level_params, Strategy, MIN_MATCH};
use super::{btparse, leparse};
use crate::error::Error;

/// Size of a word of work memory, in bytes.
pub const WORKMEM_WORD: usize = core::mem::size_of::<usize>();

/// Worst-case packed size for a `src_size`-byte input.
///
/// An incompressible input packs as all literals: 9 bits per byte plus
/// padding, which this bound covers with margin.
#[inline]
pub const fn max_packed_size(src_size: usize) -> usize {
    src_size + src_size / 8 + 64
}

/// Bytes of work memory [`pack`] needs for a `src_size`-byte input at
/// `level`, or [`Error::InvalidLevel`] outside `5..=10`.
///
/// Work memory is scratch: nothing in it survives a call, so one allocation
/// may be pooled across any calls with equal or smaller requirements.
pub fn workmem_size(src_size: usize, level: i32) -> Result<usize, Error> {
    let params = level_params(level).ok_or(Error::InvalidLevel(level))?;
    let words = match params.strat {
        Strategy::LeParse => leparse::workmem_words(src_size),
        Strategy::BtParse => btparse::workmem_words(src_size),
    };
    Ok(words * WORKMEM_WORD)
}

/// Compress `src` into `dst` at `level` (5–10) and return the packed size.
///
/// `dst` must hold at least [`max_packed_size`]`(src.len())` bytes and
/// `workmem` at least [`workmem_size`]`(src.len(), level)` bytes' worth of
/// words; undersized buffers panic. An empty input packs to zero bytes.
pub fn pack(
    src: &[u8],
    dst: &mut [u8],
    workmem: &mut [usize],
    level: i32,
) -> Result<usize, Error> {
    let params = level_params(level).ok_or(Error::InvalidLevel(level))?;

    if src.is_empty() {
        return Ok(0);
    }

    // Below MIN_MATCH + 1 bytes no match is expressible; the parsers are
    // never entered and the work memory is untouched.
    if src.len() < MIN_MATCH + 1 {
        let mut bw = BitWriter::new(dst);
        for &byte in src {
            put_literal(&mut bw, byte);
        }
        return Ok(bw.finalize());
    }

    let packed = match params.strat {
        Strategy::LeParse => leparse::pack(src, dst, workmem, params.max_depth, params.accept_len),
        Strategy::BtParse => btparse::pack(src, dst, workmem, params.max_depth, params.accept_len),
    };
    Ok(packed)
}

/// Compress `src` at `level` into a freshly allocated buffer, sizing the
/// destination and work memory internally.
pub fn compress_to_vec(src: &[u8], level: i32) -> Result<Vec<u8>, Error> {
    let mut dst = vec![0u8; max_packed_size(src.len())];
    let mut workmem = vec![0usize; workmem_size(src.len(), level)? / WORKMEM_WORD];
    let packed = pack(src, &mut dst, &mut workmem, level)?;
    dst.truncate(packed);
    Ok(dst)
}
