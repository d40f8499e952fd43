//! Block decompression.
//!
//! The packed stream is self-delimiting only through the caller-supplied
//! output length: decoding consumes tokens until exactly that many bytes
//! have been produced. There is no packed-size field, no alignment marker,
//! and no checksum, which is why [`depack_from_stream`] exists — the file
//! layer hands the decoder a reader positioned at the start of a block and
//! the decoder takes only the bytes it needs.

use std::io::Read;

use super::bitio::{BitReader, BitSource, StreamBitReader};
use super::codec::{get_match_dist, get_match_len};
use crate::error::Error;

/// Token-decoding loop shared by the slice and stream entry points.
fn depack_bits<S: BitSource>(src: &mut S, dst: &mut [u8]) -> Result<usize, Error> {
    let out_len = dst.len();
    let mut out_pos = 0;

    while out_pos < out_len {
        if src.get(1)? != 0 {
            let len = get_match_len(src)?;
            let offs = get_match_dist(src)? + 1;

            if offs > out_pos || len > out_len - out_pos {
                return Err(Error::CorruptStream);
            }

            // Byte-at-a-time so an offset smaller than the length extends
            // the run it is copying from.
            let from = out_pos - offs;
            for i in 0..len {
                dst[out_pos + i] = dst[from + i];
            }
            out_pos += len;
        } else {
            dst[out_pos] = src.get(8)? as u8;
            out_pos += 1;
        }
    }

    Ok(out_pos)
}

/// Decompress the packed bytes in `src` into all of `dst`.
///
/// `dst.len()` must be the exact uncompressed size. Returns the number of
/// bytes produced (always `dst.len()`) or [`Error::CorruptStream`] if the
/// stream references bytes that do not exist or ends early.
pub fn depack(src: &[u8], dst: &mut [u8]) -> Result<usize, Error> {
    depack_bits(&mut BitReader::new(src), dst)
}

/// Decompress one block from a byte stream into all of `dst`.
///
/// Packed bytes are fetched one at a time, so nothing past the logical end
/// of the block is consumed from `src`. Wrap `src` in a `BufReader` when it
/// is a raw file or socket.
pub fn depack_from_stream<R: Read>(src: &mut R, dst: &mut [u8]) -> Result<usize, Error> {
    depack_bits(&mut StreamBitReader::new(src), dst)
}

/// Decompress `src` into a freshly allocated buffer of `unpacked_size`
/// bytes.
pub fn decompress_to_vec(src: &[u8], unpacked_size: usize) -> Result<Vec<u8>, Error> {
    let mut dst = vec![0u8; unpacked_size];
    depack(src, &mut dst)?;
    Ok(dst)
}
