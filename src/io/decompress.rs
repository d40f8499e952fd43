//! File decompression from the block container.
//!
//! The container stores no packed size, so each block is decoded straight
//! off the input stream: read the 4-byte uncompressed length, then let the
//! stream decoder consume exactly the packed bytes it needs. A clean EOF
//! before a header ends the file; an EOF anywhere else is a truncated
//! stream.

use std::io::{self, BufReader, Read, Write};

use crate::block::decompress::depack_from_stream;
use crate::displaylevel;
use crate::error::Error;
use crate::io::file_io::{open_dst_file, open_src_file};
use crate::io::{BLOCK_HEADER_SIZE, BLOCK_SIZE};

/// Statistics from a successful decompression run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecompressResult {
    /// Total bytes consumed from the packed source, headers included.
    pub bytes_read: u64,
    /// Total decompressed bytes written.
    pub bytes_written: u64,
}

/// Read exactly `buf.len()` bytes, returning `Ok(false)` on a clean EOF
/// before the first byte, `Ok(true)` on success, or an error if the stream
/// ends mid-read.
fn read_exact_or_eof<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    // A single-byte first read distinguishes clean end-of-file from a
    // truncated header.
    let n = src.read(&mut buf[..1])?;
    if n == 0 {
        return Ok(false);
    }
    src.read_exact(&mut buf[1..])?;
    Ok(true)
}

/// Decompress `input_filename` into `output_filename`.
pub fn decompress_filename(
    input_filename: &str,
    output_filename: &str,
) -> Result<DecompressResult, Error> {
    // Buffered so the decoder's single-byte refills stay cheap; the
    // buffering never over-consumes the *file* because every buffered byte
    // belongs to this file's blocks.
    let mut reader = BufReader::new(open_src_file(input_filename)?);
    let mut writer = open_dst_file(output_filename)?;

    let mut header = [0u8; BLOCK_HEADER_SIZE];
    let mut dst_buf: Vec<u8> = Vec::new();

    let mut bytes_read: u64 = 0;
    let mut bytes_written: u64 = 0;

    loop {
        if !read_exact_or_eof(&mut reader, &mut header)? {
            break;
        }
        bytes_read += BLOCK_HEADER_SIZE as u64;

        let n = u32::from_le_bytes(header) as usize;
        if n > BLOCK_SIZE {
            return Err(Error::CorruptStream);
        }
        if n > dst_buf.len() {
            dst_buf.resize(n, 0);
        }

        depack_from_stream(&mut reader, &mut dst_buf[..n])?;
        writer.write_all(&dst_buf[..n])?;
        bytes_written += n as u64;

        displaylevel!(3, "block: {} bytes\n", n);
    }

    writer.flush()?;

    displaylevel!(
        2,
        "Decompressed {} bytes\n",
        bytes_written
    );

    Ok(DecompressResult { bytes_read, bytes_written })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_block_length_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("bad.crush");
        let out = dir.path().join("out");

        // Header claims a block larger than the 64 MiB limit.
        let n = (BLOCK_SIZE as u32 + 1).to_le_bytes();
        std::fs::write(&src, n).unwrap();

        assert!(matches!(
            decompress_filename(src.to_str().unwrap(), out.to_str().unwrap()),
            Err(Error::CorruptStream)
        ));
    }

    #[test]
    fn truncated_header_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("short.crush");
        let out = dir.path().join("out");
        std::fs::write(&src, [0x10, 0x00]).unwrap();

        assert!(decompress_filename(src.to_str().unwrap(), out.to_str().unwrap()).is_err());
    }

    #[test]
    fn truncated_block_body_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("cut.crush");
        let out = dir.path().join("out");

        // Header promises 100 bytes but no packed data follows.
        std::fs::write(&src, 100u32.to_le_bytes()).unwrap();

        assert!(matches!(
            decompress_filename(src.to_str().unwrap(), out.to_str().unwrap()),
            Err(Error::CorruptStream)
        ));
    }
}
