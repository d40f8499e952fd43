//! File compression into the block container.
//!
//! The input is consumed in [`BLOCK_SIZE`]-byte chunks; every chunk is
//! packed independently and written as a 4-byte little-endian uncompressed
//! length followed by the packed bytes. One work-memory allocation is
//! reused across all blocks of a file.

use std::io::{self, Read, Write};

use crate::block::compress::{max_packed_size, pack, workmem_size, WORKMEM_WORD};
use crate::block::types::level_params;
use crate::displaylevel;
use crate::error::Error;
use crate::io::file_io::{open_dst_file, open_src_file};
use crate::io::{BLOCK_HEADER_SIZE, BLOCK_SIZE};

/// Statistics from a successful compression run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressResult {
    /// Total uncompressed bytes read from the source.
    pub bytes_read: u64,
    /// Total bytes written to the destination, headers included.
    pub bytes_written: u64,
}

/// Read from `src` until `buf` is full or the stream ends; returns the
/// number of bytes read.
fn read_block<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Compress `input_filename` into `output_filename` at `level`.
pub fn compress_filename(
    input_filename: &str,
    output_filename: &str,
    level: i32,
) -> Result<CompressResult, Error> {
    // Reject a bad level before touching the destination.
    level_params(level).ok_or(Error::InvalidLevel(level))?;

    let mut src_file = open_src_file(input_filename)?;

    // Buffers never need to exceed the source length.
    let file_len = src_file.metadata().map(|m| m.len()).unwrap_or(u64::MAX);
    let block_size = (BLOCK_SIZE as u64).min(file_len.max(1)) as usize;

    let mut dst_file = open_dst_file(output_filename)?;

    let mut src_buf = vec![0u8; block_size];
    let mut dst_buf = vec![0u8; max_packed_size(block_size)];
    let mut workmem = vec![0usize; workmem_size(block_size, level)? / WORKMEM_WORD];

    let mut bytes_read: u64 = 0;
    let mut bytes_written: u64 = 0;

    loop {
        let n = read_block(&mut src_file, &mut src_buf)?;
        if n == 0 {
            break;
        }
        bytes_read += n as u64;

        let packed = pack(&src_buf[..n], &mut dst_buf, &mut workmem, level)?;

        dst_file.write_all(&(n as u32).to_le_bytes())?;
        dst_file.write_all(&dst_buf[..packed])?;
        bytes_written += (BLOCK_HEADER_SIZE + packed) as u64;

        displaylevel!(3, "block: {} -> {} bytes\n", n, packed);
    }

    dst_file.flush()?;

    let ratio = if bytes_read == 0 {
        100.0
    } else {
        bytes_written as f64 / bytes_read as f64 * 100.0
    };
    displaylevel!(
        2,
        "Compressed {} bytes into {} bytes ==> {:.2}%\n",
        bytes_read,
        bytes_written,
        ratio
    );

    Ok(CompressResult { bytes_read, bytes_written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::decompress::decompress_filename;

    fn round_trip_file(data: &[u8], level: i32) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("input.bin");
        let packed = dir.path().join("output.crush");
        let restored = dir.path().join("restored.bin");
        std::fs::write(&src, data).unwrap();

        let res = compress_filename(
            src.to_str().unwrap(),
            packed.to_str().unwrap(),
            level,
        )
        .unwrap();
        assert_eq!(res.bytes_read, data.len() as u64);

        decompress_filename(packed.to_str().unwrap(), restored.to_str().unwrap()).unwrap();
        assert_eq!(std::fs::read(&restored).unwrap(), data);
    }

    #[test]
    fn empty_file_round_trips_to_empty_container() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("empty");
        let packed = dir.path().join("empty.crush");
        std::fs::write(&src, b"").unwrap();

        let res =
            compress_filename(src.to_str().unwrap(), packed.to_str().unwrap(), 5).unwrap();
        assert_eq!(res.bytes_written, 0);
        assert_eq!(std::fs::read(&packed).unwrap().len(), 0);
    }

    #[test]
    fn small_file_round_trips_at_all_levels() {
        let data = b"pack me, pack me again, pack me a third time".repeat(8);
        for level in 5..=10 {
            round_trip_file(&data, level);
        }
    }

    #[test]
    fn block_header_carries_uncompressed_length() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("input");
        let packed = dir.path().join("output");
        let data = vec![7u8; 5000];
        std::fs::write(&src, &data).unwrap();

        compress_filename(src.to_str().unwrap(), packed.to_str().unwrap(), 5).unwrap();

        let out = std::fs::read(&packed).unwrap();
        let n = u32::from_le_bytes([out[0], out[1], out[2], out[3]]);
        assert_eq!(n, 5000);
    }

    #[test]
    fn invalid_level_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("input");
        let packed = dir.path().join("output");
        std::fs::write(&src, b"data").unwrap();

        assert!(matches!(
            compress_filename(src.to_str().unwrap(), packed.to_str().unwrap(), 3),
            Err(Error::InvalidLevel(3))
        ));
        assert!(!packed.exists());
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let packed = dir.path().join("output");
        assert!(matches!(
            compress_filename("/no/such/file", packed.to_str().unwrap(), 5),
            Err(Error::Io(_))
        ));
    }
}
