//! E2E: block container framing.
//!
//! Validates the file layer against hand-assembled containers: per-block
//! little-endian uncompressed-length headers, multi-block concatenation,
//! and rejection of truncated or oversized blocks.

use std::io::Write;

use crush::io::{compress_filename, decompress_filename, BLOCK_HEADER_SIZE};
use crush::{compress_to_vec, Error};

fn write_block(out: &mut Vec<u8>, data: &[u8], level: i32) {
    let packed = compress_to_vec(data, level).unwrap();
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&packed);
}

#[test]
fn file_round_trip_preserves_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("input");
    let packed = dir.path().join("packed");
    let restored = dir.path().join("restored");

    let data: Vec<u8> = (0..200_000u32)
        .flat_map(|i| [(i % 256) as u8, (i % 31) as u8, b'x'])
        .collect();
    std::fs::write(&src, &data).unwrap();

    let cres = compress_filename(src.to_str().unwrap(), packed.to_str().unwrap(), 6).unwrap();
    assert_eq!(cres.bytes_read, data.len() as u64);
    assert_eq!(cres.bytes_written, std::fs::metadata(&packed).unwrap().len());

    let dres =
        decompress_filename(packed.to_str().unwrap(), restored.to_str().unwrap()).unwrap();
    assert_eq!(dres.bytes_written, data.len() as u64);
    assert_eq!(std::fs::read(&restored).unwrap(), data);
}

#[test]
fn hand_assembled_multi_block_file_decodes() {
    // Three independent blocks; the decoder must not carry state across
    // them, so a match in block two can never reference block one.
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("multi.crush");
    let restored = dir.path().join("restored");

    let block_a = b"first block payload ".repeat(100);
    let block_b = vec![0u8; 4096];
    let block_c = b"tail".to_vec();

    let mut container = Vec::new();
    write_block(&mut container, &block_a, 5);
    write_block(&mut container, &block_b, 9);
    write_block(&mut container, &block_c, 10);
    std::fs::File::create(&packed)
        .unwrap()
        .write_all(&container)
        .unwrap();

    decompress_filename(packed.to_str().unwrap(), restored.to_str().unwrap()).unwrap();

    let mut expected = block_a;
    expected.extend_from_slice(&block_b);
    expected.extend_from_slice(&block_c);
    assert_eq!(std::fs::read(&restored).unwrap(), expected);
}

#[test]
fn mixed_level_blocks_are_interchangeable() {
    // The container does not record the level; any level's output must
    // decode identically.
    let dir = tempfile::tempdir().unwrap();
    let data = b"levels do not mark the stream".repeat(50);

    for level in [5, 7, 8, 10] {
        let packed = dir.path().join(format!("l{level}.crush"));
        let restored = dir.path().join(format!("r{level}"));

        let mut container = Vec::new();
        write_block(&mut container, &data, level);
        std::fs::write(&packed, &container).unwrap();

        decompress_filename(packed.to_str().unwrap(), restored.to_str().unwrap()).unwrap();
        assert_eq!(std::fs::read(&restored).unwrap(), data);
    }
}

#[test]
fn header_promising_oversized_block_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("huge.crush");
    let restored = dir.path().join("restored");

    std::fs::write(&packed, u32::MAX.to_le_bytes()).unwrap();

    assert!(matches!(
        decompress_filename(packed.to_str().unwrap(), restored.to_str().unwrap()),
        Err(Error::CorruptStream)
    ));
}

#[test]
fn container_truncated_inside_a_block_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("cut.crush");
    let restored = dir.path().join("restored");

    let mut container = Vec::new();
    write_block(&mut container, &b"a block that will be cut short".repeat(20), 5);
    container.truncate(container.len() - 3);
    std::fs::write(&packed, &container).unwrap();

    assert!(matches!(
        decompress_filename(packed.to_str().unwrap(), restored.to_str().unwrap()),
        Err(Error::CorruptStream)
    ));
}

#[test]
fn header_size_constant_matches_layout() {
    // A one-byte file compresses to a 4-byte header plus two packed bytes.
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("byte");
    let packed = dir.path().join("byte.crush");
    std::fs::write(&src, [0x41u8]).unwrap();

    compress_filename(src.to_str().unwrap(), packed.to_str().unwrap(), 5).unwrap();

    let out = std::fs::read(&packed).unwrap();
    assert_eq!(out.len(), BLOCK_HEADER_SIZE + 2);
    assert_eq!(&out[..4], &1u32.to_le_bytes());
    assert_eq!(&out[4..], &[0x82, 0x00]);
}
