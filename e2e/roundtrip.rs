//! E2E: library round trips across all levels and input shapes.
//!
//! Exercises the slice API (`pack` / `depack`), the allocating helpers, and
//! the stream decoder against a fixed set of fixtures, plus the size-bound
//! and level-monotonicity properties.

use crush::{
    compress_to_vec, decompress_to_vec, depack, depack_from_stream, max_packed_size, pack,
    workmem_size, CLEVEL_MAX, CLEVEL_MIN, WORKMEM_WORD,
};

/// Deterministic xorshift64 byte stream.
fn random_bytes(len: usize, mut state: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}

fn fixtures() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("empty", Vec::new()),
        ("one byte", vec![0x41]),
        ("two-byte run", vec![0xAB, 0xAB]),
        ("three bytes", b"abc".to_vec()),
        ("four-byte run", vec![0x55; 4]),
        ("short text", b"to be or not to be, that is the question".to_vec()),
        ("kilobyte of zeros", vec![0u8; 1024]),
        ("long single run", vec![0xEE; 100_000]),
        (
            "repeated sentence",
            b"the quick brown fox jumps over the lazy dog. ".repeat(500),
        ),
        ("random 64k", random_bytes(64 * 1024, 0x2545_F491_4F6C_DD1D)),
        ("cycling alphabet", (0..100_000u32).map(|i| (i % 253) as u8).collect()),
        ("self similar", {
            let mut v = random_bytes(4096, 0xDA94_2042_E4DD_58B5);
            let copy = v.clone();
            for _ in 0..16 {
                v.extend_from_slice(&copy);
                v.extend_from_slice(b"glue");
            }
            v
        }),
    ]
}

#[test]
fn every_fixture_round_trips_at_every_level() {
    for (name, data) in fixtures() {
        for level in CLEVEL_MIN..=CLEVEL_MAX {
            let packed = compress_to_vec(&data, level).unwrap();
            let restored = decompress_to_vec(&packed, data.len()).unwrap();
            assert_eq!(restored, data, "fixture '{name}' at level {level}");
        }
    }
}

#[test]
fn packed_size_never_exceeds_bound() {
    for (name, data) in fixtures() {
        for level in CLEVEL_MIN..=CLEVEL_MAX {
            let packed = compress_to_vec(&data, level).unwrap();
            assert!(
                packed.len() <= max_packed_size(data.len()),
                "fixture '{name}' at level {level}: {} > bound",
                packed.len()
            );
        }
    }
}

#[test]
fn slice_api_matches_allocating_api() {
    for (name, data) in fixtures() {
        let via_vec = compress_to_vec(&data, 7).unwrap();

        let mut dst = vec![0u8; max_packed_size(data.len())];
        let mut workmem = vec![0usize; workmem_size(data.len(), 7).unwrap() / WORKMEM_WORD];
        let packed = pack(&data, &mut dst, &mut workmem, 7).unwrap();

        assert_eq!(&dst[..packed], &via_vec[..], "fixture '{name}'");
    }
}

#[test]
fn stream_decoder_agrees_with_slice_decoder() {
    for (name, data) in fixtures() {
        let packed = compress_to_vec(&data, 8).unwrap();

        let mut out_slice = vec![0u8; data.len()];
        depack(&packed, &mut out_slice).unwrap();

        let mut cursor = &packed[..];
        let mut out_stream = vec![0u8; data.len()];
        depack_from_stream(&mut cursor, &mut out_stream).unwrap();

        assert_eq!(out_slice, out_stream, "fixture '{name}'");
        assert_eq!(out_slice, data, "fixture '{name}'");
    }
}

#[test]
fn tiny_inputs_pack_as_bare_literals() {
    // n literals occupy 9n bits, rounded up to whole bytes.
    for n in 0..=3usize {
        let data = vec![0x99u8; n];
        for level in CLEVEL_MIN..=CLEVEL_MAX {
            let packed = compress_to_vec(&data, level).unwrap();
            assert_eq!(packed.len(), (9 * n + 7) / 8, "n = {n}, level = {level}");
        }
    }
}

#[test]
fn chain_levels_are_weakly_monotone() {
    // Levels 6 and 7 explore supersets of level 5's candidates.
    for (name, data) in fixtures() {
        let s5 = compress_to_vec(&data, 5).unwrap().len();
        let s6 = compress_to_vec(&data, 6).unwrap().len();
        let s7 = compress_to_vec(&data, 7).unwrap().len();
        assert!(s6 <= s5, "fixture '{name}': level 6 {s6} > level 5 {s5}");
        assert!(s7 <= s5, "fixture '{name}': level 7 {s7} > level 5 {s5}");
    }
}

#[test]
fn tree_levels_dominate_on_fixture_totals() {
    // Not required input-by-input, but the optimal parses must win in
    // aggregate over the fixture set.
    let mut le_total = 0usize;
    let mut bt_total = 0usize;
    for (_, data) in fixtures() {
        le_total += compress_to_vec(&data, 7).unwrap().len();
        bt_total += compress_to_vec(&data, 10).unwrap().len();
    }
    assert!(
        bt_total <= le_total,
        "level 10 total {bt_total} > level 7 total {le_total}"
    );
}

#[test]
fn large_input_with_distant_matches_round_trips() {
    // Matches separated by more than a megabyte still fit the window.
    let mut data = random_bytes(2 * 1024 * 1024, 0x9E37_79B9_7F4A_7C15);
    let prefix: Vec<u8> = data[..8192].to_vec();
    data.extend_from_slice(&prefix);

    for level in [5, 8, 9] {
        let packed = compress_to_vec(&data, level).unwrap();
        let restored = decompress_to_vec(&packed, data.len()).unwrap();
        assert_eq!(restored, data, "level {level}");
    }
}
