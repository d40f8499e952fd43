//! Criterion benchmarks for the CRUSH block compression API.
//!
//! Run with:
//!   cargo bench --bench block

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use crush::{depack, max_packed_size, pack, workmem_size, WORKMEM_WORD};

/// Synthetic chunk with mixed texture: repeated phrases, runs, and a noisy
/// region, so every level has matches to hunt and literals to pay for.
fn synthetic_chunk(size: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(size);
    let mut state = 0x853C_49E6_748F_EA9Bu64;
    while out.len() < size {
        out.extend_from_slice(b"block compression benchmark payload / ");
        out.extend_from_slice(&[b'='; 64]);
        for _ in 0..48 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            out.push(state as u8);
        }
    }
    out.truncate(size);
    out
}

fn bench_block_compress_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_compress_decompress");

    for &chunk_size in &[65_536usize, 262_144] {
        let chunk = synthetic_chunk(chunk_size);

        // ── pack at each level ───────────────────────────────────────────────
        for &level in &[5i32, 7, 9, 10] {
            let mut dst = vec![0u8; max_packed_size(chunk_size)];
            let mut workmem =
                vec![0usize; workmem_size(chunk_size, level).unwrap() / WORKMEM_WORD];
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("pack_level_{level}"), chunk_size),
                &chunk,
                |b, chunk| b.iter(|| pack(chunk, &mut dst, &mut workmem, level).unwrap()),
            );
        }

        // ── depack — pre-compress the chunk once, then benchmark ────────────
        {
            let compressed = crush::compress_to_vec(&chunk, 9).unwrap();
            let mut decomp_dst = vec![0u8; chunk_size];

            // Throughput measured in decompressed bytes.
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("depack", chunk_size),
                &compressed,
                |b, compressed| b.iter(|| depack(compressed, &mut decomp_dst).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_block_compress_decompress);
criterion_main!(benches);
