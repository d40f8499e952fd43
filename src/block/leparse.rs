//! Hash-chain match finder with a backwards optimal parse (levels 5–7).
//!
//! Runs in three phases over one input block:
//!
//! 1. **Chain construction** — one pass threading every position into a
//!    per-3-byte-hash chain through `prev`, most recent first.
//! 2. **Backwards dynamic programming** — from the last match position down
//!    to 1, compute the cheapest encoding of the suffix starting at each
//!    position. Candidates come from walking the hash chain closest-first;
//!    a candidate only needs scoring for lengths above the best length seen
//!    so far at this position, because the offset code grows with distance.
//!    When a chosen match can be extended one byte to the left, the parse
//!    greedily slides the match start backwards, committing an entry at
//!    every widened position.
//! 3. **Emission** — follow `mlen`/`mpos` forward from position 0 and
//!    replay the chosen tokens through the codec.
//!
//! The caller guarantees `src.len() >= 4`; shorter inputs never reach the
//! parser.

use super::bitio::BitWriter;
use super::codec::{match_cost, put_literal, put_match};
use super::types::{
    chain_hash_bits, hash3, LITERAL_COST, MAX_MATCH, MIN_MATCH, NO_MATCH_POS, W_SIZE,
};

/// Work memory length in words for a `src_size`-byte block.
///
/// Covers `cost` (`N + 1`), `prev`, `mpos`, `mlen` (`N` each) and the hash
/// lookup table.
pub(crate) fn workmem_words(src_size: usize) -> usize {
    4 * src_size + 1 + (1usize << chain_hash_bits(src_size))
}

/// Compress `src` into `dst` and return the packed size in bytes.
pub(crate) fn pack(
    src: &[u8],
    dst: &mut [u8],
    workmem: &mut [usize],
    max_depth: usize,
    accept_len: usize,
) -> usize {
    let n = src.len();
    debug_assert!(n >= MIN_MATCH + 1);

    let bits = chain_hash_bits(n);
    let (cost, rest) = workmem.split_at_mut(n + 1);
    let (prev, rest) = rest.split_at_mut(n);
    let (mpos, rest) = rest.split_at_mut(n);
    let (mlen, rest) = rest.split_at_mut(n);
    let lookup = &mut rest[..1usize << bits];

    // No match can start within the last MIN_MATCH - 1 bytes.
    let last_match_pos = n - MIN_MATCH;

    // ── Phase 1: hash chains, most recent position first ──────────────────
    lookup.fill(NO_MATCH_POS);
    for i in 0..=last_match_pos {
        let h = hash3(src, i, bits);
        prev[i] = lookup[h];
        lookup[h] = i;
    }

    // ── Phase 2: backwards DP with left extension ─────────────────────────
    cost[n] = 0;
    cost[n - 1] = LITERAL_COST;
    mlen[n - 1] = 1;
    cost[n - 2] = 2 * LITERAL_COST;
    mlen[n - 2] = 1;

    let mut cur = last_match_pos;
    while cur > 0 {
        // Literal baseline; any match must beat it.
        cost[cur] = cost[cur + 1] + LITERAL_COST;
        mlen[cur] = 1;

        let len_limit = MAX_MATCH.min(n - cur);
        let mut max_len = MIN_MATCH - 1;
        let mut num_chain = max_depth;
        let mut pos = prev[cur];

        while pos != NO_MATCH_POS && num_chain > 0 {
            num_chain -= 1;

            if cur - pos > W_SIZE {
                break;
            }

            let mut len = 0;

            // A longer match than max_len must agree at index max_len.
            if src[pos + max_len] == src[cur + max_len] {
                while len < len_limit && src[pos + len] == src[cur + len] {
                    len += 1;
                }
            }

            if len > max_len {
                // Score every newly reachable length; a shorter length can
                // be cheaper when it lands in a smaller bucket.
                let mut min_cost = usize::MAX;
                let mut min_cost_len = MIN_MATCH - 1;

                for i in max_len + 1..=len {
                    let cost_here = match_cost(cur - pos - 1, i) + cost[cur + i];
                    if cost_here < min_cost {
                        min_cost = cost_here;
                        min_cost_len = i;
                    }
                }

                if min_cost < cost[cur] {
                    cost[cur] = min_cost;
                    mpos[cur] = cur - pos - 1;
                    mlen[cur] = min_cost_len;

                    if pos > 0 && src[pos - 1] == src[cur - 1] && min_cost_len < MAX_MATCH {
                        // Slide the match start left while the preceding
                        // bytes agree, committing the widened match at each
                        // earlier position.
                        let mut ext_len = min_cost_len;
                        loop {
                            cur -= 1;
                            pos -= 1;
                            ext_len += 1;

                            cost[cur] = match_cost(cur - pos - 1, ext_len) + cost[cur + ext_len];
                            mpos[cur] = cur - pos - 1;
                            mlen[cur] = ext_len;

                            if !(pos > 0 && src[pos - 1] == src[cur - 1] && ext_len < MAX_MATCH) {
                                break;
                            }
                        }
                        break;
                    }
                }

                max_len = len;
            }

            if len >= accept_len || len == len_limit {
                break;
            }

            pos = prev[pos];
        }

        cur -= 1;
    }

    // ── Phase 3: emit tokens along the cheapest path ──────────────────────
    // Position 0 is outside the DP range; it is always a literal.
    mlen[0] = 1;

    let mut bw = BitWriter::new(dst);
    let mut i = 0;
    while i < n {
        if mlen[i] == 1 {
            put_literal(&mut bw, src[i]);
        } else {
            put_match(&mut bw, mlen[i], mpos[i]);
        }
        i += mlen[i];
    }
    bw.finalize()
}
