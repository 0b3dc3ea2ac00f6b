//! Pair counting for BPE training.
//!
//! Frequencies are counted over one flat token sequence. The initial count
//! is a full pass (optionally parallel); after that, each merge rewrite
//! reports exact count deltas so the trainer never recounts the whole
//! sequence per iteration.

use ahash::{AHashMap, AHashSet};
use bytepair_core::Pair;
use rayon::prelude::*;

/// Count every adjacent pair in `seq`.
///
/// Returns an empty map for sequences shorter than two tokens.
pub fn count(seq: &[u32]) -> AHashMap<Pair, u64> {
    let mut counts: AHashMap<Pair, u64> = AHashMap::new();
    for window in seq.windows(2) {
        *counts.entry((window[0], window[1])).or_insert(0) += 1;
    }
    counts
}

/// Count every adjacent pair in `seq` across worker threads.
///
/// Map/reduce over windows; the result is identical to [`count`].
pub fn count_parallel(seq: &[u32]) -> AHashMap<Pair, u64> {
    if seq.len() < 2 {
        return AHashMap::new();
    }

    seq.par_windows(2)
        .fold(AHashMap::new, |mut acc: AHashMap<Pair, u64>, window| {
            *acc.entry((window[0], window[1])).or_insert(0) += 1;
            acc
        })
        .reduce(AHashMap::new, |mut acc, counts| {
            for (pair, count) in counts {
                *acc.entry(pair).or_insert(0) += count;
            }
            acc
        })
}

/// Rewrite `seq` by merging `pair` into `id`, returning the new sequence and
/// the exact pair-count deltas between the old and new sequences.
///
/// The scan is the same left-to-right non-overlapping pass as
/// [`bytepair_core::apply_merge`]. Deltas are computed site-locally: every
/// destroyed pair touches a consumed position and every created pair touches
/// a merged token, so only the neighborhoods of merge sites are examined.
/// Boundary pairs shared by adjacent sites are deduplicated by their start
/// index so nothing is counted twice.
pub fn merge_with_deltas(seq: &[u32], pair: Pair, id: u32) -> (Vec<u32>, AHashMap<Pair, i64>) {
    let mut out = Vec::with_capacity(seq.len());
    let mut deltas: AHashMap<Pair, i64> = AHashMap::new();
    // Start indices of old pairs already decremented
    let mut removed: AHashSet<usize> = AHashSet::new();
    // Positions of the merged token in the output
    let mut sites: Vec<usize> = Vec::new();

    let mut i = 0;
    while i < seq.len() {
        if i + 1 < seq.len() && seq[i] == pair.0 && seq[i + 1] == pair.1 {
            sites.push(out.len());
            out.push(id);

            if i > 0 && removed.insert(i - 1) {
                *deltas.entry((seq[i - 1], seq[i])).or_insert(0) -= 1;
            }
            if removed.insert(i) {
                *deltas.entry(pair).or_insert(0) -= 1;
            }
            if i + 2 < seq.len() && removed.insert(i + 1) {
                *deltas.entry((seq[i + 1], seq[i + 2])).or_insert(0) -= 1;
            }

            i += 2;
        } else {
            out.push(seq[i]);
            i += 1;
        }
    }

    // Start indices of new pairs already incremented
    let mut added: AHashSet<usize> = AHashSet::new();
    for &site in &sites {
        if site > 0 && added.insert(site - 1) {
            *deltas.entry((out[site - 1], out[site])).or_insert(0) += 1;
        }
        if site + 1 < out.len() && added.insert(site) {
            *deltas.entry((out[site], out[site + 1])).or_insert(0) += 1;
        }
    }

    deltas.retain(|_, delta| *delta != 0);
    (out, deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytepair_core::apply_merge;

    #[test]
    fn test_count_simple() {
        let counts = count(&[1, 2, 3, 4]);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get(&(1, 2)), Some(&1));
        assert_eq!(counts.get(&(2, 3)), Some(&1));
        assert_eq!(counts.get(&(3, 4)), Some(&1));
    }

    #[test]
    fn test_count_repeated_pairs() {
        let counts = count(&[1, 2, 1, 2, 3]);
        assert_eq!(counts.get(&(1, 2)), Some(&2));
        assert_eq!(counts.get(&(2, 1)), Some(&1));
        assert_eq!(counts.get(&(2, 3)), Some(&1));
    }

    #[test]
    fn test_count_short_sequences() {
        assert!(count(&[]).is_empty());
        assert!(count(&[1]).is_empty());
        assert_eq!(count(&[1, 2]).len(), 1);
    }

    #[test]
    fn test_count_parallel_matches_sequential() {
        // Deterministic pseudo-text with plenty of repeats
        let seq: Vec<u32> = (0..10_000).map(|i| (i * 7 + i / 13) % 97).collect();
        assert_eq!(count_parallel(&seq), count(&seq));
        assert!(count_parallel(&[]).is_empty());
        assert!(count_parallel(&[5]).is_empty());
    }

    /// Deltas applied to the old counts must equal a fresh count of the
    /// rewritten sequence.
    fn assert_deltas_exact(seq: &[u32], pair: Pair, id: u32) {
        let (out, deltas) = merge_with_deltas(seq, pair, id);
        assert_eq!(out, apply_merge(seq, pair, id), "rewrite mismatch");

        let mut updated: AHashMap<Pair, i64> =
            count(seq).into_iter().map(|(p, c)| (p, c as i64)).collect();
        for (p, d) in deltas {
            *updated.entry(p).or_insert(0) += d;
        }
        updated.retain(|_, c| *c != 0);

        let fresh: AHashMap<Pair, i64> =
            count(&out).into_iter().map(|(p, c)| (p, c as i64)).collect();
        assert_eq!(updated, fresh, "deltas inexact for {:?} on {:?}", pair, seq);
    }

    #[test]
    fn test_deltas_exact_basic() {
        assert_deltas_exact(&[1, 2, 3, 1, 2, 5], (1, 2), 10);
        assert_deltas_exact(&[1, 2], (1, 2), 10);
        assert_deltas_exact(&[3, 4, 1, 2], (1, 2), 10);
        assert_deltas_exact(&[1, 2, 4, 3], (1, 2), 10);
        assert_deltas_exact(&[9, 9, 9], (1, 2), 10);
    }

    #[test]
    fn test_deltas_exact_overlapping_runs() {
        assert_deltas_exact(&[7, 7, 7], (7, 7), 10);
        assert_deltas_exact(&[7, 7, 7, 7], (7, 7), 10);
        assert_deltas_exact(&[7, 7, 7, 7, 7], (7, 7), 10);
        assert_deltas_exact(&[1, 7, 7, 7, 7, 2], (7, 7), 10);
    }

    #[test]
    fn test_deltas_exact_adjacent_sites() {
        assert_deltas_exact(&[1, 2, 1, 2], (1, 2), 10);
        assert_deltas_exact(&[1, 2, 1, 2, 1, 2], (1, 2), 10);
        assert_deltas_exact(&[0, 1, 2, 1, 2, 0], (1, 2), 10);
    }

    #[test]
    fn test_deltas_exact_on_text() {
        let seq: Vec<u32> = "hello hello world world".bytes().map(u32::from).collect();
        assert_deltas_exact(&seq, (108, 108), 256);
        assert_deltas_exact(&seq, (32, 119), 256);
        assert_deltas_exact(&seq, (104, 101), 256);
    }

    #[test]
    fn test_deltas_single_site() {
        let (out, deltas) = merge_with_deltas(&[1, 2, 3, 1], (2, 3), 10);
        assert_eq!(out, vec![1, 10, 1]);
        assert_eq!(deltas.get(&(2, 3)), Some(&-1));
        assert_eq!(deltas.get(&(1, 10)), Some(&1));
        assert_eq!(deltas.get(&(10, 1)), Some(&1));
    }
}
