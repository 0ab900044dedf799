//! Longest-matching-block similarity ratio.
//!
//! The longest common contiguous block of `a` and `b` is found, then the
//! search recurses on the pieces left and right of it. The ratio is
//! `2 * matched / (a.len() + b.len())`. Among equally long blocks the one
//! starting earliest in `a` wins, then earliest in `b`. Every element takes
//! part; there is no junk or popularity filter.
//!
//! The ratio depends on operand order. Callers that need a symmetric score
//! pick a canonical order first (see [`crate::similarity_with`]).

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A common block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Matching blocks of `a` and `b`, ordered by position, adjacent blocks
/// merged. Zero-sized blocks are never returned.
pub fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchBlock> {
    let b2j = index_positions(b);

    let mut found = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }
        if alo < block.a && blo < block.b {
            pending.push((alo, block.a, blo, block.b));
        }
        if block.a + block.size < ahi && block.b + block.size < bhi {
            pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
        }
        found.push(block);
    }
    found.sort_unstable();

    let mut merged: Vec<MatchBlock> = Vec::with_capacity(found.len());
    for block in found {
        match merged.last_mut() {
            Some(prev) if prev.a + prev.size == block.a && prev.b + prev.size == block.b => {
                prev.size += block.size;
            }
            _ => merged.push(block),
        }
    }
    merged
}

/// Similarity in `[0, 1]`. Two empty sequences score `1.0`.
///
/// ```
/// use matcher::ratio;
///
/// assert_eq!(ratio(b"abcd", b"abcd"), 1.0);
/// assert_eq!(ratio(b"abcd", b"bcde"), 0.75);
/// assert_eq!(ratio::<u8>(&[], &[]), 1.0);
/// ```
pub fn ratio<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(a, b).iter().map(|block| block.size).sum();
    2.0 * matched as f64 / total as f64
}

fn index_positions<T: Eq + Hash>(b: &[T]) -> HashMap<&T, Vec<usize>> {
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        b2j.entry(item).or_default().push(j);
    }
    b2j
}

/// Longest block inside `a[alo..ahi]` × `b[blo..bhi]`.
///
/// `run[j]` holds the length of the common run ending at `a[i - 1]`,
/// `b[j]`; only positions where `b` matches are tracked.
fn longest_match<T: Eq + Hash>(
    a: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchBlock {
    let mut best = MatchBlock {
        a: alo,
        b: blo,
        size: 0,
    };
    let mut run: HashMap<usize, usize> = HashMap::new();
    let mut next_run: HashMap<usize, usize> = HashMap::new();

    for (i, item) in a.iter().enumerate().take(ahi).skip(alo) {
        next_run.clear();
        if let Some(positions) = b2j.get(item) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let len = j
                    .checked_sub(1)
                    .and_then(|prev| run.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_run.insert(j, len);
                if len > best.size {
                    best = MatchBlock {
                        a: i + 1 - len,
                        b: j + 1 - len,
                        size: len,
                    };
                }
            }
        }
        std::mem::swap(&mut run, &mut next_run);
    }
    best
}
