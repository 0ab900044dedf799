//! Winnowing: local-minimum selection over a k-gram hash sequence.
//!
//! For every window of `w` consecutive hashes the minimum is selected, ties
//! going to the leftmost position. A position is emitted once, when it first
//! becomes the window minimum; it is not re-emitted while it stays the
//! minimum of later overlapping windows. The result keeps document order.
//! No position counts as already picked before the first window, so a
//! minimum at index 0 is always emitted; seeding the previous pick with 0
//! would drop it.
//!
//! Every window of `w` hashes contains at least one emitted position, and on
//! random input about `2 / (w + 1)` of the positions are emitted.

use std::collections::VecDeque;

use crate::fingerprint::WinnowedHash;

/// Winnow `hashes` with window `w` using a monotonic deque, O(n).
///
/// A sequence shorter than `w` is treated as a single window. `w == 0` is
/// treated as one.
///
/// ```
/// use perceptual::winnow;
///
/// let picked = winnow(&[5, 3, 3, 9, 1, 7], 3);
/// let positions: Vec<usize> = picked.iter().map(|p| p.start_idx).collect();
/// assert_eq!(positions, vec![1, 4]);
/// ```
pub fn winnow(hashes: &[u64], w: usize) -> Vec<WinnowedHash> {
    let n = hashes.len();
    if n == 0 {
        return Vec::new();
    }

    let window = w.max(1);
    if window >= n {
        let mut min_idx = 0;
        for (idx, &val) in hashes.iter().enumerate().skip(1) {
            if val < hashes[min_idx] {
                min_idx = idx;
            }
        }
        return vec![WinnowedHash {
            hash: hashes[min_idx],
            start_idx: min_idx,
        }];
    }

    let mut out = Vec::with_capacity(2 * n / (window + 1) + 1);
    // Indices in the current window with non-decreasing hash values; the
    // front is the leftmost minimum.
    let mut dq: VecDeque<usize> = VecDeque::with_capacity(window);
    let mut last_picked: Option<usize> = None;

    let push = |dq: &mut VecDeque<usize>, i: usize| {
        // Equal values stay queued so the earlier one keeps the front.
        while let Some(&j) = dq.back() {
            if hashes[j] > hashes[i] {
                dq.pop_back();
            } else {
                break;
            }
        }
        dq.push_back(i);
    };

    let emit = |dq: &VecDeque<usize>, out: &mut Vec<WinnowedHash>, last: &mut Option<usize>| {
        if let Some(&idx) = dq.front() {
            if *last != Some(idx) {
                out.push(WinnowedHash {
                    hash: hashes[idx],
                    start_idx: idx,
                });
                *last = Some(idx);
            }
        }
    };

    for i in 0..window {
        push(&mut dq, i);
    }
    emit(&dq, &mut out, &mut last_picked);

    for i in window..n {
        let left = i + 1 - window;
        while let Some(&j) = dq.front() {
            if j < left {
                dq.pop_front();
            } else {
                break;
            }
        }
        push(&mut dq, i);
        emit(&dq, &mut out, &mut last_picked);
    }

    out
}

/// Winnow and keep only the selected hash values, in document order.
pub fn winnow_values(hashes: &[u64], w: usize) -> Vec<u64> {
    winnow(hashes, w).into_iter().map(|picked| picked.hash).collect()
}
