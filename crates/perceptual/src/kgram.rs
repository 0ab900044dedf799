//! K-gram hashing over a canonical token stream.
//!
//! Each window of `k` consecutive tokens is concatenated without a separator
//! and hashed with SHA-256. The k-gram hash is the low `hash_bits` bits of the
//! digest, so values are reproducible across runs, platforms and builds.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

/// Hash sequence for one token stream, plus an optional debugging map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KgramHashes {
    /// One hash per k-gram, in stream order.
    pub hashes: Vec<u64>,
    /// Hash value → space-joined k-gram text. Empty unless requested.
    pub lookup: BTreeMap<u64, String>,
}

/// Hash one k-gram's concatenated text to `hash_bits` bits.
///
/// The last eight digest bytes are read big-endian and masked, which is the
/// same as taking the digest's low-order bits as an unsigned integer.
///
/// ```
/// use perceptual::kgram_hash;
///
/// let h = kgram_hash("intVAR=0", 32);
/// assert!(h <= u32::MAX as u64);
/// assert_eq!(h, kgram_hash("intVAR=0", 32));
/// ```
pub fn kgram_hash(text: &str, hash_bits: u32) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&digest[digest.len() - 8..]);
    u64::from_be_bytes(tail) & low_mask(hash_bits)
}

fn low_mask(bits: u32) -> u64 {
    match bits {
        0 => 0,
        b if b >= 64 => u64::MAX,
        b => (1u64 << b) - 1,
    }
}

/// Hash every k-gram of `tokens`.
///
/// - empty stream: no hashes
/// - `0 < len < k`: the whole stream is hashed as one k-gram
/// - otherwise: `len - k + 1` hashes
///
/// A `k` of zero is treated as one.
pub fn hash_kgrams<S: AsRef<str>>(tokens: &[S], k: usize, hash_bits: u32) -> KgramHashes {
    collect(tokens, k, hash_bits, false)
}

/// Same as [`hash_kgrams`] and also records the k-gram text behind each hash.
///
/// When two k-grams collide, the later one wins.
pub fn hash_kgrams_with_lookup<S: AsRef<str>>(
    tokens: &[S],
    k: usize,
    hash_bits: u32,
) -> KgramHashes {
    collect(tokens, k, hash_bits, true)
}

fn collect<S: AsRef<str>>(tokens: &[S], k: usize, hash_bits: u32, keep_lookup: bool) -> KgramHashes {
    let mut out = KgramHashes::default();
    if tokens.is_empty() {
        return out;
    }

    let width = k.max(1).min(tokens.len());
    out.hashes.reserve(tokens.len() - width + 1);

    let mut buf = String::new();
    for window in tokens.windows(width) {
        buf.clear();
        for token in window {
            buf.push_str(token.as_ref());
        }
        let hash = kgram_hash(&buf, hash_bits);
        out.hashes.push(hash);

        if keep_lookup {
            let text = window
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" ");
            out.lookup.insert(hash, text);
        }
    }
    out
}
