//! # Codeprint Perceptual Fingerprinting
//!
//! Takes a canonical token stream and produces a winnowing fingerprint: a
//! sparse, order-preserving selection of k-gram hashes that survives local
//! edits and reordering of unrelated code.
//!
//! ## Contract
//!
//! - Only canonical tokens are consumed. No lexing or identifier rewriting
//!   happens here.
//! - The API is a pure function of `(canonical_tokens, config)`: no I/O, no
//!   clocks, no global mutable state in the output.
//!
//! Invariant: the same canonical token sequence with the same
//! [`PerceptualConfig`] yields a bit-identical [`Fingerprint`].
//!
//! ## Pipeline
//!
//! 1.  **K-gram hashing**: every window of `k` consecutive tokens is
//!     concatenated and hashed with SHA-256, truncated to `hash_bits` bits. A
//!     stream shorter than `k` is hashed as a single k-gram; an empty stream
//!     has no hashes.
//!
//! 2.  **Winnowing**: a window of `w` hashes slides over the hash sequence and
//!     its minimum (leftmost on ties) is selected. Each position is emitted once
//!     while it remains the minimum, so every `w` consecutive hashes contain a
//!     fingerprint and about `2 / (w + 1)` of the positions are kept.
//!
//! ## Example Usage
//!
//! ```
//! use perceptual::{fingerprint_tokens, PerceptualConfig};
//!
//! let tokens = ["int", "VAR", "=", "0", ";", "while", "(", "VAR", "<", "10", ")"];
//! let config = PerceptualConfig::default().with_k(3).with_w(4);
//!
//! let fingerprint = fingerprint_tokens(&tokens, &config).unwrap();
//!
//! assert!(!fingerprint.is_empty());
//! assert_eq!(fingerprint.meta.k, 3);
//! assert_eq!(fingerprint.hashes.len(), tokens.len() - 3 + 1);
//! ```
//!
pub mod config;
pub mod fingerprint;
mod kgram;
mod winnow;

use std::time::Instant;

use tracing::debug;

pub use crate::config::{PerceptualConfig, PerceptualError, MIN_RECOMMENDED_HASH_BITS};
pub use crate::fingerprint::{Fingerprint, FingerprintMeta, WinnowedHash};
pub use crate::kgram::{hash_kgrams, hash_kgrams_with_lookup, kgram_hash, KgramHashes};
pub use crate::winnow::{winnow, winnow_values};

/// Current fingerprint algorithm version for this crate.
pub const FINGERPRINT_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const FINGERPRINT_ALGORITHM: &str = "sha256_kgram_winnow_v1";

/// Compute a winnowing fingerprint (k-gram hashes → winnow).
///
/// `tokens` must be canonical tokens in their original order. Any stream,
/// including an empty one, fingerprints successfully; only an invalid config
/// is an error.
pub fn fingerprint_tokens<S>(
    tokens: &[S],
    cfg: &PerceptualConfig,
) -> Result<Fingerprint, PerceptualError>
where
    S: AsRef<str>,
{
    cfg.validate()?;
    let start = Instant::now();

    let KgramHashes { mut hashes, lookup } = if cfg.keep_lookup {
        hash_kgrams_with_lookup(tokens, cfg.k, cfg.hash_bits)
    } else {
        hash_kgrams(tokens, cfg.k, cfg.hash_bits)
    };

    let winnowed = winnow(&hashes, cfg.w);
    let hash_count = hashes.len();

    if !cfg.include_intermediates {
        hashes.clear();
    }

    debug!(
        token_count = tokens.len(),
        hash_count,
        fingerprint_count = winnowed.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "fingerprint_success"
    );

    Ok(Fingerprint {
        hashes,
        winnowed,
        lookup,
        meta: FingerprintMeta {
            fingerprint_version: FINGERPRINT_VERSION,
            algorithm_name: FINGERPRINT_ALGORITHM.to_string(),
            k: cfg.k,
            w: cfg.w,
            hash_bits: cfg.hash_bits,
            token_count: tokens.len(),
            config_version: cfg.version,
        },
    })
}
