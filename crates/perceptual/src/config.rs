//! Configuration and error types for k-gram hashing and winnowing.
//!
//! This module is free of I/O and environment-dependent behavior so the
//! fingerprinting stage stays a pure function of `(canonical_tokens, config)`.

use std::sync::Once;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Hash widths below this are accepted but collide heavily on real corpora.
pub const MIN_RECOMMENDED_HASH_BITS: u32 = 24;

/// Configuration for the fingerprinting stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerceptualConfig {
    /// Configuration schema version.
    ///
    /// Any algorithmic change that can affect the fingerprint must bump this
    /// version, so that old fingerprints remain replayable and comparable.
    pub version: u32,
    /// Number of tokens per k-gram.
    ///
    /// Larger values are more specific; smaller values tolerate more local
    /// edits but match more unrelated code.
    pub k: usize,
    /// Winnowing window size, in k-gram positions.
    ///
    /// Roughly one fingerprint is kept per `(w + 1) / 2` positions.
    pub w: usize,
    /// Width of each k-gram hash in bits (1..=64).
    ///
    /// The hash is the low `hash_bits` bits of the k-gram's SHA-256 digest.
    pub hash_bits: u32,
    /// Keep a hash → k-gram text map in the fingerprint for debugging.
    pub keep_lookup: bool,
    /// Keep the full hash sequence in the fingerprint.
    ///
    /// When `false`, it is still computed internally but cleared from the
    /// returned struct to keep stored fingerprints small.
    pub include_intermediates: bool,
}

impl PerceptualConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the k-gram width (k). Typical values: 3-8.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the winnowing window (w). Typical values: 4-25.
    pub fn with_w(mut self, w: usize) -> Self {
        self.w = w;
        self
    }

    pub fn with_hash_bits(mut self, hash_bits: u32) -> Self {
        self.hash_bits = hash_bits;
        self
    }

    pub fn with_lookup(mut self, keep_lookup: bool) -> Self {
        self.keep_lookup = keep_lookup;
        self
    }

    pub fn with_intermediates(mut self, include_intermediates: bool) -> Self {
        self.include_intermediates = include_intermediates;
        self
    }

    /// True when `hash_bits` is valid but below [`MIN_RECOMMENDED_HASH_BITS`].
    pub fn is_collision_prone(&self) -> bool {
        self.hash_bits < MIN_RECOMMENDED_HASH_BITS
    }

    /// Validate configuration parameters.
    ///
    /// A collision-prone `hash_bits` passes validation; it is reported once
    /// per process with `warn!`.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.version < 1 {
            return Err(PerceptualError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.k < 1 {
            return Err(PerceptualError::InvalidConfigK { k: self.k });
        }
        if self.w < 1 {
            return Err(PerceptualError::InvalidConfigW { w: self.w });
        }
        if !(1..=64).contains(&self.hash_bits) {
            return Err(PerceptualError::InvalidHashBits {
                bits: self.hash_bits,
            });
        }
        if self.is_collision_prone() {
            static NARROW_HASH_WARNING: Once = Once::new();
            let bits = self.hash_bits;
            NARROW_HASH_WARNING.call_once(|| {
                warn!(
                    hash_bits = bits,
                    recommended = MIN_RECOMMENDED_HASH_BITS,
                    "narrow k-gram hashes will collide across unrelated code"
                );
            });
        }
        Ok(())
    }
}

impl Default for PerceptualConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: 4,
            w: 4,
            hash_bits: 32,
            keep_lookup: false,
            include_intermediates: true,
        }
    }
}

/// Errors returned by the fingerprinting stage. All are configuration errors;
/// any token stream, including an empty one, fingerprints successfully.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid config: k must be >= 1 (got {k})")]
    InvalidConfigK { k: usize },

    #[error("invalid config: w must be >= 1 (got {w})")]
    InvalidConfigW { w: usize },

    #[error("invalid config: hash_bits must be in 1..=64 (got {bits})")]
    InvalidHashBits { bits: u32 },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = PerceptualConfig::default();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.k, 4);
        assert_eq!(cfg.w, 4);
        assert_eq!(cfg.hash_bits, 32);
        assert!(!cfg.keep_lookup);
        assert!(cfg.include_intermediates);
        assert!(!cfg.is_collision_prone());
    }

    #[test]
    fn config_builder_chain() {
        let cfg = PerceptualConfig::new()
            .with_k(5)
            .with_w(12)
            .with_hash_bits(48)
            .with_lookup(true)
            .with_intermediates(false);

        assert_eq!(cfg.k, 5);
        assert_eq!(cfg.w, 12);
        assert_eq!(cfg.hash_bits, 48);
        assert!(cfg.keep_lookup);
        assert!(!cfg.include_intermediates);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_validate_invalid_k_zero() {
        let cfg = PerceptualConfig::new().with_k(0);
        assert!(matches!(
            cfg.validate(),
            Err(PerceptualError::InvalidConfigK { k: 0 })
        ));
    }

    #[test]
    fn config_validate_invalid_w_zero() {
        let cfg = PerceptualConfig::new().with_w(0);
        assert!(matches!(
            cfg.validate(),
            Err(PerceptualError::InvalidConfigW { w: 0 })
        ));
    }

    #[test]
    fn config_validate_hash_bits_bounds() {
        assert!(matches!(
            PerceptualConfig::new().with_hash_bits(0).validate(),
            Err(PerceptualError::InvalidHashBits { bits: 0 })
        ));
        assert!(matches!(
            PerceptualConfig::new().with_hash_bits(65).validate(),
            Err(PerceptualError::InvalidHashBits { bits: 65 })
        ));
        assert!(PerceptualConfig::new().with_hash_bits(1).validate().is_ok());
        assert!(PerceptualConfig::new().with_hash_bits(64).validate().is_ok());
    }

    #[test]
    fn narrow_hashes_are_flagged() {
        let cfg = PerceptualConfig::new().with_hash_bits(4);
        assert!(cfg.validate().is_ok());
        assert!(cfg.is_collision_prone());
    }

    #[test]
    fn config_validate_invalid_version_zero() {
        let cfg = PerceptualConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(PerceptualError::InvalidConfigVersion { version: 0 })
        ));
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = PerceptualConfig::new().with_k(6).with_w(9);
        let serialized = serde_json::to_string(&cfg).unwrap();
        let deserialized: PerceptualConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(cfg, deserialized);
    }

    #[test]
    fn error_display() {
        let err = PerceptualError::InvalidHashBits { bits: 80 };
        assert!(err.to_string().contains("hash_bits"));
        assert!(err.to_string().contains("80"));
        let err = PerceptualError::InvalidConfigK { k: 0 };
        assert!(err.to_string().contains("k must be >= 1"));
    }
}
