//! Fingerprint and metadata types produced by the perceptual stage.
//!
//! The schema is part of the public contract: any change that can alter
//! fingerprint values must bump [`crate::FINGERPRINT_VERSION`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A hash picked by winnowing, with the k-gram position it came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowedHash {
    /// K-gram hash value.
    pub hash: u64,
    /// Index of the k-gram (and of its first token) in the canonical stream.
    pub start_idx: usize,
}

/// Winnowing fingerprint of one canonical token stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fingerprint {
    /// Every k-gram hash, in stream order.
    ///
    /// Empty when the config drops intermediates.
    pub hashes: Vec<u64>,
    /// The fingerprint sequence: winnowed hashes in document order.
    pub winnowed: Vec<WinnowedHash>,
    /// Hash → k-gram text, only filled when the config keeps it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lookup: BTreeMap<u64, String>,
    pub meta: FingerprintMeta,
}

impl Fingerprint {
    /// Selected hash values in document order. This is what the scorer compares.
    pub fn values(&self) -> Vec<u64> {
        self.winnowed.iter().map(|picked| picked.hash).collect()
    }

    pub fn len(&self) -> usize {
        self.winnowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winnowed.is_empty()
    }

    /// Debug text of the k-gram behind `hash`, if the lookup was kept.
    pub fn kgram_text(&self, hash: u64) -> Option<&str> {
        self.lookup.get(&hash).map(String::as_str)
    }
}

/// How a fingerprint was produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintMeta {
    /// Algorithm version owned by this crate.
    pub fingerprint_version: u16,
    pub algorithm_name: String,
    /// K-gram width in tokens.
    pub k: usize,
    /// Winnowing window.
    pub w: usize,
    pub hash_bits: u32,
    /// Length of the canonical token stream that was fingerprinted.
    pub token_count: usize,
    /// Version of the [`crate::PerceptualConfig`] supplied by the caller.
    pub config_version: u32,
}
