//! Configuration for identifier canonicalization.
//!
//! # Versioning
//!
//! Any change that can alter the canonical token stream (a new placeholder,
//! a different scan margin, a vocabulary change) must come with a version
//! bump so fingerprints produced by different releases are never compared as
//! if they were equivalent.
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.tail_margin, 4);
//! assert!(!config.identifiers_only);
//!
//! let wide = CanonicalizeConfig::new().with_tail_margin(6);
//! assert_eq!(wide.tail_margin, 6);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Placeholder for identifiers classified as declared variables.
pub const VAR_PLACEHOLDER: &str = "VAR";

/// Placeholder for identifiers classified as declared functions.
pub const FUNC_PLACEHOLDER: &str = "FUNC";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Semantic version of the canonicalization behavior. Must be >= 1.
    pub version: u32,

    /// Number of trailing tokens the declaration scan never starts from.
    ///
    /// The pipeline sets this to the k-gram width. A stream of `tail_margin`
    /// tokens or fewer is never scanned, so nothing in it gets rewritten.
    pub tail_margin: usize,

    /// Only identifier tokens may be classified as declared names.
    ///
    /// Off by default: any token following a type-prefixed token is eligible,
    /// so `*` in `int * p` is rewritten to `FUNC` along with every other `*`.
    /// Turning it on keeps operators and keywords intact but produces streams
    /// that no longer match ones canonicalized with the default.
    pub identifiers_only: bool,
}

impl CanonicalizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tail_margin(mut self, tail_margin: usize) -> Self {
        self.tail_margin = tail_margin;
        self
    }

    pub fn with_identifiers_only(mut self, identifiers_only: bool) -> Self {
        self.identifiers_only = identifiers_only;
        self
    }

    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            tail_margin: 4,
            identifiers_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(CanonicalizeConfig::default().validate().is_ok());
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = CanonicalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_tail_margin_is_valid() {
        let cfg = CanonicalizeConfig::new().with_tail_margin(0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = CanonicalizeConfig::new()
            .with_tail_margin(7)
            .with_identifiers_only(true);
        assert_eq!(cfg.tail_margin, 7);
        assert!(cfg.identifiers_only);
    }

    #[test]
    fn identifiers_only_is_opt_in() {
        assert!(!CanonicalizeConfig::default().identifiers_only);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = CanonicalizeConfig::new().with_tail_margin(5);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: CanonicalizeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
