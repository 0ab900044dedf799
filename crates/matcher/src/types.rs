use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How two fingerprints are turned into symbol sequences before comparison.
///
/// Both modes sort the fingerprint values first, so only the multiset of
/// selected hashes matters, not where in the document they came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolMode {
    /// Sorted values rendered as one string of concatenated decimal numbers,
    /// compared character by character. Partially equal numbers still count.
    #[default]
    Digits,
    /// Sorted values compared as whole hashes.
    Hashes,
}

impl SymbolMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolMode::Digits => "digits",
            SymbolMode::Hashes => "hashes",
        }
    }
}

impl std::str::FromStr for SymbolMode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "digits" => Ok(SymbolMode::Digits),
            "hashes" => Ok(SymbolMode::Hashes),
            other => Err(MatchError::InvalidConfig(format!(
                "unknown symbol mode '{other}' (expected digits or hashes)"
            ))),
        }
    }
}

/// Configuration for corpus-level matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Minimum score for two documents to count as similar (inclusive).
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub symbols: SymbolMode,
    /// Score pairs on the rayon pool.
    #[serde(default = "MatchConfig::default_use_parallel")]
    pub use_parallel: bool,
}

impl MatchConfig {
    pub(crate) fn default_threshold() -> f64 {
        0.8
    }

    pub(crate) fn default_use_parallel() -> bool {
        true
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_symbols(mut self, symbols: SymbolMode) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version == 0 {
            return Err(MatchError::InvalidConfig(
                "config.version must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "threshold must be between 0.0 and 1.0 (got {})",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            threshold: Self::default_threshold(),
            symbols: SymbolMode::default(),
            use_parallel: Self::default_use_parallel(),
        }
    }
}

/// Score of one unordered document pair. `left` was inserted before `right`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarPair {
    pub left: String,
    pub right: String,
    pub score: f64,
}

/// One report line: a document and every other document similar to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRow {
    pub doc_id: String,
    pub similar: Vec<String>,
}

/// Per-document similarity report, rows in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimilarityReport {
    pub rows: Vec<ReportRow>,
}

impl SimilarityReport {
    /// Row for `doc_id`, if it is part of the report.
    pub fn row(&self, doc_id: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.doc_id == doc_id)
    }

    /// Rows that list at least one similar document.
    pub fn flagged(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| !row.similar.is_empty())
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("document '{0}' is already in the corpus")]
    DuplicateDocument(String),
    #[error("document '{0}' is not in the corpus")]
    UnknownDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.threshold, 0.8);
        assert_eq!(cfg.symbols, SymbolMode::Digits);
        assert!(cfg.use_parallel);
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let err = MatchConfig::new()
                .with_threshold(bad)
                .validate()
                .expect_err("config should be invalid");
            match err {
                MatchError::InvalidConfig(msg) => assert!(msg.contains("threshold")),
                other => panic!("unexpected error: {other}"),
            }
        }
        assert!(MatchConfig::new().with_threshold(0.0).validate().is_ok());
        assert!(MatchConfig::new().with_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = MatchConfig {
            version: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(MatchError::InvalidConfig(_))));
    }

    #[test]
    fn symbol_mode_parsing() {
        assert_eq!("digits".parse::<SymbolMode>().unwrap(), SymbolMode::Digits);
        assert_eq!(" Hashes ".parse::<SymbolMode>().unwrap(), SymbolMode::Hashes);
        assert!("bytes".parse::<SymbolMode>().is_err());
        assert_eq!(SymbolMode::Hashes.as_str(), "hashes");
    }

    #[test]
    fn config_serde_defaults() {
        let cfg: MatchConfig = serde_json::from_str(r#"{"version":1}"#).unwrap();
        assert_eq!(cfg, MatchConfig::default());

        let cfg: MatchConfig =
            serde_json::from_str(r#"{"version":2,"threshold":0.5,"symbols":"hashes"}"#).unwrap();
        assert_eq!(cfg.version, 2);
        assert_eq!(cfg.symbols, SymbolMode::Hashes);
    }

    #[test]
    fn report_helpers() {
        let report = SimilarityReport {
            rows: vec![
                ReportRow {
                    doc_id: "a".into(),
                    similar: vec!["b".into()],
                },
                ReportRow {
                    doc_id: "c".into(),
                    similar: vec![],
                },
            ],
        };
        assert_eq!(report.row("a").map(|r| r.similar.len()), Some(1));
        assert!(report.row("z").is_none());
        assert_eq!(report.flagged().count(), 1);
    }
}
