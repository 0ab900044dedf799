//! # Codeprint Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` scores winnowing fingerprints against each other. It does not
//! care how a fingerprint was produced: any sequence of `u64` hash values
//! works, which keeps the scorer independent from the lexing and hashing
//! stages.
//!
//! ## Scoring
//!
//! Both fingerprints are sorted, turned into symbol sequences (see
//! [`SymbolMode`]) and compared with a longest-matching-block ratio
//! ([`ratio`]): `2 * matched / (len_a + len_b)`. Sorting discards positions,
//! so the score measures fingerprint overlap rather than aligned order. The
//! score is symmetric and a non-empty fingerprint scores `1.0` against itself.
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: threshold, symbol mode and parallelism.
//! - [`Matcher`]: in-memory corpus with all-pairs scoring and reports.
//! - [`SimilarPair`] / [`SimilarityReport`]: scored pairs and per-document rows.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{similarity, MatchConfig, Matcher};
//!
//! assert_eq!(similarity(&[3, 1, 2], &[1, 2, 3]), 1.0);
//!
//! let mut corpus = Matcher::new(MatchConfig::default()).unwrap();
//! corpus.insert("a.c", &[12, 34, 56]).unwrap();
//! corpus.insert("b.c", &[12, 34, 57]).unwrap();
//! corpus.insert("c.c", &[7, 8, 9]).unwrap();
//!
//! let report = corpus.report();
//! assert_eq!(report.rows[0].similar, vec!["b.c".to_string()]);
//! assert!(report.rows[2].similar.is_empty());
//! ```

pub mod engine;
pub mod ratio;
pub mod types;

pub use crate::engine::{is_similar, render_symbols, similarity, similarity_with, Matcher};
pub use crate::ratio::{matching_blocks, ratio, MatchBlock};
pub use crate::types::{
    MatchConfig, MatchError, ReportRow, SimilarPair, SimilarityReport, SymbolMode,
};
