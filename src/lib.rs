//! Workspace umbrella crate for codeprint.
//!
//! Stitches the lexing/canonicalization, fingerprinting and matching stages
//! together so callers can go from source text to fingerprints and scores
//! with a single call.
//!
//! ```
//! use codeprint::{fingerprint, similarity};
//!
//! let a = fingerprint("int total = 0; while (total < 10) { total++; }", 4, 4).unwrap();
//! let b = fingerprint("int sum = 0; while (sum < 10) { sum++; }", 4, 4).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(similarity(&a, &b), 1.0);
//! ```

pub mod config;
pub mod corpus;
pub mod report;

pub use canonical::{
    canonicalize, canonicalize_with, collapse_whitespace, lex_and_canonicalize, tokenize,
    CanonicalError, CanonicalStream, CanonicalizeConfig, Classification, IdentifierClassifier,
    PatternClassifier, Token, TokenKind, Vocabulary,
};
pub use matcher::{
    is_similar, similarity, similarity_with, MatchConfig, MatchError, Matcher, ReportRow,
    SimilarPair, SimilarityReport, SymbolMode,
};
pub use perceptual::{
    fingerprint_tokens, hash_kgrams, winnow, Fingerprint, PerceptualConfig, PerceptualError,
};

pub use crate::config::{CodeprintConfig, ConfigLoadError};
pub use crate::corpus::{load_corpus, CorpusError, SourceDocument};

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use canonical::rewrite_identifiers;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Errors that can occur while running source text through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Canonical(CanonicalError),
    Perceptual(PerceptualError),
    Match(MatchError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Canonical(err) => write!(f, "canonicalization failure: {err}"),
            PipelineError::Perceptual(err) => write!(f, "fingerprinting failed: {err}"),
            PipelineError::Match(err) => write!(f, "matching failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Canonical(err) => Some(err),
            PipelineError::Perceptual(err) => Some(err),
            PipelineError::Match(err) => Some(err),
        }
    }
}

impl From<CanonicalError> for PipelineError {
    fn from(value: CanonicalError) -> Self {
        PipelineError::Canonical(value)
    }
}

impl From<PerceptualError> for PipelineError {
    fn from(value: PerceptualError) -> Self {
        PipelineError::Perceptual(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

/// Settings for every stage, kept consistent with each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub canonical: CanonicalizeConfig,
    pub perceptual: PerceptualConfig,
    pub matcher: MatchConfig,
}

impl PipelineConfig {
    /// Defaults with k-gram width `k` and window `w`.
    ///
    /// The canonicalizer's tail margin follows `k`.
    pub fn with_k_w(k: usize, w: usize) -> Self {
        Self {
            canonical: CanonicalizeConfig::default().with_tail_margin(k),
            perceptual: PerceptualConfig::default().with_k(k).with_w(w),
            matcher: MatchConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        self.canonical.validate()?;
        self.perceptual.validate()?;
        self.matcher.validate()?;
        Ok(())
    }
}

/// Everything the pipeline produced for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFingerprint {
    /// Canonical token stream.
    pub tokens: Vec<Token>,
    /// Names rewritten to placeholders.
    pub classification: Classification,
    pub fingerprint: Fingerprint,
}

impl DocumentFingerprint {
    /// The fingerprint sequence used for scoring.
    pub fn values(&self) -> Vec<u64> {
        self.fingerprint.values()
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_lex(&self, latency: Duration, token_count: usize);
    fn record_canonical(&self, latency: Duration, result: Result<(), PipelineError>);
    fn record_fingerprint(&self, latency: Duration, result: Result<(), PerceptualError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_lex(self, token_count: usize) {
        self.recorder.record_lex(self.start.elapsed(), token_count);
    }

    fn record_canonical(self, result: Result<(), PipelineError>) {
        self.recorder.record_canonical(self.start.elapsed(), result);
    }

    fn record_fingerprint(self, result: Result<(), PerceptualError>) {
        self.recorder
            .record_fingerprint(self.start.elapsed(), result);
    }
}

/// Lex, canonicalize and fingerprint `source` with explicit stage configs.
///
/// Any text is accepted, including empty or non-code input; only invalid
/// configuration is an error.
pub fn fingerprint_document(
    source: &str,
    canonical_cfg: &CanonicalizeConfig,
    perceptual_cfg: &PerceptualConfig,
) -> Result<DocumentFingerprint, PipelineError> {
    if let Err(err) = canonical_cfg.validate() {
        let err = PipelineError::Canonical(err);
        if let Some(span) = MetricsSpan::start() {
            span.record_canonical(Err(err.clone()));
        }
        return Err(err);
    }

    fingerprint_document_with(
        source,
        &PatternClassifier::from_config(canonical_cfg),
        perceptual_cfg,
    )
}

/// Like [`fingerprint_document`], with a caller-supplied identifier classifier
/// in place of the declaration heuristic.
pub fn fingerprint_document_with(
    source: &str,
    classifier: &dyn IdentifierClassifier,
    perceptual_cfg: &PerceptualConfig,
) -> Result<DocumentFingerprint, PipelineError> {
    let lex_metrics = MetricsSpan::start();
    let raw = tokenize(source);
    if let Some(span) = lex_metrics {
        span.record_lex(raw.len());
    }

    let mut canonical_metrics = MetricsSpan::start();
    let classification = classifier.classify(&raw);
    let tokens = rewrite_identifiers(&raw, &classification);
    if let Some(span) = canonical_metrics.take() {
        span.record_canonical(Ok(()));
    }

    let mut fingerprint_metrics = MetricsSpan::start();
    let fingerprint = match fingerprint_tokens(&tokens, perceptual_cfg) {
        Ok(fp) => {
            if let Some(span) = fingerprint_metrics.take() {
                span.record_fingerprint(Ok(()));
            }
            fp
        }
        Err(err) => {
            if let Some(span) = fingerprint_metrics.take() {
                span.record_fingerprint(Err(err.clone()));
            }
            return Err(PipelineError::Perceptual(err));
        }
    };

    Ok(DocumentFingerprint {
        tokens,
        classification,
        fingerprint,
    })
}

/// End-to-end fingerprint sequence of `source` with k-gram width `k` and
/// winnowing window `w`, other settings at their defaults.
pub fn fingerprint(source: &str, k: usize, w: usize) -> Result<Vec<u64>, PipelineError> {
    let cfg = PipelineConfig::with_k_w(k, w);
    let doc = fingerprint_document(source, &cfg.canonical, &cfg.perceptual)?;
    Ok(doc.values())
}

/// Fingerprint every document on the rayon pool and load the results into a
/// [`Matcher`], keeping the order of `documents`.
pub fn build_matcher(
    documents: &[SourceDocument],
    cfg: &PipelineConfig,
) -> Result<Matcher, PipelineError> {
    cfg.validate()?;
    let start = Instant::now();

    let fingerprints: Vec<Vec<u64>> = documents
        .par_iter()
        .map(|doc| {
            fingerprint_document(&doc.text, &cfg.canonical, &cfg.perceptual).map(|fp| fp.values())
        })
        .collect::<Result<_, _>>()?;

    let mut matcher = Matcher::new(cfg.matcher.clone())?;
    for (doc, values) in documents.iter().zip(&fingerprints) {
        matcher.insert(doc.doc_id.clone(), values)?;
    }

    info!(
        documents = documents.len(),
        fingerprints = fingerprints.iter().map(Vec::len).sum::<usize>(),
        elapsed_micros = start.elapsed().as_micros(),
        "corpus_fingerprinted"
    );
    Ok(matcher)
}
