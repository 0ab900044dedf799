use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::ratio::ratio;
use crate::types::{MatchConfig, MatchError, ReportRow, SimilarPair, SimilarityReport, SymbolMode};

#[cfg(test)]
mod tests;

/// Sorted fingerprint values as one string of concatenated decimals.
///
/// ```
/// assert_eq!(matcher::render_symbols(&[42, 7, 100]), "742100");
/// ```
pub fn render_symbols(fingerprint: &[u64]) -> String {
    let mut text = String::new();
    for value in sorted(fingerprint) {
        text.push_str(&value.to_string());
    }
    text
}

/// Similarity of two fingerprint sequences with the default [`SymbolMode`].
pub fn similarity(fp_a: &[u64], fp_b: &[u64]) -> f64 {
    similarity_with(fp_a, fp_b, SymbolMode::default())
}

/// Similarity of two fingerprint sequences in `[0, 1]`.
///
/// Both sides are sorted before comparison, so the score reflects overlap
/// of the fingerprint multisets. The result is symmetric in its arguments.
/// Two empty fingerprints score `1.0`; one empty fingerprint scores `0.0`.
pub fn similarity_with(fp_a: &[u64], fp_b: &[u64], mode: SymbolMode) -> f64 {
    match mode {
        SymbolMode::Digits => {
            ordered_ratio(render_symbols(fp_a).as_bytes(), render_symbols(fp_b).as_bytes())
        }
        SymbolMode::Hashes => ordered_ratio(&sorted(fp_a), &sorted(fp_b)),
    }
}

/// `true` when `score` meets or exceeds `threshold`.
pub fn is_similar(score: f64, threshold: f64) -> bool {
    score >= threshold
}

fn sorted(values: &[u64]) -> Vec<u64> {
    let mut out = values.to_vec();
    out.sort_unstable();
    out
}

// The block ratio depends on operand order; the smaller sequence goes first.
fn ordered_ratio<T: Ord + Hash>(a: &[T], b: &[T]) -> f64 {
    if a <= b {
        ratio(a, b)
    } else {
        ratio(b, a)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    doc_id: String,
    sorted: Vec<u64>,
    digits: String,
}

/// In-memory corpus of fingerprinted documents with all-pairs scoring.
///
/// Documents keep their insertion order; pairs and report rows follow it.
#[derive(Debug, Clone)]
pub struct Matcher {
    cfg: MatchConfig,
    entries: Vec<Entry>,
    positions: HashMap<String, usize>,
}

impl Matcher {
    /// Empty corpus; the config is validated here.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            entries: Vec::new(),
            positions: HashMap::new(),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Add a document's fingerprint sequence. Ids must be unique.
    pub fn insert(&mut self, doc_id: impl Into<String>, fingerprint: &[u64]) -> Result<(), MatchError> {
        let doc_id = doc_id.into();
        if self.positions.contains_key(&doc_id) {
            return Err(MatchError::DuplicateDocument(doc_id));
        }
        let sorted = sorted(fingerprint);
        let digits = match self.cfg.symbols {
            SymbolMode::Digits => render_symbols(&sorted),
            SymbolMode::Hashes => String::new(),
        };
        self.positions.insert(doc_id.clone(), self.entries.len());
        self.entries.push(Entry {
            doc_id,
            sorted,
            digits,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.positions.contains_key(doc_id)
    }

    /// Document ids in insertion order.
    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.doc_id.as_str())
    }

    /// Score two documents already in the corpus.
    pub fn score(&self, left: &str, right: &str) -> Result<f64, MatchError> {
        let a = self.position(left)?;
        let b = self.position(right)?;
        Ok(self.score_at(a, b))
    }

    /// Every unordered pair `(i, j)` with `i < j`, in insertion order.
    pub fn all_pairs(&self) -> Vec<SimilarPair> {
        self.scored_pairs()
            .into_iter()
            .map(|(i, j, score)| self.pair(i, j, score))
            .collect()
    }

    /// Pairs whose score meets the configured threshold.
    pub fn similar_pairs(&self) -> Vec<SimilarPair> {
        self.scored_pairs()
            .into_iter()
            .filter(|&(_, _, score)| is_similar(score, self.cfg.threshold))
            .map(|(i, j, score)| self.pair(i, j, score))
            .collect()
    }

    /// Documents similar to `doc_id`, in insertion order. Each pair has
    /// `doc_id` on the left.
    pub fn similar_to(&self, doc_id: &str) -> Result<Vec<SimilarPair>, MatchError> {
        let target = self.position(doc_id)?;
        Ok((0..self.entries.len())
            .filter(|&other| other != target)
            .filter_map(|other| {
                let score = self.score_at(target, other);
                is_similar(score, self.cfg.threshold).then(|| self.pair(target, other, score))
            })
            .collect())
    }

    /// One row per document, in insertion order, listing every other
    /// document whose score meets the threshold.
    pub fn report(&self) -> SimilarityReport {
        let mut similar: Vec<Vec<usize>> = vec![Vec::new(); self.entries.len()];
        for (i, j, score) in self.scored_pairs() {
            if is_similar(score, self.cfg.threshold) {
                similar[i].push(j);
                similar[j].push(i);
            }
        }

        let rows = self
            .entries
            .iter()
            .zip(similar)
            .map(|(entry, mut others)| {
                others.sort_unstable();
                ReportRow {
                    doc_id: entry.doc_id.clone(),
                    similar: others
                        .into_iter()
                        .map(|idx| self.entries[idx].doc_id.clone())
                        .collect(),
                }
            })
            .collect();

        SimilarityReport { rows }
    }

    fn position(&self, doc_id: &str) -> Result<usize, MatchError> {
        self.positions
            .get(doc_id)
            .copied()
            .ok_or_else(|| MatchError::UnknownDocument(doc_id.to_string()))
    }

    fn score_at(&self, a: usize, b: usize) -> f64 {
        let (left, right) = (&self.entries[a], &self.entries[b]);
        match self.cfg.symbols {
            SymbolMode::Digits => ordered_ratio(left.digits.as_bytes(), right.digits.as_bytes()),
            SymbolMode::Hashes => ordered_ratio(&left.sorted, &right.sorted),
        }
    }

    fn pair(&self, i: usize, j: usize, score: f64) -> SimilarPair {
        SimilarPair {
            left: self.entries[i].doc_id.clone(),
            right: self.entries[j].doc_id.clone(),
            score,
        }
    }

    fn scored_pairs(&self) -> Vec<(usize, usize, f64)> {
        let start = Instant::now();
        let n = self.entries.len();

        let scored: Vec<(usize, usize, f64)> = if self.cfg.use_parallel {
            (0..n)
                .into_par_iter()
                .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j, self.score_at(i, j))))
                .collect()
        } else {
            (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j, self.score_at(i, j))))
                .collect()
        };

        debug!(
            documents = n,
            pairs = scored.len(),
            parallel = self.cfg.use_parallel,
            elapsed_micros = start.elapsed().as_micros(),
            "match_all_pairs"
        );
        scored
    }
}
