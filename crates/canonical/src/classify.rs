//! Identifier classification for canonicalization.
//!
//! Deciding which identifiers are "declared variables" and "declared
//! functions" is isolated behind [`IdentifierClassifier`] so the token-pattern
//! heuristic shipped here can be swapped for a scope-aware classifier without
//! touching the lexer, the rewrite step or the hashing stages.
//!
//! [`PatternClassifier`] looks at consecutive token triples `(t[i], t[i+1], t[i+2])`:
//!
//! - `t[i]` starts with a type name and `t[i+2]` is `=` → `t[i+1]` is a variable;
//! - `t[i]` starts with a type name and `t[i+1]` is not `main` → `t[i+1]` is a function.
//!
//! There is no scope or type analysis. `int T, l;` classifies `T` as a
//! function, `int * p;` classifies `*` as a function, and a stdlib token such
//! as `tmpnam` counts as a type because it starts with `tm`. Both sides of a
//! comparison get the same false positives, which is what matters for
//! fingerprinting. `identifiers_only` narrows candidates to identifier tokens;
//! it is off by default because it changes which streams count as equal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::CanonicalizeConfig;
use crate::token::Token;
use crate::vocabulary::Vocabulary;

/// Names found by a classifier, by role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub variables: BTreeSet<String>,
    pub functions: BTreeSet<String>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.functions.is_empty()
    }
}

/// Strategy that decides which identifiers get replaced by placeholders.
pub trait IdentifierClassifier: Send + Sync {
    fn classify(&self, tokens: &[Token]) -> Classification;
}

/// Sliding three-token declaration heuristic.
#[derive(Debug, Clone, Copy)]
pub struct PatternClassifier<'v> {
    vocab: &'v Vocabulary,
    tail_margin: usize,
    identifiers_only: bool,
}

impl PatternClassifier<'static> {
    /// Classifier over the shared vocabulary with settings from `cfg`.
    pub fn from_config(cfg: &CanonicalizeConfig) -> Self {
        PatternClassifier::with_vocabulary(Vocabulary::shared(), cfg)
    }
}

impl<'v> PatternClassifier<'v> {
    pub fn with_vocabulary(vocab: &'v Vocabulary, cfg: &CanonicalizeConfig) -> Self {
        Self {
            vocab,
            tail_margin: cfg.tail_margin,
            identifiers_only: cfg.identifiers_only,
        }
    }
}

impl IdentifierClassifier for PatternClassifier<'_> {
    fn classify(&self, tokens: &[Token]) -> Classification {
        let mut found = Classification::default();
        let scan_end = tokens.len().saturating_sub(self.tail_margin);

        for idx in 0..scan_end {
            if !self.vocab.is_type_prefixed(&tokens[idx].text) {
                continue;
            }
            let Some(candidate) = tokens.get(idx + 1) else {
                continue;
            };
            if self.identifiers_only && !candidate.is_identifier() {
                continue;
            }
            let assigned = tokens.get(idx + 2).is_some_and(|next| next.text == "=");
            if assigned {
                found.variables.insert(candidate.text.clone());
            } else if candidate.text != "main" {
                found.functions.insert(candidate.text.clone());
            }
        }

        found
    }
}
