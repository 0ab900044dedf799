//! Codeprint canonical token layer.
//!
//! Turns C/C++-like source text into a canonical token stream that downstream
//! stages (k-gram hashing, winnowing) can fingerprint.
//!
//! ## What we do
//!
//! - Whitespace normalization (every run collapses to one space)
//! - Lexing against a fixed vocabulary of operators, types, keywords and
//!   standard-library symbols
//! - Identifier canonicalization: declared variables become `VAR`, declared
//!   functions become `FUNC`, so renamed copies of a program produce the same
//!   stream
//!
//! ## What we don't do
//!
//! No parsing, no symbol table, no comment stripping. Declarations are found
//! with a token-pattern heuristic (see [`PatternClassifier`]); callers that need
//! something smarter implement [`IdentifierClassifier`].
//!
//! ## Pure function guarantee
//!
//! No I/O, no clocks in the output, no global mutable state. The vocabulary is
//! built once and only ever read. Same text + same config = same stream.
//!
//! ```
//! use canonical::{lex_and_canonicalize, CanonicalizeConfig};
//!
//! let cfg = CanonicalizeConfig::default();
//! let a = lex_and_canonicalize("int count = 0; count++; return count;", &cfg).unwrap();
//! let b = lex_and_canonicalize("int n = 0; n++; return n;", &cfg).unwrap();
//! assert_eq!(a.tokens, b.tokens);
//! ```

mod classify;
mod config;
mod error;
mod pipeline;
mod token;
mod vocabulary;
mod whitespace;

pub use crate::classify::{Classification, IdentifierClassifier, PatternClassifier};
pub use crate::config::{CanonicalizeConfig, FUNC_PLACEHOLDER, VAR_PLACEHOLDER};
pub use crate::error::CanonicalError;
pub use crate::pipeline::{
    canonicalize, canonicalize_with, lex_and_canonicalize, rewrite_identifiers, CanonicalStream,
};
pub use crate::token::{tokenize, tokenize_with, Token, TokenKind};
pub use crate::vocabulary::Vocabulary;
pub use crate::whitespace::collapse_whitespace;

#[cfg(test)]
mod tests {
    use super::*;

    const WHILE_LOOP: &str = r#"
int main() {
    int i = 0;
    while (i < 10) {
        printf("%d\n", i);
        i++;
    }
    return 0;
}
"#;

    #[test]
    fn end_to_end_stream() {
        let stream = lex_and_canonicalize(WHILE_LOOP, &CanonicalizeConfig::default()).unwrap();
        let texts: Vec<&str> = stream.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(&texts[..10], ["int", "main", "(", ")", "{", "int", "VAR", "=", "0", ";"]);
        assert!(!texts.contains(&"i"));
        assert!(stream.classification.variables.contains("i"));
    }

    #[test]
    fn formatting_does_not_matter() {
        let cfg = CanonicalizeConfig::default();
        let compact = WHILE_LOOP.split_whitespace().collect::<Vec<_>>().join(" ");
        let a = lex_and_canonicalize(WHILE_LOOP, &cfg).unwrap();
        let b = lex_and_canonicalize(&compact, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn deterministic() {
        let cfg = CanonicalizeConfig::default();
        let a = lex_and_canonicalize(WHILE_LOOP, &cfg).unwrap();
        let b = lex_and_canonicalize(WHILE_LOOP, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tokenize_then_canonicalize_matches_combined_call() {
        let cfg = CanonicalizeConfig::default();
        let tokens = tokenize(WHILE_LOOP);
        let staged = canonicalize(&tokens, &cfg).unwrap();
        let combined = lex_and_canonicalize(WHILE_LOOP, &cfg).unwrap();
        assert_eq!(staged, combined.tokens);
    }
}
