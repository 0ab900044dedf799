use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{Classification, IdentifierClassifier, PatternClassifier};
use crate::config::{CanonicalizeConfig, FUNC_PLACEHOLDER, VAR_PLACEHOLDER};
use crate::error::CanonicalError;
use crate::token::{tokenize, Token};

/// Output of [`lex_and_canonicalize`]: the rewritten stream plus the names
/// that were rewritten, for inspection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalStream {
    pub tokens: Vec<Token>,
    pub classification: Classification,
}

/// Main entry point. Rewrites declared variable and function names to the
/// `VAR` / `FUNC` placeholders using the declaration heuristic.
///
/// Returns a new token stream; `tokens` is left untouched.
pub fn canonicalize(
    tokens: &[Token],
    cfg: &CanonicalizeConfig,
) -> Result<Vec<Token>, CanonicalError> {
    cfg.validate()?;
    let classifier = PatternClassifier::from_config(cfg);
    Ok(canonicalize_with(tokens, &classifier))
}

/// Rewrite step with any classifier.
///
/// Every occurrence of a classified name is replaced, not only the one at the
/// declaration site. A name classified both ways becomes `VAR`.
pub fn canonicalize_with(tokens: &[Token], classifier: &dyn IdentifierClassifier) -> Vec<Token> {
    let classification = classifier.classify(tokens);
    rewrite_identifiers(tokens, &classification)
}

/// Lex `text` and canonicalize the result in one call.
pub fn lex_and_canonicalize(
    text: &str,
    cfg: &CanonicalizeConfig,
) -> Result<CanonicalStream, CanonicalError> {
    cfg.validate()?;
    let start = Instant::now();

    let raw = tokenize(text);
    let classification = PatternClassifier::from_config(cfg).classify(&raw);
    let tokens = rewrite_identifiers(&raw, &classification);

    debug!(
        token_count = tokens.len(),
        variables = classification.variables.len(),
        functions = classification.functions.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "canonicalize_success"
    );

    Ok(CanonicalStream {
        tokens,
        classification,
    })
}

/// Replace every occurrence of a classified name with its placeholder.
pub fn rewrite_identifiers(tokens: &[Token], classification: &Classification) -> Vec<Token> {
    if classification.is_empty() {
        return tokens.to_vec();
    }
    tokens
        .iter()
        .map(|token| {
            if classification.variables.contains(&token.text) {
                Token::placeholder(VAR_PLACEHOLDER)
            } else if classification.functions.contains(&token.text) {
                Token::placeholder(FUNC_PLACEHOLDER)
            } else {
                token.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    struct FixedClassifier(Classification);

    impl IdentifierClassifier for FixedClassifier {
        fn classify(&self, _tokens: &[Token]) -> Classification {
            self.0.clone()
        }
    }

    #[test]
    fn variable_declaration_rewritten() {
        let tokens = tokenize("int x = 1 ;");
        let out = canonicalize(&tokens, &CanonicalizeConfig::default()).unwrap();
        assert_eq!(texts(&out), ["int", "VAR", "=", "1", ";"]);
        // Input is not modified.
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn function_declaration_rewritten() {
        let tokens = tokenize("int f ( ) { return 1 ; }");
        let out = canonicalize(&tokens, &CanonicalizeConfig::default()).unwrap();
        assert_eq!(
            texts(&out),
            ["int", "FUNC", "(", ")", "{", "return", "1", ";", "}"]
        );
        assert_eq!(out[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn pointer_star_is_rewritten_everywhere_by_default() {
        let tokens = tokenize("int * p ; a = b * c ; return 0 ;");
        let out = canonicalize(&tokens, &CanonicalizeConfig::default()).unwrap();
        assert_eq!(
            texts(&out),
            ["int", "FUNC", "p", ";", "a", "=", "b", "FUNC", "c", ";", "return", "0", ";"]
        );

        let strict = CanonicalizeConfig::new().with_identifiers_only(true);
        assert_eq!(canonicalize(&tokens, &strict).unwrap(), tokens);
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let tokens = tokenize("int n = 0 ; n = n + 1 ; return n ;");
        let out = canonicalize(&tokens, &CanonicalizeConfig::default()).unwrap();
        assert!(!texts(&out).contains(&"n"));
        assert_eq!(texts(&out).iter().filter(|t| **t == "VAR").count(), 4);
    }

    #[test]
    fn renamed_programs_collapse_to_same_stream() {
        let cfg = CanonicalizeConfig::default();
        let a = lex_and_canonicalize("int total = 0 ; total = total + step ( ) ; return total ;", &cfg)
            .unwrap();
        let b = lex_and_canonicalize("int sum = 0 ; sum = sum + step ( ) ; return sum ;", &cfg)
            .unwrap();
        assert_eq!(a.tokens, b.tokens);
        assert!(a.classification.variables.contains("total"));
        assert!(b.classification.variables.contains("sum"));
    }

    #[test]
    fn variable_wins_over_function() {
        let mut classification = Classification::default();
        classification.variables.insert("x".into());
        classification.functions.insert("x".into());
        let out = canonicalize_with(&tokenize("x ;"), &FixedClassifier(classification));
        assert_eq!(texts(&out), ["VAR", ";"]);
    }

    #[test]
    fn custom_classifier_is_used() {
        let mut classification = Classification::default();
        classification.functions.insert("helper".into());
        let out = canonicalize_with(&tokenize("helper ( x ) ;"), &FixedClassifier(classification));
        assert_eq!(texts(&out), ["FUNC", "(", "x", ")", ";"]);
    }

    #[test]
    fn empty_stream_is_noop() {
        let out = canonicalize(&[], &CanonicalizeConfig::default()).unwrap();
        assert!(out.is_empty());
        let stream = lex_and_canonicalize("  \n ", &CanonicalizeConfig::default()).unwrap();
        assert!(stream.tokens.is_empty());
        assert!(stream.classification.is_empty());
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = CanonicalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(canonicalize(&tokenize("int x = 1 ;"), &cfg).is_err());
        assert!(matches!(
            lex_and_canonicalize("int x = 1 ;", &cfg),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }
}
