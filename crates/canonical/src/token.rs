use serde::{Deserialize, Serialize};

use crate::vocabulary::Vocabulary;
use crate::whitespace::collapse_whitespace;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Type,
    StdlibSymbol,
    /// Operators and single-character delimiters.
    Punctuation,
    /// Anything else: user identifiers, literals, fragments of strings and comments.
    Identifier,
}

/// A lexical token. Tokens are immutable once produced; later stages build
/// new tokens instead of editing these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// A placeholder that stands in for a rewritten identifier (`VAR`, `FUNC`).
    pub fn placeholder(text: &str) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Tokenize source text with the shared C/C++ vocabulary.
///
/// ```
/// use canonical::{tokenize, TokenKind};
///
/// let tokens = tokenize("cin>>a;\n  i++;");
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["cin", ">>", "a", ";", "i", "++", ";"]);
/// assert_eq!(tokens[0].kind, TokenKind::StdlibSymbol);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with(text, Vocabulary::shared())
}

/// Tokenize source text with an explicit vocabulary.
///
/// Whitespace runs are collapsed first. At each position the longest operator
/// wins, then the longest type, keyword or stdlib name starting there. Names
/// are matched inside words too, so `point` lexes as `po` `int`. Characters
/// between matches accumulate into a single identifier token.
/// Comments and string contents are not special: they are lexed like code.
///
/// ```
/// use canonical::{tokenize, TokenKind};
///
/// let tokens = tokenize("point tmp");
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["po", "int", "tm", "p"]);
/// assert_eq!(tokens[1].kind, TokenKind::Type);
/// ```
pub fn tokenize_with(text: &str, vocab: &Vocabulary) -> Vec<Token> {
    let normalized = collapse_whitespace(text);
    let mut tokens = Vec::with_capacity((normalized.len() / 3).saturating_add(1));
    let mut word_start: Option<usize> = None;

    let mut idx = 0;
    while idx < normalized.len() {
        let rest = &normalized[idx..];
        if rest.starts_with(' ') {
            finalize_word(&mut tokens, &normalized, &mut word_start, idx, vocab);
            idx += 1;
            continue;
        }
        if let Some(op) = vocab.operator_at(rest) {
            finalize_word(&mut tokens, &normalized, &mut word_start, idx, vocab);
            tokens.push(Token::new(TokenKind::Punctuation, op));
            idx += op.len();
            continue;
        }
        if let Some(name) = vocab.name_at(rest) {
            finalize_word(&mut tokens, &normalized, &mut word_start, idx, vocab);
            tokens.push(Token::new(vocab.classify_word(name), name));
            idx += name.len();
            continue;
        }
        if word_start.is_none() {
            word_start = Some(idx);
        }
        // Advance by one whole char so slicing stays on UTF-8 boundaries.
        idx += rest.chars().next().map_or(1, char::len_utf8);
    }
    finalize_word(
        &mut tokens,
        &normalized,
        &mut word_start,
        normalized.len(),
        vocab,
    );

    tokens
}

fn finalize_word(
    tokens: &mut Vec<Token>,
    text: &str,
    word_start: &mut Option<usize>,
    end: usize,
    vocab: &Vocabulary,
) {
    if let Some(start) = word_start.take() {
        if start < end {
            let word = &text[start..end];
            tokens.push(Token::new(vocab.classify_word(word), word));
        }
    }
}
