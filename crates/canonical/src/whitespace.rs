//! Whitespace normalization applied before lexing.
//!
//! Every run of whitespace (spaces, tabs, newlines, carriage returns and other
//! Unicode whitespace) becomes a single ASCII space, and the edges are trimmed.
//! Line structure is therefore invisible to the lexer, which is what lets two
//! submissions that differ only in formatting produce the same token stream.
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("int main()\n{\r\n\treturn 0;\n}"), "int main() { return 0; }");
//! assert_eq!(collapse_whitespace("   \n\t "), "");
//! ```

/// Collapses repeated whitespace to single spaces and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_runs() {
        assert_eq!(collapse_whitespace("a \t\n b"), "a b");
        assert_eq!(collapse_whitespace("a\r\nb"), "a b");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(collapse_whitespace("  x = 1;  "), "x = 1;");
    }

    #[test]
    fn unicode_whitespace_counts() {
        assert_eq!(collapse_whitespace("a\u{00A0}b"), "a b");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n "), "");
        assert_eq!(collapse_whitespace("x"), "x");
    }
}
