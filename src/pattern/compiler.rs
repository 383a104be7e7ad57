//! Wildcard pattern compiler.
//!
//! # Responsibilities
//! - Turn a raw pattern into an `Expression`
//! - Group each run of gap markers with the literal run that follows it
//!
//! # Design Decisions
//! - Scans by code point, literals are stored re-encoded as UTF-8 bytes
//! - Total: every input compiles, a pattern without markers is one literal token
//! - A gap run with nothing after it becomes a token with an empty literal

use crate::pattern::token::{Expression, Token};

/// Matches any run of bytes, including an empty one.
pub const MULTI_GAP: char = '*';

/// Matches exactly one byte.
pub const SINGLE_GAP: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Literal,
    Single,
    Multi,
}

impl Mode {
    fn of(c: char) -> Self {
        match c {
            MULTI_GAP => Mode::Multi,
            SINGLE_GAP => Mode::Single,
            _ => Mode::Literal,
        }
    }

    fn is_gap(self) -> bool {
        matches!(self, Mode::Single | Mode::Multi)
    }
}

/// Compile a wildcard pattern into its token sequence.
///
/// Invalid UTF-8 is replaced by U+FFFD before scanning.
pub fn compile(pattern: &[u8]) -> Expression {
    let text = String::from_utf8_lossy(pattern);

    let mut tokens = Vec::new();
    let mut pending = Token::default();
    let mut last: Option<Mode> = None;
    let mut utf8 = [0u8; 4];

    for c in text.chars() {
        let mode = Mode::of(c);

        // A gap after a literal run closes the current token.
        if mode.is_gap() && last == Some(Mode::Literal) {
            tokens.push(std::mem::take(&mut pending));
        }

        match mode {
            Mode::Single => pending.skip += 1,
            Mode::Multi => pending.unbounded = true,
            Mode::Literal => pending
                .literal
                .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes()),
        }

        last = Some(mode);
    }

    if last.is_some() {
        tokens.push(pending);
    }

    Expression::new(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(pattern: &str) -> Vec<Token> {
        compile(pattern.as_bytes()).tokens().to_vec()
    }

    #[test]
    fn test_plain_literal() {
        assert_eq!(tokens("chrome"), vec![Token::literal("chrome")]);
    }

    #[test]
    fn test_empty_pattern() {
        assert!(compile(b"").is_empty());
    }

    #[test]
    fn test_trailing_multi_gap() {
        assert_eq!(
            tokens("chrome*"),
            vec![Token::literal("chrome"), Token::new(0, "", true)]
        );
    }

    #[test]
    fn test_single_gaps_accumulate_skip() {
        assert_eq!(
            tokens("chrome??x"),
            vec![Token::literal("chrome"), Token::new(2, "x", false)]
        );
    }

    #[test]
    fn test_mixed_gap_run_groups_with_following_literal() {
        assert_eq!(
            tokens("a?*b*c"),
            vec![
                Token::literal("a"),
                Token::new(1, "b", true),
                Token::new(0, "c", true),
            ]
        );
    }

    #[test]
    fn test_leading_gap() {
        assert_eq!(
            tokens("*googlebot*"),
            vec![Token::new(0, "googlebot", true), Token::new(0, "", true)]
        );
        assert_eq!(tokens("*"), vec![Token::new(0, "", true)]);
    }

    #[test]
    fn test_multibyte_literal_is_utf8() {
        assert_eq!(
            tokens("é*ü"),
            vec![Token::literal("é"), Token::new(0, "ü", true)]
        );
    }

    #[test]
    fn test_realistic_pattern() {
        let exp = compile(b"mozilla/5.0 (*mac os x*)*chrome/37.0*safari/*");
        let literals: Vec<&[u8]> = exp.tokens().iter().map(|t| t.literal_bytes()).collect();
        assert_eq!(
            literals,
            vec![
                &b"mozilla/5.0 ("[..],
                &b"mac os x"[..],
                &b")"[..],
                &b"chrome/37.0"[..],
                &b"safari/"[..],
                &b""[..],
            ]
        );
        assert!(!exp.tokens()[0].is_fuzzy());
        assert!(exp.tokens()[1..].iter().all(Token::is_unbounded));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let pattern = b"Mozilla/5.0 (*Windows NT 6.1*)*Firefox/??.0*";
        assert_eq!(compile(pattern), compile(pattern));
    }
}
