//! Compiled pattern representation.

use std::fmt;

/// One matching step of a compiled pattern.
///
/// A token first consumes `skip` arbitrary bytes, then its literal. When
/// `unbounded` is set the literal may occur anywhere in the remaining input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Token {
    pub(crate) skip: usize,
    pub(crate) literal: Vec<u8>,
    pub(crate) unbounded: bool,
}

impl Token {
    /// Create a token from its parts.
    pub fn new(skip: usize, literal: impl Into<Vec<u8>>, unbounded: bool) -> Self {
        Self {
            skip,
            literal: literal.into(),
            unbounded,
        }
    }

    /// Plain literal token (no gap in front of it).
    pub fn literal(literal: impl Into<Vec<u8>>) -> Self {
        Self::new(0, literal, false)
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn literal_bytes(&self) -> &[u8] {
        &self.literal
    }

    pub fn is_unbounded(&self) -> bool {
        self.unbounded
    }

    /// True if the token does not pin its literal to the current position.
    pub fn is_fuzzy(&self) -> bool {
        self.unbounded || self.skip > 0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} {}",
            String::from_utf8_lossy(&self.literal),
            self.skip,
            self.unbounded
        )
    }
}

/// An ordered token sequence compiled from one wildcard pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Leading literal when the expression starts with a non-fuzzy token.
    pub fn anchored_prefix(&self) -> Option<&[u8]> {
        match self.first() {
            Some(token) if !token.is_fuzzy() && !token.literal.is_empty() => {
                Some(&token.literal)
            }
            _ => None,
        }
    }
}

impl From<Vec<Token>> for Expression {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_classification() {
        assert!(!Token::literal("chrome").is_fuzzy());
        assert!(Token::new(1, "", false).is_fuzzy());
        assert!(Token::new(0, "safari", true).is_fuzzy());
    }

    #[test]
    fn test_expression_equality_is_elementwise() {
        let a = Expression::new(vec![Token::literal("a"), Token::new(2, "b", true)]);
        let b = Expression::new(vec![Token::literal("a"), Token::new(2, "b", true)]);
        let c = Expression::new(vec![Token::literal("a"), Token::new(2, "b", false)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_anchored_prefix() {
        let anchored = Expression::new(vec![Token::literal("mozilla"), Token::new(0, "", true)]);
        assert_eq!(anchored.anchored_prefix(), Some(&b"mozilla"[..]));

        let floating = Expression::new(vec![Token::new(0, "bot", true)]);
        assert_eq!(floating.anchored_prefix(), None);
        assert_eq!(Expression::default().anchored_prefix(), None);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new(2, "ab", true).to_string(), "\"ab\" 2 true");
    }
}
