//! Token matching.
//!
//! # Responsibilities
//! - Apply one token to the remaining input (`match_one`)
//! - Apply a whole expression left to right (`Expression::matches`)
//!
//! # Design Decisions
//! - Pure functions over byte slices, no allocation
//! - Unbounded literals bind to their leftmost occurrence, no backtracking
//! - Bytes left over after the last token do not fail the match

use crate::pattern::token::{Expression, Token};

/// Apply a single token to `input`.
///
/// Returns the unconsumed rest of the input on success.
pub fn match_one<'a>(token: &Token, input: &'a [u8]) -> Option<&'a [u8]> {
    let rest = input.get(token.skip..)?;

    let literal = token.literal.as_slice();
    if literal.is_empty() {
        return Some(rest);
    }
    if rest.len() < literal.len() {
        return None;
    }

    if token.unbounded {
        let at = find_literal(rest, literal)?;
        Some(&rest[at + literal.len()..])
    } else {
        rest.strip_prefix(literal)
    }
}

/// Apply `tokens` in order, each one starting where the previous stopped.
pub(crate) fn match_tokens(tokens: &[Token], input: &[u8]) -> bool {
    let mut rest = input;
    for token in tokens {
        match match_one(token, rest) {
            Some(next) => rest = next,
            None => return false,
        }
    }
    true
}

/// Leftmost occurrence of a non-empty `needle` in `haystack`.
pub(crate) fn find_literal(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let (&head, tail) = needle.split_first()?;
    let last_start = haystack.len().checked_sub(needle.len())?;

    let mut from = 0;
    while from <= last_start {
        let offset = haystack[from..=last_start].iter().position(|&b| b == head)?;
        let at = from + offset;
        if haystack[at + 1..at + needle.len()] == *tail {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

impl Expression {
    /// True if every token matches in sequence against `input`.
    pub fn matches(&self, input: &[u8]) -> bool {
        match_tokens(self.tokens(), input)
    }
}
