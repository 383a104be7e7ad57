//! Pattern index: routes a user agent to its first matching expression.
//!
//! # Responsibilities
//! - Hold every compiled expression of a catalog with its `RecordId`
//! - Narrow a lookup to the expressions that can possibly match
//! - Return the earliest inserted full match, or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after `PatternIndexBuilder::finish` (thread-safe without locks)
//! - Expressions starting with a plain literal are sharded by its first byte,
//!   each shard is a byte trie over the rest of that literal
//! - Expressions starting with a gap go to one fuzzy list, checked for every input
//! - Each candidate list is already in insertion order; a list is scanned only
//!   up to the best position found so far, so the lookup neither allocates nor sorts
//! - Before a full match, an expression is rejected cheaply when the input lacks
//!   one of its literal bytes or its longest literal

use std::collections::HashMap;

use crate::pattern::matcher::{find_literal, match_tokens};
use crate::pattern::token::Expression;
use crate::record::RecordId;

/// Set of byte values, used to reject expressions before matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ByteSet([u64; 4]);

impl ByteSet {
    fn of(bytes: &[u8]) -> Self {
        let mut set = Self::default();
        set.extend(bytes);
        set
    }

    fn extend(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0[usize::from(b >> 6)] |= 1u64 << (b & 63);
        }
    }

    fn contains_all(&self, other: &ByteSet) -> bool {
        self.0
            .iter()
            .zip(other.0)
            .all(|(&have, need)| need & !have == 0)
    }
}

#[derive(Debug)]
struct IndexedExpression {
    expression: Expression,
    record: RecordId,
    /// Tokens left to verify once routing matched the anchored prefix.
    first: usize,
    /// Every byte of the tokens from `first` on.
    bytes: ByteSet,
    /// Token with the longest literal, if any literal is longer than one byte.
    required: Option<usize>,
}

impl IndexedExpression {
    fn new(expression: Expression, record: RecordId) -> Self {
        let first = usize::from(expression.anchored_prefix().is_some());
        let tail = &expression.tokens()[first..];

        let mut bytes = ByteSet::default();
        for token in tail {
            bytes.extend(token.literal_bytes());
        }
        let required = tail
            .iter()
            .enumerate()
            .filter(|(_, token)| token.literal_bytes().len() > 1)
            .max_by_key(|(_, token)| token.literal_bytes().len())
            .map(|(i, _)| first + i);

        Self {
            expression,
            record,
            first,
            bytes,
            required,
        }
    }

    /// Full check of `candidate`. Anchored expressions assume routing already
    /// proved their leading literal is a prefix.
    fn verify(&self, candidate: &[u8], present: &ByteSet) -> bool {
        if !present.contains_all(&self.bytes) {
            return false;
        }

        let offset = self.expression.anchored_prefix().map_or(0, <[u8]>::len);
        let rest = &candidate[offset..];
        let tokens = self.expression.tokens();

        if let Some(required) = self.required {
            if find_literal(rest, tokens[required].literal_bytes()).is_none() {
                return false;
            }
        }
        match_tokens(&tokens[self.first..], rest)
    }
}

/// Byte trie over the leading literals of one shard.
#[derive(Debug, Default)]
struct PrefixTrie {
    nodes: Vec<TrieNode>,
}

#[derive(Debug, Default)]
struct TrieNode {
    /// Child node per next byte, sorted by byte.
    children: Vec<(u8, u32)>,
    /// Positions of expressions whose leading literal ends here, ascending.
    terminals: Vec<u32>,
}

impl PrefixTrie {
    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    fn insert(&mut self, key: &[u8], position: u32) {
        let mut node = 0usize;
        for &byte in key {
            node = match self.nodes[node].children.binary_search_by_key(&byte, |&(b, _)| b) {
                Ok(i) => self.nodes[node].children[i].1 as usize,
                Err(i) => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(i, (byte, child as u32));
                    child
                }
            };
        }
        self.nodes[node].terminals.push(position);
    }

    /// Call `visit` with the terminals of every key that is a prefix of `input`.
    fn for_each_prefix<F>(&self, input: &[u8], mut visit: F)
    where
        F: FnMut(&[u32]),
    {
        let mut node = &self.nodes[0];
        visit(&node.terminals);
        for &byte in input {
            match node.children.binary_search_by_key(&byte, |&(b, _)| b) {
                Ok(i) => node = &self.nodes[node.children[i].1 as usize],
                Err(_) => break,
            }
            visit(&node.terminals);
        }
    }

    fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        for node in &mut self.nodes {
            node.children.shrink_to_fit();
            node.terminals.shrink_to_fit();
        }
    }
}

/// Accumulates expressions in priority order, then freezes into a `PatternIndex`.
#[derive(Debug, Default)]
pub struct PatternIndexBuilder {
    entries: Vec<IndexedExpression>,
    shards: HashMap<u8, PrefixTrie>,
    fuzzy: Vec<u32>,
}

impl PatternIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Register `expression` for `record`. Earlier inserts take precedence.
    ///
    /// Returns `None` once the index holds `u32::MAX` expressions.
    pub fn insert(&mut self, expression: Expression, record: RecordId) -> Option<()> {
        let position = u32::try_from(self.entries.len()).ok()?;

        match expression.anchored_prefix() {
            Some(prefix) => self
                .shards
                .entry(prefix[0])
                .or_insert_with(PrefixTrie::new)
                .insert(&prefix[1..], position),
            None => self.fuzzy.push(position),
        }

        self.entries.push(IndexedExpression::new(expression, record));
        Some(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(mut self) -> PatternIndex {
        self.entries.shrink_to_fit();
        self.fuzzy.shrink_to_fit();
        for trie in self.shards.values_mut() {
            trie.shrink_to_fit();
        }
        PatternIndex {
            entries: self.entries,
            shards: self.shards,
            fuzzy: self.fuzzy,
        }
    }
}

/// Read-only index over all expressions of one catalog generation.
#[derive(Debug, Default)]
pub struct PatternIndex {
    entries: Vec<IndexedExpression>,
    shards: HashMap<u8, PrefixTrie>,
    fuzzy: Vec<u32>,
}

impl PatternIndex {
    pub fn builder() -> PatternIndexBuilder {
        PatternIndexBuilder::new()
    }

    /// Total number of registered expressions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct leading bytes among anchored expressions.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Number of expressions that must be checked against every input.
    pub fn fuzzy_count(&self) -> usize {
        self.fuzzy.len()
    }

    /// Record of the earliest inserted expression matching `candidate`.
    ///
    /// `candidate` must already be case folded.
    pub fn find(&self, candidate: &[u8]) -> Option<RecordId> {
        let present = ByteSet::of(candidate);
        let mut best = None;

        if let Some((&first, rest)) = candidate.split_first() {
            if let Some(trie) = self.shards.get(&first) {
                trie.for_each_prefix(rest, |terminals| {
                    best = self.earliest_match(terminals, candidate, &present, best);
                });
            }
        }
        best = self.earliest_match(&self.fuzzy, candidate, &present, best);

        best.map(|position| self.entries[position as usize].record)
    }

    /// First matching position of the ascending `positions` if it beats `best`.
    fn earliest_match(
        &self,
        positions: &[u32],
        candidate: &[u8],
        present: &ByteSet,
        best: Option<u32>,
    ) -> Option<u32> {
        for &position in positions {
            if best.is_some_and(|best| position >= best) {
                break;
            }
            if self.entries[position as usize].verify(candidate, present) {
                return Some(position);
            }
        }
        best
    }
}
