//! Pattern compilation and matching subsystem.
//!
//! # Data Flow
//! ```text
//! Pattern compilation (at build time):
//!     raw wildcard pattern ("Mozilla/5.0 (*Mac OS X*)*Chrome/37.0*")
//!     → fold.rs (case fold)
//!     → compiler.rs (group gap markers + literal runs into tokens)
//!     → Expression
//!     → index.rs (shard by leading byte, prefix trie per shard)
//!     → Freeze as immutable PatternIndex
//!
//! Lookup (at query time):
//!     folded user agent
//!     → index.rs (route to candidates whose leading literal prefixes the input)
//!     → matcher.rs (verify remaining tokens, insertion order)
//!     → Return: RecordId of first full match, or None
//! ```
//!
//! # Design Decisions
//! - Only two wildcard primitives: `?` (one byte) and `*` (any run)
//! - No regex, no backtracking: unbounded tokens take the leftmost occurrence
//! - Trailing input after the last token is accepted ("contains" semantics)
//! - First inserted match wins; the dataset is ordered most specific first

pub mod compiler;
pub mod fold;
pub mod index;
pub mod matcher;
pub mod token;

pub use compiler::compile;
pub use fold::{fold_case, fold_case_into};
pub use index::{PatternIndex, PatternIndexBuilder};
pub use matcher::match_one;
pub use token::{Expression, Token};
