//! Capability record subsystem.
//!
//! # Data Flow
//! ```text
//! Build:
//!     entry attribute map ("Browser" => "Chrome", "Parent" => "Chrome 37.0", ...)
//!     → attribute.rs (known keys only, unknown keys dropped)
//!     → capabilities.rs (raw attribute set)
//!     → store.rs (CapabilityRecord keyed by name and RecordId)
//!
//! Lookup:
//!     RecordId
//!     → store.rs resolve (once per record)
//!     → walk parent chain, fill empty attributes from ancestors
//!     → Return: resolved Capabilities
//! ```
//!
//! # Design Decisions
//! - Inheritance is an explicit merge over the `Attribute` list
//! - Raw attributes are immutable after build; resolution writes a separate slot
//! - Resolution runs at most once per record (`OnceLock`), other records never block
//! - Missing or cyclic parents end the walk, they are not errors

pub mod attribute;
pub mod capabilities;
pub mod store;

pub use attribute::{Attribute, PARENT_KEY};
pub use capabilities::Capabilities;
pub use store::{Ancestors, CapabilityRecord, RecordStore};

/// Dense identifier of a record within one catalog generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) u32);

impl RecordId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<RecordId> for u32 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
