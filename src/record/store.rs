//! Record storage and lazy inheritance resolution.
//!
//! # Responsibilities
//! - Own one `CapabilityRecord` per entry, addressable by `RecordId` and name
//! - Resolve a record's inherited attributes on first access
//!
//! # Design Decisions
//! - Immutable after build; only the per-record `OnceLock` is written later
//! - Resolution reads ancestors' raw attributes, so it never waits on them
//! - The parent walk remembers the records it passed, a cycle ends after one lap

use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::catalog::BuildError;
use crate::record::attribute::{Attribute, PARENT_KEY};
use crate::record::capabilities::Capabilities;
use crate::record::RecordId;

/// A named attribute set with an optional parent reference.
#[derive(Debug)]
pub struct CapabilityRecord {
    name: String,
    parent: Option<String>,
    raw: Capabilities,
    resolved: OnceLock<Capabilities>,
}

impl CapabilityRecord {
    pub fn new(name: impl Into<String>, parent: Option<String>, raw: Capabilities) -> Self {
        Self {
            name: name.into(),
            parent: parent.filter(|p| !p.is_empty()),
            raw,
            resolved: OnceLock::new(),
        }
    }

    /// Build a record from dataset key/value pairs.
    ///
    /// `Parent` sets the parent reference, unknown keys are ignored.
    pub fn from_properties<'a, I>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut parent = None;
        let mut raw = Capabilities::default();
        for (key, value) in properties {
            if key == PARENT_KEY {
                parent = Some(value.to_string());
            } else if let Some(attr) = Attribute::from_key(key) {
                raw.set(attr, value);
            }
        }
        Self::new(name, parent, raw)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Attributes exactly as given by the entry, without inheritance.
    pub fn raw(&self) -> &Capabilities {
        &self.raw
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Resolved attributes, if resolution already ran.
    pub fn resolved(&self) -> Option<&Capabilities> {
        self.resolved.get()
    }
}

/// All records of one catalog generation.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<CapabilityRecord>,
    by_name: HashMap<String, RecordId>,
    /// Number of inheritance merges performed.
    #[cfg(test)]
    merges: AtomicUsize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
            #[cfg(test)]
            merges: AtomicUsize::new(0),
        }
    }

    /// Add a record. Names must be unique within a store.
    pub fn insert(&mut self, record: CapabilityRecord) -> Result<RecordId, BuildError> {
        if self.by_name.contains_key(record.name()) {
            return Err(BuildError::DuplicateName(record.name));
        }
        let id = u32::try_from(self.records.len())
            .map(RecordId)
            .map_err(|_| BuildError::TooManyEntries(self.records.len()))?;

        self.by_name.insert(record.name.clone(), id);
        self.records.push(record);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&CapabilityRecord> {
        self.records.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<RecordId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&CapabilityRecord> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.records.shrink_to_fit();
        self.by_name.shrink_to_fit();
    }

    /// Resolved attributes of `id`, running inheritance on first access.
    ///
    /// Exactly one caller performs the merge; concurrent callers block until
    /// it is published and then all observe the same complete value.
    ///
    /// # Panics
    /// If `id` was not issued by this store.
    pub fn resolve(&self, id: RecordId) -> &Capabilities {
        let record = &self.records[id.index()];
        record.resolved.get_or_init(|| self.inherit(id, record))
    }

    /// Ancestors of `id`, nearest first.
    ///
    /// Ends at a missing parent, or before revisiting a record already on the
    /// chain (including `id` itself).
    pub fn ancestors(&self, id: RecordId) -> Ancestors<'_> {
        Ancestors {
            store: self,
            visited: vec![id],
            next: self.get(id).and_then(CapabilityRecord::parent),
        }
    }

    /// Merge the ancestor chain of `record` into a copy of its raw attributes.
    fn inherit(&self, id: RecordId, record: &CapabilityRecord) -> Capabilities {
        #[cfg(test)]
        self.merges.fetch_add(1, Ordering::Relaxed);

        let mut merged = record.raw.clone();
        for ancestor in self.ancestors(id) {
            if merged.is_complete() {
                break;
            }
            merged.inherit_from(&ancestor.raw);
        }
        merged
    }
}

/// Iterator over a record's parent chain. See [`RecordStore::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    store: &'a RecordStore,
    visited: Vec<RecordId>,
    next: Option<&'a str>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a CapabilityRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.next.take()?;
        let Some(id) = self.store.id_of(name) else {
            tracing::trace!(parent = %name, "parent not found, stopping");
            return None;
        };
        if self.visited.contains(&id) {
            tracing::warn!(parent = %name, "parent chain cycle, stopping");
            return None;
        }

        self.visited.push(id);
        let ancestor = &self.store.records[id.index()];
        self.next = ancestor.parent();
        Some(ancestor)
    }
}
