//! Build input: one pattern with its attribute map.

use std::collections::HashMap;

use crate::record::PARENT_KEY;

/// One dataset entry.
///
/// `name` identifies the record (parents refer to it), `pattern` is the raw
/// wildcard rule. For browscap data both are the section title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub pattern: String,
    pub properties: HashMap<String, String>,
}

impl Entry {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            properties: HashMap::new(),
        }
    }

    /// Entry whose name is also its pattern.
    pub fn section(title: impl Into<String>) -> Self {
        let title = title.into();
        Self::new(title.clone(), title)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_parent(self, parent: impl Into<String>) -> Self {
        self.with_property(PARENT_KEY, parent)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
