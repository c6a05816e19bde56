//! Persisted data shapes: [`Entry`], [`Table`] and [`Database`].
//!
//! These are plain values. Adapters own the [`Database`]; the facade layer only
//! ever holds a [`Table`] snapshot for the duration of one operation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single identified record within a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub value: JsonValue,
}

impl Entry {
    pub fn new(id: impl Into<String>, value: JsonValue) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// A named collection of entries, iterated in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub entries: IndexMap<String, Entry>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.get_mut(id)
    }

    /// Inserts or replaces the entry keyed by its own id.
    ///
    /// Replacing keeps the entry's original position.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.id.clone(), entry)
    }

    /// Removes an entry, preserving the order of the remaining ones.
    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        self.entries.shift_remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// The complete persisted state: metadata plus every table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Database {
    pub meta: IndexMap<String, JsonValue>,
    pub tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural check applied to raw persisted documents before decoding:
    /// the top level must be an object carrying both `meta` and `tables`.
    pub fn is_database(value: &JsonValue) -> bool {
        value
            .as_object()
            .is_some_and(|obj| obj.contains_key("meta") && obj.contains_key("tables"))
    }
}
