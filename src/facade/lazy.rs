//! Deferred lookups returned by [`JabTable::get`] and [`JabTable::find`].
//!
//! Building a handle does no I/O. Every resolving call fetches a fresh table
//! snapshot through the adapter; nothing is cached between calls.

use super::{JabTable, decode_value};
use crate::core::{DbError, Result};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Deferred lookup of a single entry by id.
pub struct LazyValue<T> {
    table: JabTable,
    id: String,
    allow_missing: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> LazyValue<T> {
    pub(crate) fn new(table: JabTable, id: String, allow_missing: bool) -> Self {
        Self {
            table,
            id,
            allow_missing,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolves the entry's value.
    ///
    /// A missing entry resolves to `Ok(None)` when missing entries are allowed,
    /// and to [`DbError::EntryNotFound`] otherwise.
    pub async fn value(&self) -> Result<Option<T>> {
        let snapshot = self.table.fetch().await?;
        match snapshot.get(&self.id) {
            Some(entry) => Ok(Some(decode_value::<T>(&entry.value)?)),
            None if self.allow_missing => Ok(None),
            None => Err(DbError::entry_not_found(self.table.name(), &self.id)),
        }
    }
}

/// Deferred predicate scan over a table, in insertion order.
pub struct LazyQuery<T, F> {
    table: JabTable,
    predicate: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> LazyQuery<T, F>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool,
{
    pub(crate) fn new(table: JabTable, predicate: F) -> Self {
        Self {
            table,
            predicate,
            _marker: PhantomData,
        }
    }

    /// First matching value, or `None`.
    pub async fn value(&self) -> Result<Option<T>> {
        let snapshot = self.table.fetch().await?;
        for entry in snapshot.entries.values() {
            let value = decode_value::<T>(&entry.value)?;
            if (self.predicate)(&value) {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// All matching values.
    pub async fn values(&self) -> Result<Vec<T>> {
        let snapshot = self.table.fetch().await?;
        let mut matches = Vec::new();
        for entry in snapshot.entries.values() {
            let value = decode_value::<T>(&entry.value)?;
            if (self.predicate)(&value) {
                matches.push(value);
            }
        }
        Ok(matches)
    }

    pub async fn count(&self) -> Result<usize> {
        let snapshot = self.table.fetch().await?;
        let mut count = 0;
        for entry in snapshot.entries.values() {
            if (self.predicate)(&decode_value::<T>(&entry.value)?) {
                count += 1;
            }
        }
        Ok(count)
    }
}
