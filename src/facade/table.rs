use super::encode_value;
use super::ids::resolve_id;
use super::lazy::{LazyQuery, LazyValue};
use super::merge::{FieldResolver, Patch};
use crate::core::{DbError, Entry, Result, Table};
use crate::storage::Adapter;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Handle to one table.
///
/// Holds only the table name and the shared adapter. Every operation fetches
/// the table, works on that snapshot and, if it changed anything, saves the
/// whole table back. Two handles mutating the same table concurrently can
/// therefore lose each other's updates.
#[derive(Clone)]
pub struct JabTable {
    name: String,
    adapter: Arc<dyn Adapter>,
}

impl JabTable {
    pub(crate) fn new(name: impl Into<String>, adapter: Arc<dyn Adapter>) -> Self {
        Self {
            name: name.into(),
            adapter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) async fn fetch(&self) -> Result<Table> {
        self.adapter.get_table(&self.name).await
    }

    async fn store(&self, table: &Table) -> Result<()> {
        self.adapter.save_table(table).await
    }

    /// Number of entries.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.fetch().await?.len())
    }

    pub async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.fetch().await?.contains(id))
    }

    /// Entry ids in insertion order.
    pub async fn ids(&self) -> Result<Vec<String>> {
        Ok(self.fetch().await?.entries.into_keys().collect())
    }

    /// Deferred lookup of the value stored under `id`.
    ///
    /// # Example
    /// ```ignore
    /// let user: Option<User> = table.get("0", false).value().await?;
    /// ```
    pub fn get<T: DeserializeOwned>(
        &self,
        id: impl Into<String>,
        allow_missing: bool,
    ) -> LazyValue<T> {
        LazyValue::new(self.clone(), id.into(), allow_missing)
    }

    /// Deferred scan for values matching `predicate`.
    ///
    /// # Example
    /// ```ignore
    /// let adults: Vec<User> = table.find(|u: &User| u.age >= 18).values().await?;
    /// ```
    pub fn find<T, F>(&self, predicate: F) -> LazyQuery<T, F>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        LazyQuery::new(self.clone(), predicate)
    }

    /// Stores `value` as a new entry and returns its id.
    ///
    /// Without `id`, or when `id` is already taken, the entry gets the next
    /// numeric id: one past the largest id that parses as an integer, or `"0"`.
    pub async fn create<T: Serialize>(&self, value: T, id: Option<&str>) -> Result<String> {
        let value = encode_value(&value)?;
        let mut table = self.fetch().await?;

        let final_id = resolve_id(&table, id)?;
        if let Some(requested) = id.filter(|requested| *requested != final_id) {
            debug!(
                "table '{}': id '{}' already taken, using '{}'",
                self.name, requested, final_id
            );
        }

        table.insert(Entry::new(final_id.clone(), value));
        self.store(&table).await?;
        Ok(final_id)
    }

    /// Creates or overwrites the entry at `id`.
    pub async fn put<T: Serialize>(&self, id: &str, value: T) -> Result<()> {
        let value = encode_value(&value)?;
        let mut table = self.fetch().await?;
        table.insert(Entry::new(id, value));
        self.store(&table).await
    }

    /// Merges `partials` into the entry at `id`, in order. Later partials win
    /// per top-level field.
    pub async fn patch<P, I>(&self, id: &str, partials: I) -> Result<()>
    where
        P: Serialize,
        I: IntoIterator<Item = P>,
    {
        self.patch_with(id, None::<FieldResolver>, partials).await
    }

    /// Like [`patch`](Self::patch), but `customizer(existing, incoming)` may
    /// decide each field. Returning `None` keeps the default override.
    pub async fn patch_with<P, I, F>(
        &self,
        id: &str,
        customizer: Option<F>,
        partials: I,
    ) -> Result<()>
    where
        P: Serialize,
        I: IntoIterator<Item = P>,
        F: Fn(Option<&JsonValue>, &JsonValue) -> Option<JsonValue>,
    {
        let partials = partials
            .into_iter()
            .map(|partial| encode_value(&partial))
            .collect::<Result<Vec<_>>>()?;
        let patch = Patch::from_partials(partials);

        let mut table = self.fetch().await?;
        let entry = table
            .get_mut(id)
            .ok_or_else(|| DbError::entry_not_found(&self.name, id))?;
        patch.apply_with(&mut entry.value, customizer);

        self.store(&table).await
    }

    /// Removes the entry at `id`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut table = self.fetch().await?;
        if table.remove(id).is_none() {
            return Err(DbError::entry_not_found(&self.name, id));
        }
        self.store(&table).await
    }
}

impl fmt::Debug for JabTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JabTable")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
