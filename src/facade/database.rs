use super::JabTable;
use crate::core::{DbError, Result, Table};
use crate::storage::{Adapter, MemoryAdapter, SingleFileAdapter};
use log::info;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Entry point of the store: owns one adapter and manages tables.
///
/// `JabDb` is cheap to clone; clones share the adapter.
#[derive(Clone)]
pub struct JabDb {
    adapter: Arc<dyn Adapter>,
}

impl JabDb {
    pub fn new<A: Adapter + 'static>(adapter: A) -> Self {
        Self::from_arc(Arc::new(adapter))
    }

    pub fn from_arc(adapter: Arc<dyn Adapter>) -> Self {
        Self { adapter }
    }

    /// Database stored in a single JSON file, default settings.
    pub fn single_file(path: impl AsRef<Path>) -> Self {
        Self::new(SingleFileAdapter::new(path))
    }

    /// Database that lives only in process memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryAdapter::new())
    }

    pub fn adapter(&self) -> &Arc<dyn Adapter> {
        &self.adapter
    }

    pub async fn connect(&self) -> Result<()> {
        self.adapter.connect().await
    }

    /// Handle to an existing table.
    pub async fn get_table(&self, name: &str) -> Result<JabTable> {
        let table = self.adapter.get_table(name).await?;
        Ok(self.handle(table.name))
    }

    pub async fn has_table(&self, name: &str) -> Result<bool> {
        self.adapter.has_table(name).await
    }

    /// Creates an empty table.
    ///
    /// If the table already exists, returns a handle to it when
    /// `return_existing_if_present` is set and fails with
    /// [`DbError::TableAlreadyExists`] otherwise.
    pub async fn create_table(
        &self,
        name: &str,
        return_existing_if_present: bool,
    ) -> Result<JabTable> {
        if self.adapter.has_table(name).await? {
            if return_existing_if_present {
                return Ok(self.handle(name));
            }
            return Err(DbError::TableAlreadyExists(name.to_string()));
        }

        self.adapter.save_table(&Table::new(name)).await?;
        info!("created table '{}'", name);
        Ok(self.handle(name))
    }

    /// Same as `create_table(name, true)`.
    pub async fn create_table_or_get(&self, name: &str) -> Result<JabTable> {
        self.create_table(name, true).await
    }

    pub async fn delete_table(&self, name: &str) -> Result<()> {
        self.adapter.delete_table(name).await?;
        info!("deleted table '{}'", name);
        Ok(())
    }

    fn handle(&self, name: impl Into<String>) -> JabTable {
        JabTable::new(name, Arc::clone(&self.adapter))
    }
}

impl fmt::Debug for JabDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JabDb").finish_non_exhaustive()
    }
}
