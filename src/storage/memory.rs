use super::Adapter;
use crate::core::{Database, DbError, Result, Table};
use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

/// Adapter that keeps the database in process memory.
///
/// It follows the same whole-snapshot contract as the file adapter: reads hand
/// out copies and writes replace the stored database.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    database: RwLock<Database>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing database, e.g. a fixture.
    pub fn with_database(database: Database) -> Self {
        Self {
            database: RwLock::new(database),
        }
    }

    /// Copy of the whole current database.
    pub async fn snapshot(&self) -> Database {
        self.database.read().await.clone()
    }

    async fn read(&self) -> Database {
        self.database.read().await.clone()
    }

    async fn write(&self, database: Database) {
        debug!("memory adapter: replacing database ({} tables)", database.tables.len());
        *self.database.write().await = database;
    }
}

#[async_trait]
impl Adapter for MemoryAdapter {
    async fn connect(&self) -> Result<()> {
        // An in-memory database is always structurally valid.
        Ok(())
    }

    async fn get_table(&self, name: &str) -> Result<Table> {
        let database = self.read().await;
        database
            .tables
            .get(name)
            .cloned()
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    async fn save_table(&self, table: &Table) -> Result<()> {
        let mut database = self.read().await;
        database.tables.insert(table.name.clone(), table.clone());
        self.write(database).await;
        Ok(())
    }

    async fn delete_table(&self, name: &str) -> Result<()> {
        let mut database = self.read().await;
        if database.tables.shift_remove(name).is_none() {
            return Err(DbError::TableNotFound(name.to_string()));
        }
        self.write(database).await;
        Ok(())
    }
}
