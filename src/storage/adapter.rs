use crate::core::{DbError, Result, Table};
use async_trait::async_trait;

/// Storage adapter trait - the pluggable persistence backend behind `JabDb`.
///
/// Implementations own the whole [`Database`](crate::core::Database). Each call
/// reads the full persisted state before acting, and a mutating call writes the
/// full state back. Nothing is locked between calls, so two interleaved
/// read-modify-write cycles can overwrite each other.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Initialize the backing store. Creates an empty database when nothing is
    /// persisted yet, otherwise validates the persisted shape.
    async fn connect(&self) -> Result<()>;

    /// Fetch a snapshot of a table.
    async fn get_table(&self, name: &str) -> Result<Table>;

    /// Insert the table, or replace a table of the same name.
    async fn save_table(&self, table: &Table) -> Result<()>;

    /// Remove a table.
    async fn delete_table(&self, name: &str) -> Result<()>;

    /// Check whether a table exists.
    async fn has_table(&self, name: &str) -> Result<bool> {
        match self.get_table(name).await {
            Ok(_) => Ok(true),
            Err(DbError::TableNotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
