//! Adapter storing the whole database as one JSON document on disk.

use super::{Adapter, SingleFileConfig};
use crate::core::{Database, DbError, Result, Table};
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value as JsonValue;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::fs;

/// File-backed adapter.
///
/// Every operation reads and parses the full source file; every mutation
/// serializes the full database and replaces the file through a uniquely
/// named temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct SingleFileAdapter {
    config: SingleFileConfig,
}

impl SingleFileAdapter {
    /// Adapter over `path` with the default configuration.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_config(SingleFileConfig::new(path))
    }

    pub fn with_config(config: SingleFileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SingleFileConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn check_extension(&self) -> Result<()> {
        if self.config.require_json_extension && !self.config.has_json_extension() {
            return Err(DbError::MalformedSourceFile(format!(
                "Source file '{}' is not a '.json' file",
                self.path().display()
            )));
        }
        Ok(())
    }

    async fn source_exists(&self) -> Result<bool> {
        fs::try_exists(self.path()).await.map_err(|err| {
            DbError::Io(format!(
                "Failed to check source '{}': {}",
                self.path().display(),
                err
            ))
        })
    }

    /// Source must carry the expected extension and be a regular file.
    async fn check_source(&self) -> Result<()> {
        self.check_extension()?;

        let metadata = fs::metadata(self.path()).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                DbError::Io(format!("Source '{}' does not exist", self.path().display()))
            } else {
                DbError::Io(format!(
                    "Failed to stat source '{}': {}",
                    self.path().display(),
                    err
                ))
            }
        })?;

        if !metadata.is_file() {
            return Err(DbError::Io(format!(
                "Source '{}' is not a file",
                self.path().display()
            )));
        }
        Ok(())
    }

    async fn read_source(&self) -> Result<Database> {
        self.check_source().await?;

        let bytes = fs::read(self.path()).await.map_err(|err| {
            DbError::Io(format!(
                "Failed to read source '{}': {}",
                self.path().display(),
                err
            ))
        })?;
        debug!("read {} bytes from '{}'", bytes.len(), self.path().display());

        decode_database(&bytes)
    }

    async fn write_source(&self, database: &Database) -> Result<()> {
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(database)?
        } else {
            serde_json::to_vec(database)?
        };

        let len = bytes.len();
        atomic_write(self.path(), bytes, self.config.create_dirs).await?;
        debug!("wrote {} bytes to '{}'", len, self.path().display());
        Ok(())
    }
}

#[async_trait]
impl Adapter for SingleFileAdapter {
    async fn connect(&self) -> Result<()> {
        if self.source_exists().await? {
            self.read_source().await?;
            debug!("connected to existing source '{}'", self.path().display());
            return Ok(());
        }

        self.check_extension()?;
        self.write_source(&Database::new()).await?;
        info!("initialized empty database at '{}'", self.path().display());
        Ok(())
    }

    async fn get_table(&self, name: &str) -> Result<Table> {
        let mut database = self.read_source().await?;
        database
            .tables
            .shift_remove(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    async fn save_table(&self, table: &Table) -> Result<()> {
        let mut database = self.read_source().await?;
        database.tables.insert(table.name.clone(), table.clone());
        self.write_source(&database).await
    }

    async fn delete_table(&self, name: &str) -> Result<()> {
        let mut database = self.read_source().await?;
        if database.tables.shift_remove(name).is_none() {
            return Err(DbError::TableNotFound(name.to_string()));
        }
        self.write_source(&database).await
    }
}

fn decode_database(bytes: &[u8]) -> Result<Database> {
    let mut raw: JsonValue = serde_json::from_slice(bytes)
        .map_err(|err| DbError::MalformedSourceFile(format!("Invalid JSON: {}", err)))?;

    if !Database::is_database(&raw) {
        return Err(DbError::MalformedSourceFile(
            "Invalid source file, missing 'tables' or 'meta' field".to_string(),
        ));
    }

    // Empty databases may be stored with `"tables": []`.
    if let Some(tables) = raw.get_mut("tables") {
        if tables.as_array().is_some_and(Vec::is_empty) {
            *tables = JsonValue::Object(Default::default());
        }
    }

    serde_json::from_value(raw)
        .map_err(|err| DbError::MalformedSourceFile(format!("Invalid database layout: {}", err)))
}

async fn atomic_write(path: &Path, bytes: Vec<u8>, create_dirs: bool) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.to_path_buf(),
        None => Path::new(".").to_path_buf(),
    };

    if create_dirs {
        fs::create_dir_all(&dir).await.map_err(|err| {
            DbError::Io(format!(
                "Failed to create parent directory '{}': {}",
                dir.display(),
                err
            ))
        })?;
    }

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|err| {
            DbError::Io(format!(
                "Failed to create temp file in '{}': {}",
                dir.display(),
                err
            ))
        })?;

        tmp.write_all(&bytes).map_err(|err| {
            DbError::Io(format!(
                "Failed to write temp file '{}': {}",
                tmp.path().display(),
                err
            ))
        })?;

        tmp.persist(&target).map_err(|err| {
            DbError::Io(format!(
                "Failed to rename temp file '{}' -> '{}': {}",
                err.file.path().display(),
                target.display(),
                err.error
            ))
        })?;
        Ok(())
    })
    .await
    .map_err(|err| DbError::Io(format!("Write task failed: {}", err)))?
}
