// ============================================================================
// JabDB Library
// ============================================================================

//! Embedded JSON document store.
//!
//! A [`JabDb`] owns one storage [`Adapter`] and hands out [`JabTable`]
//! handles. Tables hold entries (`id` + JSON value) in insertion order. Every
//! table operation reads the current table from the adapter, applies its change
//! and writes the whole table back.
//!
//! # Examples
//!
//! ```no_run
//! use jabdb::JabDb;
//! use serde_json::json;
//!
//! # async fn run() -> jabdb::Result<()> {
//! let db = JabDb::single_file("data/app.json");
//! db.connect().await?;
//!
//! let users = db.create_table_or_get("users").await?;
//! let id = users.create(json!({"name": "John", "age": 30}), None).await?;
//! users.patch(&id, [json!({"age": 31})]).await?;
//!
//! let adults: Vec<serde_json::Value> = users
//!     .find(|u: &serde_json::Value| u["age"].as_u64() >= Some(18))
//!     .values()
//!     .await?;
//! assert_eq!(adults.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Consistency
//!
//! There is no locking around the read-modify-write cycle. Operations issued
//! one after another observe each other, but overlapping operations on the same
//! database can lose updates. Callers that need more must serialize access
//! themselves.

pub mod core;
pub mod facade;
pub mod prelude;
pub mod storage;

pub use crate::core::{Database, DbError, Entry, ErrorKind, Result, Table};
pub use facade::{FieldResolver, JabDb, JabTable, LazyQuery, LazyValue, Patch, PatchOp};
pub use storage::{Adapter, MemoryAdapter, SingleFileAdapter, SingleFileConfig};
