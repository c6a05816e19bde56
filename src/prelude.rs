//! Everything needed to open a database and work with tables.
//!
//! ```
//! use jabdb::prelude::*;
//! ```

pub use crate::core::{DbError, ErrorKind, Result};
pub use crate::facade::{FieldResolver, JabDb, JabTable};
pub use crate::storage::{Adapter, MemoryAdapter, SingleFileAdapter, SingleFileConfig};
