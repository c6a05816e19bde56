pub mod error;
pub mod model;

pub use error::{DbError, ErrorKind, Result};
pub use model::{Database, Entry, Table};
