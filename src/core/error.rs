use thiserror::Error;

/// Coarse classification of a [`DbError`], for callers that only need to branch
/// on the failure reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    MalformedSourceFile,
    TableNotFound,
    TableAlreadyExists,
    EntryNotFound,
    IdsExhausted,
    Serialization,
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed source file: {0}")]
    MalformedSourceFile(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    #[error("Entry '{id}' not found in table '{table}'")]
    EntryNotFound { table: String, id: String },

    #[error("Table '{0}' has no numeric id left to assign")]
    IdsExhausted(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    pub fn entry_not_found(table: impl Into<String>, id: impl Into<String>) -> Self {
        Self::EntryNotFound {
            table: table.into(),
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::MalformedSourceFile(_) => ErrorKind::MalformedSourceFile,
            Self::TableNotFound(_) => ErrorKind::TableNotFound,
            Self::TableAlreadyExists(_) => ErrorKind::TableAlreadyExists,
            Self::EntryNotFound { .. } => ErrorKind::EntryNotFound,
            Self::IdsExhausted(_) => ErrorKind::IdsExhausted,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// True for both missing tables and missing entries.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::TableNotFound | ErrorKind::EntryNotFound)
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
