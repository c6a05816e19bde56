//! Entry identifier generation.
//!
//! Only ids that parse as a `u64` take part in numbering. Other ids (names,
//! negative numbers, ids with surrounding whitespace) never block or shift the
//! numeric sequence.

use crate::core::{DbError, Result, Table};

/// Smallest numeric id greater than every numeric id in `table`, `0` if none.
///
/// `None` once the table already holds `u64::MAX`.
pub(crate) fn next_numeric_id(table: &Table) -> Option<u64> {
    match table.ids().filter_map(|id| id.parse::<u64>().ok()).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

/// Picks the id a new entry is stored under.
///
/// A requested id is kept as-is unless the table already holds it, in which
/// case the next numeric id is used instead.
pub(crate) fn resolve_id(table: &Table, requested: Option<&str>) -> Result<String> {
    match requested {
        Some(id) if !table.contains(id) => Ok(id.to_string()),
        _ => next_numeric_id(table)
            .map(|id| id.to_string())
            .ok_or_else(|| DbError::IdsExhausted(table.name.clone())),
    }
}
