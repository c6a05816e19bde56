pub mod database;
mod ids;
pub mod lazy;
pub mod merge;
pub mod table;

pub use database::JabDb;
pub use lazy::{LazyQuery, LazyValue};
pub use merge::{FieldResolver, Patch, PatchOp};
pub use table::JabTable;

use crate::core::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

pub(crate) fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<JsonValue> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn decode_value<T: DeserializeOwned>(value: &JsonValue) -> Result<T> {
    Ok(T::deserialize(value)?)
}
