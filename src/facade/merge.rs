//! Partial-update merging for `JabTable::patch` and `JabTable::patch_with`.
//!
//! A list of partials is flattened into ordered [`PatchOp`]s. Object partials
//! become one field override per top-level key; anything else replaces the
//! whole value. Ops apply in order, so later partials win per field.

use serde_json::{Map, Value as JsonValue};

/// Per-field conflict resolver: `(existing, incoming) -> decision`.
///
/// `existing` is `None` when the field is not set yet. Returning `None` falls
/// back to the default rule (incoming replaces existing).
pub type FieldResolver = fn(Option<&JsonValue>, &JsonValue) -> Option<JsonValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Set one top-level field of an object value.
    Field { key: String, value: JsonValue },
    /// Replace the value wholesale.
    Replace(JsonValue),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    ops: Vec<PatchOp>,
}

impl Patch {
    pub fn from_partials(partials: impl IntoIterator<Item = JsonValue>) -> Self {
        let mut ops = Vec::new();
        for partial in partials {
            match partial {
                JsonValue::Object(fields) => ops.extend(
                    fields
                        .into_iter()
                        .map(|(key, value)| PatchOp::Field { key, value }),
                ),
                other => ops.push(PatchOp::Replace(other)),
            }
        }
        Self { ops }
    }

    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Applies every op to `target` with the default override rule.
    pub fn apply(self, target: &mut JsonValue) {
        self.apply_with(target, None::<FieldResolver>);
    }

    /// Applies every op to `target`, consulting `resolver` for each conflict.
    pub fn apply_with<F>(self, target: &mut JsonValue, resolver: Option<F>)
    where
        F: Fn(Option<&JsonValue>, &JsonValue) -> Option<JsonValue>,
    {
        for op in self.ops {
            match op {
                PatchOp::Field { key, value } => {
                    let mut fields = take_object(target);
                    let resolved = resolver
                        .as_ref()
                        .and_then(|resolve| resolve(fields.get(&key), &value));
                    fields.insert(key, resolved.unwrap_or(value));
                    *target = JsonValue::Object(fields);
                }
                PatchOp::Replace(value) => {
                    let resolved = resolver
                        .as_ref()
                        .and_then(|resolve| resolve(Some(&*target), &value));
                    *target = resolved.unwrap_or(value);
                }
            }
        }
    }
}

/// Moves the fields out of `target`; a non-object value yields no fields.
fn take_object(target: &mut JsonValue) -> Map<String, JsonValue> {
    match std::mem::take(target) {
        JsonValue::Object(fields) => fields,
        _ => Map::new(),
    }
}
