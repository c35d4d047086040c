//! Resolution over JSON documents.
//!
//! Only string leaves carry placeholders. Numbers, booleans and null are
//! returned unchanged, and the first failing leaf aborts the whole document
//! with its array index or object key attached.

use serde_json::{Map, Value};

use crate::error::{Result, StateError};

/// Resolve every string leaf of `value` with `resolve`.
pub fn resolve_value<F>(value: &Value, resolve: &F) -> Result<Value>
where
    F: Fn(&str) -> Result<String>,
{
    match value {
        Value::String(s) => Ok(Value::String(resolve(s)?)),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| resolve_value(item, resolve).map_err(|e| StateError::at_index(i, e)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(fields) => {
            let mut resolved = Map::with_capacity(fields.len());
            for (key, field) in fields {
                let field = resolve_value(field, resolve).map_err(|e| StateError::at_key(key, e))?;
                resolved.insert(key.clone(), field);
            }
            Ok(Value::Object(resolved))
        }
        other => Ok(other.clone()),
    }
}
