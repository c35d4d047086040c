//! Last HTTP response seen by a scenario.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StateError};

const PATH_SEPARATOR: char = '.';
const LIST_SEPARATOR: &str = ",";

/// Status, headers and body of the most recent response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseState {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseState {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Add a header (builder pattern).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Select a value from the JSON body by dotted path (`a.b.0.c`).
    pub fn json_path(&self, path: &str) -> Result<Value> {
        let body = self.json()?;
        select_path(&body, path)
            .cloned()
            .ok_or_else(|| StateError::PathNotFound {
                path: path.to_string(),
            })
    }

    /// Fail unless the status matches `expected`.
    pub fn expect_status(&self, expected: u16) -> Result<()> {
        if self.status != expected {
            return Err(StateError::UnexpectedStatus {
                expected,
                actual: self.status,
                body: self.body.clone(),
            });
        }
        Ok(())
    }
}

/// Walk a dotted path; numeric segments index arrays, empty path is the root.
pub fn select_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split(PATH_SEPARATOR)
        .try_fold(value, |current, segment| match current {
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Object(fields) => fields.get(segment),
            _ => None,
        })
}

/// Render a JSON value as a variable.
///
/// Strings are stored verbatim and arrays of scalars comma-joined so that
/// `${name[i]}` can index them. Null becomes the empty string; anything
/// else is stored as compact JSON.
pub fn value_to_var(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) if items.iter().all(is_scalar) => items
            .iter()
            .map(value_to_var)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        _ => value.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
