//! Candidate records — the items offered to the selector.
//!
//! A [`Candidate`] is an opaque bag of JSON fields. The selector only ever
//! reads two of them (the configured primary and secondary display fields),
//! so a driver, a resident or a condo can all be offered through the same
//! type. [`load_candidates`] reads a directory of candidates from a JSON
//! array on disk.

use crate::error::{CondyError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::path::Path;

/// One item in the list offered for matching and selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Candidate {
    /// Stable identifier, taken from the `"id"` field when present.
    #[serde(skip)]
    pub id: Option<String>,
    /// All fields of the record, including `"id"` if it had one.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Candidate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a candidate from a JSON object. An `"id"` key holding a string
    /// or a number becomes [`Candidate::id`].
    pub fn from_object(fields: Map<String, Value>) -> Self {
        let id = fields.get("id").and_then(scalar_text).map(Cow::into_owned);
        Self { id, fields }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.fields.insert("id".to_string(), Value::String(id.clone()));
        self.id = Some(id);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Text of `field`, if present and scalar.
    ///
    /// Strings are borrowed; numbers and booleans are rendered. `null`,
    /// arrays and objects have no text.
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.fields.get(field).and_then(scalar_text)
    }

    /// Text of `field`, or `placeholder` when the field is missing.
    pub fn display<'a>(&'a self, field: &str, placeholder: &'a str) -> Cow<'a, str> {
        self.text(field).unwrap_or(Cow::Borrowed(placeholder))
    }

    /// Stable key for list rendering: the id when there is one, otherwise the
    /// candidate's position in its list.
    pub fn key(&self, position: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("#{position}"))
    }
}

impl From<Map<String, Value>> for Candidate {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_object(fields)
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

/// Read a candidate directory: a JSON array of objects.
///
/// Elements that are not objects are skipped (and logged); a top-level value
/// that is not an array is an error.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let src = std::fs::read_to_string(path).map_err(|source| CondyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&src).map_err(|source| CondyError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let candidates = candidates_from_value(value).ok_or_else(|| CondyError::InvalidDirectory {
        path: path.to_path_buf(),
        reason: "expected a JSON array of objects".to_string(),
    })?;
    tracing::debug!(path = %path.display(), count = candidates.len(), "candidates loaded");
    Ok(candidates)
}

/// Convert an already-parsed JSON array into candidates. Returns `None` when
/// `value` is not an array.
pub fn candidates_from_value(value: Value) -> Option<Vec<Candidate>> {
    let Value::Array(items) = value else {
        return None;
    };
    let candidates = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(fields) => Some(Candidate::from_object(fields)),
            other => {
                tracing::warn!(index, value = %other, "skipping non-object candidate");
                None
            }
        })
        .collect();
    Some(candidates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
