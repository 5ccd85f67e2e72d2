use std::collections::HashMap;

use serde_json::Value;

use crate::{DraftValue, Field};

/// Error type for building a draft from external input.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Unsupported value for field '{field}': {kind}")]
    UnsupportedValue { field: Field, kind: &'static str },

    #[error("Unsupported element in list field '{field}': {kind}")]
    UnsupportedElement { field: Field, kind: &'static str },
}

/// The in-memory, not-yet-validated value of the registration form.
///
/// A field that was never set is absent ("undefined"), which is different
/// from a field holding `DraftValue::Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    values: HashMap<Field, DraftValue>,
}

impl Draft {
    /// Create a new empty draft.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set the value of a field, builder style.
    pub fn with(mut self, field: Field, value: impl Into<DraftValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert a value for the given field.
    pub fn insert(&mut self, field: Field, value: impl Into<DraftValue>) {
        self.values.insert(field, value.into());
    }

    /// Get the value of a field.
    pub fn get(&self, field: Field) -> Option<&DraftValue> {
        self.values.get(&field)
    }

    /// Check if a field has been set.
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Unset a field, making it "undefined" again.
    pub fn remove(&mut self, field: Field) -> Option<DraftValue> {
        self.values.remove(&field)
    }

    /// Iterate over set fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &DraftValue)> {
        Field::all().filter_map(|field| self.values.get(&field).map(|value| (field, value)))
    }

    /// Get the number of set fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no field has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a draft from a JSON object such as a submitted form body.
    ///
    /// Strings, numbers, `null` and arrays of strings are accepted. Keys that
    /// are not form fields are ignored.
    pub fn from_json(json: &Value) -> Result<Self, DraftError> {
        let Value::Object(map) = json else {
            return Err(DraftError::NotAnObject(json_kind(json)));
        };

        let mut draft = Draft::new();
        for (key, value) in map {
            let Some(field) = Field::from_name(key) else {
                tracing::debug!(key = %key, "ignoring unknown draft key");
                continue;
            };
            draft.insert(field, draft_value_from_json(field, value)?);
        }
        Ok(draft)
    }
}

fn draft_value_from_json(field: Field, value: &Value) -> Result<DraftValue, DraftError> {
    match value {
        Value::Null => Ok(DraftValue::Null),
        Value::String(s) => Ok(DraftValue::Text(s.clone())),
        Value::Number(n) => n
            .as_f64()
            .map(DraftValue::Number)
            .ok_or(DraftError::UnsupportedValue {
                field,
                kind: "number",
            }),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(DraftError::UnsupportedElement {
                    field,
                    kind: json_kind(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DraftValue::List),
        other => Err(DraftError::UnsupportedValue {
            field,
            kind: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
