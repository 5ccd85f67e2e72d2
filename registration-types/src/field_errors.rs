use std::collections::BTreeMap;
use std::fmt;

use crate::Field;

/// Per-field validation messages.
///
/// Iteration order is the declaration order of the fields, regardless of
/// insertion order. At most one message is kept per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record a message for a field. The first message recorded for a field wins.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Get the message of a field, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Check if a field failed.
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Iterate over failed fields and their messages in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// The failed fields in declaration order.
    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}
