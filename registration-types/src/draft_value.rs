/// The raw value held by a form control.
///
/// This is the value stored in a `Draft` for each bound field. It is not
/// validated; the same field may hold any variant depending on how the
/// control was driven.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftValue {
    /// An explicit null (as opposed to a field that was never set).
    Null,

    /// Text typed into an input or chosen in a select.
    Text(String),

    /// A numeric value.
    Number(f64),

    /// The values of all checked boxes of a checkbox group.
    List(Vec<String>),
}

impl DraftValue {
    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this is an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::List(_) => "list",
        }
    }
}

impl From<String> for DraftValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for DraftValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for DraftValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for DraftValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for DraftValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<Vec<String>> for DraftValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for DraftValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<DraftValue>> From<Option<T>> for DraftValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
