use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A field of the registration form, e.g. `Field::Email`.
///
/// Used as keys in `Draft` and `FieldErrors`. The derived ordering is the
/// declaration order of the form, which is also the order in which field
/// errors are reported.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Age,
    Gender,
    Vehicle,
}

impl Field {
    /// Get the field name as used in the payload and as the HTML `name` attribute.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// All fields in declaration order.
    pub fn all() -> impl Iterator<Item = Field> {
        Self::iter()
    }

    /// Look up a field by its payload name.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order() {
        let fields: Vec<_> = Field::all().collect();
        assert_eq!(
            fields,
            vec![
                Field::Name,
                Field::Email,
                Field::Age,
                Field::Gender,
                Field::Vehicle
            ]
        );
        assert!(Field::Name < Field::Vehicle);
    }

    #[test]
    fn names_round_trip_through_strum() {
        for field in Field::all() {
            assert_eq!(field.as_ref(), field.as_str());
            assert_eq!(field.to_string(), field.as_str());
            assert_eq!(Field::from_name(field.as_str()), Some(field));
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(Field::from_name("password"), None);
        assert_eq!(Field::from_name(""), None);
    }
}
