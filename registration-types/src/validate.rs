//! Field-by-field checking of a draft against a schema.
//!
//! Every field is checked; within a field the first failing rule wins.
//! Messages without a custom text fall back to generic ones naming the
//! field path.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Draft, DraftValue, Field, FieldErrors, FieldKind, FieldSchema, Registration, Schema};

/// Syntax of a valid e-mail address as used by HTML email inputs.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Validate a draft against the registration schema.
///
/// This is the adapter between the form and the schema: the form only ever
/// sees a `Registration` or the per-field messages.
pub fn validate(draft: &Draft) -> Result<Registration, FieldErrors> {
    let values = Schema::registration().check(draft)?;
    // The registration schema checks every field against its option set, so
    // assembly does not fail here.
    Registration::from_values(&values)
        .map_err(|err| FieldErrors::from_iter([(err.field(), err.to_string())]))
}

/// Check whether a string is a syntactically valid email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// A value that passed its field's rules.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidValue {
    /// Non-empty text (text, email or select fields).
    Text(String),

    /// A finite number.
    Number(f64),

    /// The checked labels of a checkbox group; `None` when absent or null.
    Choices(Option<Vec<String>>),
}

/// The values of all fields that passed, keyed by field.
///
/// Optional fields without a value are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidValues {
    values: HashMap<Field, ValidValue>,
}

impl ValidValues {
    pub fn get(&self, field: Field) -> Option<&ValidValue> {
        self.values.get(&field)
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match self.get(field) {
            Some(ValidValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        match self.get(field) {
            Some(ValidValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn choices(&self, field: Field) -> Option<&[String]> {
        match self.get(field) {
            Some(ValidValue::Choices(Some(items))) => Some(items),
            _ => None,
        }
    }
}

pub(crate) fn check_fields(schema: &Schema, draft: &Draft) -> Result<ValidValues, FieldErrors> {
    let mut values = ValidValues::default();
    let mut errors = FieldErrors::new();

    for field in schema.fields() {
        match check_field(field, draft.get(field.field)) {
            Ok(Some(value)) => {
                values.values.insert(field.field, value);
            }
            Ok(None) => {}
            Err(message) => {
                tracing::debug!(field = field.name(), %message, "field failed validation");
                errors.insert(field.field, message);
            }
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Check a single field. `Ok(None)` means an optional field without a value.
fn check_field(
    schema: &FieldSchema,
    value: Option<&DraftValue>,
) -> Result<Option<ValidValue>, String> {
    match &schema.kind {
        FieldKind::Text => check_text(schema, value),
        FieldKind::Email => {
            let text = check_text(schema, value)?;
            match text {
                Some(ValidValue::Text(email)) if !is_valid_email(&email) => Err(schema
                    .messages
                    .invalid
                    .clone()
                    .unwrap_or_else(|| format!("{} must be a valid email", schema.name()))),
                other => Ok(other),
            }
        }
        FieldKind::Number { min } => check_number(schema, value, *min),
        FieldKind::Select { options } => {
            let text = check_text(schema, value)?;
            match text {
                Some(ValidValue::Text(choice)) if !options.contains(&choice.as_str()) => {
                    Err(one_of_message(schema.name(), options))
                }
                other => Ok(other),
            }
        }
        FieldKind::Checkboxes { options, .. } => check_checkboxes(schema, value, options),
    }
}

fn check_text(
    schema: &FieldSchema,
    value: Option<&DraftValue>,
) -> Result<Option<ValidValue>, String> {
    let text = match value {
        None | Some(DraftValue::Null) => None,
        Some(DraftValue::Text(s)) if s.is_empty() => None,
        Some(DraftValue::Text(s)) => Some(s.clone()),
        Some(DraftValue::Number(n)) => Some(number_to_text(*n)),
        Some(DraftValue::List(_)) => {
            return Err(format!("{} must be a `string` type", schema.name()));
        }
    };

    match text {
        Some(text) => Ok(Some(ValidValue::Text(text))),
        None if schema.required => Err(required_message(schema)),
        None => Ok(None),
    }
}

fn check_number(
    schema: &FieldSchema,
    value: Option<&DraftValue>,
    min: Option<f64>,
) -> Result<Option<ValidValue>, String> {
    let invalid = || {
        schema
            .messages
            .invalid
            .clone()
            .unwrap_or_else(|| format!("{} must be a `number` type", schema.name()))
    };

    let number = match value {
        None | Some(DraftValue::Null) => None,
        Some(DraftValue::Number(n)) => Some(*n),
        Some(DraftValue::Text(s)) => Some(parse_number(s).ok_or_else(invalid)?),
        Some(DraftValue::List(_)) => return Err(invalid()),
    };

    let Some(number) = number else {
        return if schema.required {
            Err(required_message(schema))
        } else {
            Ok(None)
        };
    };

    if !number.is_finite() {
        return Err(invalid());
    }

    if let Some(min) = min
        && number < min
    {
        return Err(schema.messages.min.clone().unwrap_or_else(|| {
            format!(
                "{} must be greater than or equal to {}",
                schema.name(),
                number_to_text(min)
            )
        }));
    }

    Ok(Some(ValidValue::Number(number)))
}

/// Read number input text. All whitespace is dropped first, so blank text
/// is not a number rather than a missing value.
fn parse_number(text: &str) -> Option<f64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.parse().ok()
}

fn check_checkboxes(
    schema: &FieldSchema,
    value: Option<&DraftValue>,
    options: &[&'static str],
) -> Result<Option<ValidValue>, String> {
    let items = match value {
        None | Some(DraftValue::Null) => None,
        Some(DraftValue::List(items)) => Some(items.clone()),
        Some(DraftValue::Text(s)) => Some(vec![s.clone()]),
        Some(DraftValue::Number(_)) => {
            return Err(format!("{} must be a `array` type", schema.name()));
        }
    };

    let Some(items) = items else {
        return if schema.required {
            Err(required_message(schema))
        } else {
            Ok(Some(ValidValue::Choices(None)))
        };
    };

    if let Some(index) = items
        .iter()
        .position(|item| !options.contains(&item.as_str()))
    {
        return Err(one_of_message(
            &format!("{}[{index}]", schema.name()),
            options,
        ));
    }

    Ok(Some(ValidValue::Choices(Some(items))))
}

fn required_message(schema: &FieldSchema) -> String {
    schema
        .messages
        .required
        .clone()
        .unwrap_or_else(|| format!("{} is a required field", schema.name()))
}

fn one_of_message(path: &str, options: &[&str]) -> String {
    format!(
        "{path} must be one of the following values: {}",
        options.join(", ")
    )
}

/// Format a number the way a form control shows it (`30`, not `30.0`).
fn number_to_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> Draft {
        Draft::new()
            .with(Field::Name, "Jane Doe")
            .with(Field::Email, "j.doe@example.com")
            .with(Field::Age, 30)
            .with(Field::Gender, "Male")
            .with(Field::Vehicle, vec!["Car"])
    }

    fn error_of(draft: &Draft, field: Field) -> Option<String> {
        validate(draft)
            .err()
            .and_then(|errors| errors.get(field).map(str::to_string))
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(validate(&complete()).is_ok());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = validate(&Draft::new()).unwrap_err();
        let reported: Vec<_> = errors.iter().collect();
        assert_eq!(
            reported,
            vec![
                (Field::Name, "Name is required"),
                (Field::Email, "Email is required"),
                (Field::Age, "Age is required"),
                (Field::Gender, "Must provide a gender"),
            ]
        );
    }

    #[test]
    fn missing_name() {
        let mut draft = complete();
        draft.remove(Field::Name);
        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::Name]);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));

        let draft = complete().with(Field::Name, "");
        assert_eq!(error_of(&draft, Field::Name).as_deref(), Some("Name is required"));
    }

    #[test]
    fn missing_name_does_not_hide_other_failures() {
        let draft = complete()
            .with(Field::Name, DraftValue::Null)
            .with(Field::Age, 12);
        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::Name, Field::Age]);
    }

    #[test]
    fn email_rules() {
        let draft = complete().with(Field::Email, "not-an-email");
        assert_eq!(
            error_of(&draft, Field::Email).as_deref(),
            Some("Email must be a valid email address")
        );

        let draft = complete().with(Field::Email, "");
        assert_eq!(
            error_of(&draft, Field::Email).as_deref(),
            Some("Email is required")
        );

        let draft = complete().with(Field::Email, "a@b.com");
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn email_syntax() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(is_valid_email("user@localhost"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@-b.com"));
        assert!(!is_valid_email("a@b..com"));
    }

    #[test]
    fn age_rules() {
        for text in ["abc", "thirty", "12abc", "NaN", "inf"] {
            let draft = complete().with(Field::Age, text);
            assert_eq!(
                error_of(&draft, Field::Age).as_deref(),
                Some("Age must be a number"),
                "{text}"
            );
        }

        for age in [-1, 0, 10, 12] {
            let draft = complete().with(Field::Age, age);
            assert_eq!(
                error_of(&draft, Field::Age).as_deref(),
                Some("The minimum is 13"),
                "{age}"
            );
        }

        for age in [13, 14, 30, 120] {
            let draft = complete().with(Field::Age, age);
            assert!(validate(&draft).is_ok(), "{age}");
        }
    }

    #[test]
    fn age_from_text_input() {
        for text in [" 42 ", "4 2", "\t4\n2 "] {
            let draft = complete().with(Field::Age, text);
            let registration = validate(&draft).unwrap();
            assert_eq!(registration.age.value(), 42.0, "{text:?}");
        }

        let draft = complete().with(Field::Age, "12.5");
        assert_eq!(
            error_of(&draft, Field::Age).as_deref(),
            Some("The minimum is 13")
        );
    }

    #[test]
    fn null_age_is_missing() {
        let draft = complete().with(Field::Age, DraftValue::Null);
        assert_eq!(error_of(&draft, Field::Age).as_deref(), Some("Age is required"));

        let mut draft = complete();
        draft.remove(Field::Age);
        assert_eq!(error_of(&draft, Field::Age).as_deref(), Some("Age is required"));
    }

    #[test]
    fn blank_age_is_not_a_number() {
        for text in ["", "  ", "\t"] {
            let draft = complete().with(Field::Age, text);
            assert_eq!(
                error_of(&draft, Field::Age).as_deref(),
                Some("Age must be a number"),
                "{text:?}"
            );
        }
    }

    #[test]
    fn gender_rules() {
        let mut draft = complete();
        draft.remove(Field::Gender);
        assert_eq!(
            error_of(&draft, Field::Gender).as_deref(),
            Some("Must provide a gender")
        );

        let draft = complete().with(Field::Gender, "Other");
        assert_eq!(
            error_of(&draft, Field::Gender).as_deref(),
            Some("gender must be one of the following values: Male, Female, Nun ya business")
        );

        let draft = complete().with(Field::Gender, "Nun ya business");
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn vehicle_is_nullable() {
        let draft = complete().with(Field::Vehicle, DraftValue::Null);
        assert_eq!(validate(&draft).unwrap().vehicle, None);

        let mut draft = complete();
        draft.remove(Field::Vehicle);
        assert_eq!(validate(&draft).unwrap().vehicle, None);
    }

    #[test]
    fn vehicle_membership() {
        let draft = complete().with(Field::Vehicle, vec!["Spaceship"]);
        assert_eq!(
            error_of(&draft, Field::Vehicle).as_deref(),
            Some("vehicle[0] must be one of the following values: Car, Bike, Boat, Tractor")
        );

        let draft = complete().with(Field::Vehicle, vec!["Car", "Boat"]);
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn dodgem_car_fails_membership() {
        let draft = complete().with(Field::Vehicle, vec!["Car", "Dodgem car"]);
        assert_eq!(
            error_of(&draft, Field::Vehicle).as_deref(),
            Some("vehicle[1] must be one of the following values: Car, Bike, Boat, Tractor")
        );
    }

    #[test]
    fn single_checked_value_is_a_list() {
        let draft = complete().with(Field::Vehicle, "Bike");
        let values = Schema::registration().check(&draft).unwrap();
        assert_eq!(values.choices(Field::Vehicle), Some(&["Bike".to_string()][..]));
    }

    #[test]
    fn numbers_coerce_to_text() {
        let draft = complete().with(Field::Name, 42);
        let values = Schema::registration().check(&draft).unwrap();
        assert_eq!(values.text(Field::Name), Some("42"));
    }

    #[test]
    fn lists_are_not_text() {
        let draft = complete().with(Field::Name, vec!["Jane"]);
        assert_eq!(
            error_of(&draft, Field::Name).as_deref(),
            Some("name must be a `string` type")
        );
    }

    #[test]
    fn generic_messages_without_custom_text() {
        let schema = Schema::new(vec![
            FieldSchema {
                required: true,
                ..FieldSchema::new(Field::Name, "Name", FieldKind::Text)
            },
            FieldSchema::new(Field::Age, "Age", FieldKind::Number { min: Some(18.0) }),
        ]);
        let draft = Draft::new().with(Field::Age, 3);
        let errors = schema.check(&draft).unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("name is a required field"));
        assert_eq!(
            errors.get(Field::Age),
            Some("age must be greater than or equal to 18")
        );
    }
}
