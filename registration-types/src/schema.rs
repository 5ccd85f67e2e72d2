use crate::options::{DODGEM_CAR, Gender, OptionSet, Vehicle};
use crate::{Field, FieldErrors};
use crate::{Draft, ValidValues};

/// The minimum age accepted by the registration form.
pub const MINIMUM_AGE: f64 = 13.0;

/// The declarative schema of a form: every field, in declaration order.
///
/// The schema is presentation-agnostic. It drives validation and is also
/// the source of labels, placeholders and options for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Heading shown above the form.
    pub title: Option<String>,

    /// All fields of the form.
    pub fields: Vec<FieldSchema>,

    /// Text of the submit button.
    pub submit_label: String,
}

impl Schema {
    /// Create a new schema with the given fields.
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self {
            title: None,
            fields,
            submit_label: "Submit".to_string(),
        }
    }

    /// Set the heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the submit button text.
    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// The schema of the registration form.
    pub fn registration() -> Self {
        Self::new(vec![
            FieldSchema::new(Field::Name, "Name", FieldKind::Text)
                .with_placeholder("Jane Doe")
                .required("Name is required"),
            FieldSchema::new(Field::Email, "Email address", FieldKind::Email)
                .with_placeholder("j.doe@example.com")
                .required("Email is required")
                .with_invalid_message("Email must be a valid email address"),
            FieldSchema::new(
                Field::Age,
                "Age",
                FieldKind::Number {
                    min: Some(MINIMUM_AGE),
                },
            )
            .with_placeholder("69")
            .required("Age is required")
            .with_invalid_message("Age must be a number")
            .with_min_message("The minimum is 13"),
            FieldSchema::new(
                Field::Gender,
                "Gender",
                FieldKind::Select {
                    options: Gender::labels(),
                },
            )
            .required("Must provide a gender"),
            FieldSchema::new(
                Field::Vehicle,
                "What type of vehicle do you own?",
                FieldKind::Checkboxes {
                    options: Vehicle::labels(),
                    extra_options: vec![DODGEM_CAR],
                },
            ),
        ])
        .with_title("Register")
        .with_submit_label("REGISTER ACCOUNT")
    }

    /// Get the fields.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Get the schema of a single field.
    pub fn field(&self, field: Field) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Check every field of the draft against this schema.
    ///
    /// Each field stops at its first failing rule; all fields are checked.
    pub fn check(&self, draft: &Draft) -> Result<ValidValues, FieldErrors> {
        crate::validate::check_fields(self, draft)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::registration()
    }
}

/// A single field of a form schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// The field this schema describes.
    pub field: Field,

    /// The label shown to the user.
    pub label: String,

    /// Placeholder text for text-like controls.
    pub placeholder: Option<String>,

    /// The kind of control and its constraints.
    pub kind: FieldKind,

    /// Whether a value must be present.
    pub required: bool,

    /// Custom error messages; generic ones are used where absent.
    pub messages: Messages,
}

impl FieldSchema {
    /// Create a new optional field.
    pub fn new(field: Field, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            field,
            label: label.into(),
            placeholder: None,
            kind,
            required: false,
            messages: Messages::default(),
        }
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark the field as required, with the message shown when it is missing.
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.messages.required = Some(message.into());
        self
    }

    /// Message shown when the value has the wrong shape (not a number, not an email).
    pub fn with_invalid_message(mut self, message: impl Into<String>) -> Self {
        self.messages.invalid = Some(message.into());
        self
    }

    /// Message shown when a number is below the minimum.
    pub fn with_min_message(mut self, message: impl Into<String>) -> Self {
        self.messages.min = Some(message.into());
        self
    }

    /// Get the field name as used in payloads and error paths.
    pub fn name(&self) -> &'static str {
        self.field.as_str()
    }
}

/// The kind of control, determining how a value is checked and rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text.
    Text,

    /// Text that must be a syntactically valid email address.
    Email,

    /// A number with an optional inclusive lower bound.
    Number { min: Option<f64> },

    /// Exactly one of a closed set of labels.
    Select { options: Vec<&'static str> },

    /// Any number of a closed set of labels.
    ///
    /// `extra_options` are rendered after `options` but are not accepted by
    /// validation.
    Checkboxes {
        options: Vec<&'static str>,
        extra_options: Vec<&'static str>,
    },
}

impl FieldKind {
    /// All labels rendered for a choice control, accepted or not.
    pub fn rendered_options(&self) -> Vec<&'static str> {
        match self {
            Self::Select { options } => options.clone(),
            Self::Checkboxes {
                options,
                extra_options,
            } => options.iter().chain(extra_options).copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Labels accepted by validation for a choice control.
    pub fn accepted_options(&self) -> &[&'static str] {
        match self {
            Self::Select { options } | Self::Checkboxes { options, .. } => options,
            _ => &[],
        }
    }
}

/// Custom error messages of a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Messages {
    /// Shown when a required value is missing.
    pub required: Option<String>,

    /// Shown when the value cannot be read as the field's type.
    pub invalid: Option<String>,

    /// Shown when a number is below the minimum.
    pub min: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_schema_order() {
        let schema = Schema::registration();
        let fields: Vec<_> = schema.fields().iter().map(|f| f.field).collect();
        assert_eq!(fields, Field::all().collect::<Vec<_>>());
        assert_eq!(schema.title.as_deref(), Some("Register"));
        assert_eq!(schema.submit_label, "REGISTER ACCOUNT");
    }

    #[test]
    fn only_vehicle_is_optional() {
        let schema = Schema::registration();
        for field in schema.fields() {
            assert_eq!(field.required, field.field != Field::Vehicle, "{}", field.name());
        }
    }

    #[test]
    fn dodgem_car_is_rendered_but_not_accepted() {
        let schema = Schema::registration();
        let vehicle = schema.field(Field::Vehicle).unwrap();
        assert_eq!(
            vehicle.kind.rendered_options(),
            vec!["Car", "Bike", "Boat", "Tractor", "Dodgem car"]
        );
        assert!(!vehicle.kind.accepted_options().contains(&DODGEM_CAR));
    }

    #[test]
    fn gender_options_come_from_the_enum() {
        let schema = Schema::registration();
        let gender = schema.field(Field::Gender).unwrap();
        assert_eq!(gender.kind.accepted_options(), Gender::labels().as_slice());
        assert!(FieldKind::Text.rendered_options().is_empty());
    }
}
