//! The form controller: owns the draft and the field errors.
//!
//! Edits go through `FieldBinding`s and never validate. Validation only
//! happens in `FormController::submit`, which forwards a valid
//! registration to the submission sink.

use registration_types::{
    Draft, DraftValue, Field, FieldErrors, FieldKind, Registration, Schema, SubmissionSink,
    SubmitError,
};

/// Where the form is in its edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Fields are being edited; no submit attempt failed since the last edit cycle.
    #[default]
    Editing,

    /// A submit is in progress.
    ///
    /// `submit` borrows the form for its whole duration, so this state is
    /// only seen afterwards when a submit future was dropped before it
    /// completed, e.g. on a timeout while the sink was waiting.
    Validating,

    /// The last submit failed validation; errors are displayed.
    EditingWithErrors,

    /// The last submit passed validation and the sink accepted it.
    Submitted,
}

/// The outcome of a submit that did not fail in the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation failed; the sink was not called. The errors are also stored in the form.
    Invalid(FieldErrors),

    /// Validation passed and the sink accepted this registration.
    Sent(Registration),
}

impl Submission {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Sent(_) => None,
        }
    }
}

/// Binds form controls to a draft and submits it.
#[derive(Debug)]
pub struct FormController<S> {
    schema: Schema,
    draft: Draft,
    errors: FieldErrors,
    state: FormState,
    sink: S,
}

impl<S: SubmissionSink> FormController<S> {
    /// Create a registration form that submits to the given sink.
    ///
    /// Select controls always hold a value, so each one starts with its
    /// first option, as the rendered form does.
    pub fn new(sink: S) -> Self {
        let schema = Schema::registration();
        let draft = initial_draft(&schema);
        Self::with_schema(schema, draft, sink)
    }

    /// Create a registration form starting from an existing draft.
    pub fn with_draft(draft: Draft, sink: S) -> Self {
        Self::with_schema(Schema::registration(), draft, sink)
    }

    /// Create a form for any schema.
    ///
    /// The schema decides which values pass. Submitting still needs a
    /// complete `Registration`, so a schema that leaves out a registration
    /// field fails the submit with `SubmitError::Registration`.
    pub fn with_schema(schema: Schema, draft: Draft, sink: S) -> Self {
        Self {
            schema,
            draft,
            errors: FieldErrors::new(),
            state: FormState::Editing,
            sink,
        }
    }

    /// Bind a control to a field of the draft.
    pub fn bind(&mut self, field: Field) -> FieldBinding<'_> {
        FieldBinding {
            field,
            draft: &mut self.draft,
            state: &mut self.state,
        }
    }

    /// Validate the draft and, if it passes, hand it to the sink.
    ///
    /// Validation failures are stored in the form and returned as
    /// `Submission::Invalid`. Sink failures are returned as errors and are
    /// not recorded in the form.
    pub async fn submit(&mut self) -> Result<Submission, SubmitError> {
        self.state = FormState::Validating;

        let values = match self.schema.check(&self.draft) {
            Ok(values) => values,
            Err(errors) => {
                tracing::debug!(%errors, "submit blocked by validation");
                self.errors = errors.clone();
                self.state = FormState::EditingWithErrors;
                return Ok(Submission::Invalid(errors));
            }
        };

        self.errors.clear();

        let registration = match Registration::from_values(&values) {
            Ok(registration) => registration,
            Err(err) => {
                tracing::warn!(error = %err, "checked draft is not a registration");
                self.state = FormState::Editing;
                return Err(err.into());
            }
        };

        tracing::info!(email = %registration.email, "submitting registration");

        match self.sink.submit(&registration).await {
            Ok(()) => {
                self.state = FormState::Submitted;
                Ok(Submission::Sent(registration))
            }
            Err(err) => {
                let err = SubmitError::sink(err);
                tracing::warn!(error = %err, "registration was not delivered");
                self.state = FormState::Editing;
                Err(err)
            }
        }
    }

    /// The current draft.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The errors of the last submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The error message of a field from the last submit attempt.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

fn initial_draft(schema: &Schema) -> Draft {
    let mut draft = Draft::new();
    for field in schema.fields() {
        if let FieldKind::Select { options } = &field.kind
            && let Some(first) = options.first()
        {
            draft.insert(field.field, *first);
        }
    }
    draft
}

/// A control bound to one field of the draft.
///
/// Changes are written straight into the draft. They do not validate and do
/// not touch the stored errors.
#[derive(Debug)]
pub struct FieldBinding<'a> {
    field: Field,
    draft: &'a mut Draft,
    state: &'a mut FormState,
}

impl FieldBinding<'_> {
    /// The bound field.
    pub fn field(&self) -> Field {
        self.field
    }

    /// The current value of the control, `None` if it was never set.
    pub fn value(&self) -> Option<&DraftValue> {
        self.draft.get(self.field)
    }

    /// Replace the value of the control.
    pub fn set(&mut self, value: impl Into<DraftValue>) -> &mut Self {
        let value = value.into();
        tracing::debug!(field = %self.field, kind = value.type_name(), "field changed");
        self.draft.insert(self.field, value);
        self.touch();
        self
    }

    /// Unset the control.
    pub fn clear(&mut self) -> &mut Self {
        tracing::debug!(field = %self.field, "field cleared");
        self.draft.remove(self.field);
        self.touch();
        self
    }

    /// Check or uncheck one box of a checkbox group.
    ///
    /// Checked values are kept in the order they were checked.
    pub fn toggle(&mut self, option: &str, checked: bool) -> &mut Self {
        let mut items = match self.draft.remove(self.field) {
            Some(DraftValue::List(items)) => items,
            Some(DraftValue::Text(s)) if !s.is_empty() => vec![s],
            _ => Vec::new(),
        };

        let present = items.iter().any(|item| item == option);
        if checked && !present {
            items.push(option.to_string());
        } else if !checked {
            items.retain(|item| item != option);
        }

        tracing::debug!(field = %self.field, option, checked, "checkbox toggled");
        self.draft.insert(self.field, DraftValue::List(items));
        self.touch();
        self
    }

    /// Whether a box of a checkbox group is checked.
    pub fn is_checked(&self, option: &str) -> bool {
        match self.value() {
            Some(DraftValue::List(items)) => items.iter().any(|item| item == option),
            Some(DraftValue::Text(s)) => s == option,
            _ => false,
        }
    }

    fn touch(&mut self) {
        if *self.state == FormState::Submitted {
            *self.state = FormState::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSink;
    use registration_types::Gender;

    #[test]
    fn select_starts_with_first_option() {
        let form = FormController::new(RecordingSink::new());
        assert_eq!(
            form.draft().get(Field::Gender),
            Some(&DraftValue::Text(Gender::Male.to_string()))
        );
        assert_eq!(form.draft().len(), 1);
        assert_eq!(form.state(), FormState::Editing);
    }

    #[test]
    fn binding_writes_through() {
        let mut form = FormController::new(RecordingSink::new());
        form.bind(Field::Name).set("Jane Doe");
        form.bind(Field::Age).set("30");

        assert_eq!(
            form.bind(Field::Name).value(),
            Some(&DraftValue::Text("Jane Doe".into()))
        );
        assert_eq!(
            form.draft().get(Field::Age),
            Some(&DraftValue::Text("30".into()))
        );

        form.bind(Field::Name).clear();
        assert!(!form.draft().contains(Field::Name));
    }

    #[test]
    fn toggle_checkboxes() {
        let mut form = FormController::new(RecordingSink::new());
        form.bind(Field::Vehicle)
            .toggle("Boat", true)
            .toggle("Car", true)
            .toggle("Boat", true);
        assert_eq!(
            form.draft().get(Field::Vehicle),
            Some(&DraftValue::List(vec!["Boat".into(), "Car".into()]))
        );

        let mut vehicle = form.bind(Field::Vehicle);
        vehicle.toggle("Boat", false);
        assert!(vehicle.is_checked("Car"));
        assert!(!vehicle.is_checked("Boat"));

        vehicle.toggle("Car", false);
        assert_eq!(vehicle.value(), Some(&DraftValue::List(Vec::new())));
    }

    #[test]
    fn toggle_on_single_text_value() {
        let draft = Draft::new().with(Field::Vehicle, "Bike");
        let mut form = FormController::with_draft(draft, RecordingSink::new());
        form.bind(Field::Vehicle).toggle("Tractor", true);
        assert_eq!(
            form.draft().get(Field::Vehicle),
            Some(&DraftValue::List(vec!["Bike".into(), "Tractor".into()]))
        );
    }

    #[test]
    fn editing_does_not_validate() {
        let mut form = FormController::new(RecordingSink::new());
        form.bind(Field::Email).set("not-an-email");
        form.bind(Field::Age).set(3);
        assert!(form.errors().is_empty());
        assert_eq!(form.state(), FormState::Editing);
    }
}
