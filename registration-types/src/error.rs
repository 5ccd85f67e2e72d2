use crate::RegistrationError;

/// Error type for form submission.
///
/// Validation failures are not errors: they are stored in the form and
/// reported as `Submission::Invalid`.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The draft passed the form's schema, but the schema does not produce a
    /// complete registration.
    #[error("Schema does not describe a registration: {0}")]
    Registration(#[from] RegistrationError),

    /// The submission sink failed (transport error, rejected request, ...).
    #[error("Submission failed: {0}")]
    Sink(#[from] anyhow::Error),
}

impl SubmitError {
    /// Create a sink error from any error type.
    pub fn sink(err: impl Into<anyhow::Error>) -> Self {
        Self::Sink(err.into())
    }

    /// Get the underlying sink error, if the sink failed.
    pub fn sink_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Sink(err) => Some(err),
            Self::Registration(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;

    #[test]
    fn registration_errors_are_not_sink_errors() {
        let err = SubmitError::from(RegistrationError::Missing(Field::Age));
        assert!(err.sink_error().is_none());
        assert_eq!(
            err.to_string(),
            "Schema does not describe a registration: No checked value for required field 'age'"
        );

        let err = SubmitError::sink(anyhow::anyhow!("connection refused"));
        assert_eq!(
            err.sink_error().map(ToString::to_string).as_deref(),
            Some("connection refused")
        );
    }
}
