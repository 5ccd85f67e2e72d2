//! Recording sink for exercising forms without a network.
//!
//! `RecordingSink` keeps every registration it receives, so tests can check
//! what would have been posted.
//!
//! # Example
//!
//! ```rust,ignore
//! use registration_form::{Field, FormController, RecordingSink};
//!
//! let mut form = FormController::new(RecordingSink::new());
//! form.bind(Field::Name).set("Jane Doe");
//! form.bind(Field::Email).set("j.doe@example.com");
//! form.bind(Field::Age).set(30);
//!
//! form.submit().await?;
//! assert_eq!(form.sink().count(), 1);
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;

use registration_types::{Registration, SubmissionSink};

/// A sink that records registrations in memory.
///
/// It can be configured to reject every submission, which stands in for a
/// failing endpoint.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Registration>>,
    failure: Option<String>,
}

/// Error type for RecordingSink.
#[derive(Debug, thiserror::Error)]
pub enum RecordingSinkError {
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

impl RecordingSink {
    /// Create a sink that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that rejects every submission with the given message.
    ///
    /// Rejected submissions are still recorded.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// All registrations received so far, oldest first.
    pub fn received(&self) -> Vec<Registration> {
        self.received.lock().clone()
    }

    /// The most recent registration.
    pub fn last(&self) -> Option<Registration> {
        self.received.lock().last().cloned()
    }

    /// Number of submissions received.
    pub fn count(&self) -> usize {
        self.received.lock().len()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    type Error = RecordingSinkError;

    async fn submit(&self, registration: &Registration) -> Result<(), Self::Error> {
        self.received.lock().push(registration.clone());
        match &self.failure {
            Some(message) => Err(RecordingSinkError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}
