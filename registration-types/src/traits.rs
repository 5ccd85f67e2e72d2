use async_trait::async_trait;

use crate::Registration;

/// Trait for collaborators that receive validated registrations.
///
/// A sink is told nothing about the form; it only receives a value that
/// already passed validation. The outcome is binary: the registration was
/// accepted, or the sink failed.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// The error type for this sink.
    type Error: Into<anyhow::Error> + Send;

    /// Deliver a registration.
    ///
    /// # Returns
    /// * `Ok(())` if the sink accepted the registration
    /// * `Err` on transport failure or rejection
    async fn submit(&self, registration: &Registration) -> Result<(), Self::Error>;
}
