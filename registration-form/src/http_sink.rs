//! Delivers registrations to the registration endpoint over HTTP.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::instrument;

use registration_types::{Registration, SubmissionSink};

/// Path of the registration endpoint, relative to the base URL.
pub const REGISTER_PATH: &str = "/api/register";

/// Error type for HttpSink.
#[derive(Debug, thiserror::Error)]
pub enum HttpSinkError {
    /// The request could not be sent or the response not read.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
}

impl HttpSinkError {
    /// The HTTP status, if the endpoint answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport { .. } => None,
            Self::Status { status, .. } => Some(*status),
        }
    }
}

/// A sink that POSTs each registration as JSON to `<base_url>/api/register`.
///
/// One request per submission; no retries. The response body is ignored.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
}

impl HttpSink {
    /// Create a sink for the endpoint under the given base URL, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a sink that sends requests with a preconfigured client.
    pub fn with_client(client: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        let base = base_url.as_ref().trim_end_matches('/');
        Self {
            client,
            url: format!("{base}{REGISTER_PATH}"),
        }
    }

    /// The full URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SubmissionSink for HttpSink {
    type Error = HttpSinkError;

    #[instrument(skip(self, registration), fields(url = %self.url))]
    async fn submit(&self, registration: &Registration) -> Result<(), Self::Error> {
        let response = self
            .client
            .post(&self.url)
            .json(registration)
            .send()
            .await
            .map_err(|source| HttpSinkError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpSinkError::Status {
                url: self.url.clone(),
                status,
            });
        }

        tracing::debug!(%status, "registration accepted");
        Ok(())
    }
}
