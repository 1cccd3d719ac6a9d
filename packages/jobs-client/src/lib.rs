//! Pure REST client for the job board backend.
//!
//! Two endpoints are consumed: `GET /jobs` (filtered listing) and
//! `POST /jobs` (create a posting). The client holds no state beyond the
//! base address and a pooled `reqwest::Client`.
//!
//! # Example
//!
//! ```rust,ignore
//! use jobs_client::JobsClient;
//!
//! let client = JobsClient::new("http://localhost:8080")?;
//!
//! let jobs = client.list_jobs(&[("title", "Engineer")]).await?;
//! for job in &jobs {
//!     println!("{} ({})", job.title, job.location);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{JobsClientError, Result};
pub use types::{
    ApiErrorBody, Job, JobType, Location, NewJob, UnknownVariant, PLACEHOLDER_LOGO_URL,
};

use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct JobsClient {
    client: reqwest::Client,
    base_url: String,
}

impl JobsClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    /// Fetch the postings matching `query`, sent as URL parameters.
    ///
    /// An empty query produces a bare `GET /jobs`.
    pub async fn list_jobs<Q>(&self, query: &Q) -> Result<Vec<Job>>
    where
        Q: Serialize + ?Sized,
    {
        let resp = self.client.get(self.jobs_url()).query(query).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &body, |code| {
                format!("HTTP error: status {}", code)
            }));
        }

        let jobs: Vec<Job> = serde_json::from_str(&body)?;
        tracing::debug!(count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }

    /// Create a posting. The response body of a successful create is ignored.
    pub async fn create_job(&self, job: &NewJob) -> Result<()> {
        let resp = self.client.post(self.jobs_url()).json(job).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error(status, &body, |code| {
                format!("Failed to create job with status: {}", code)
            }));
        }

        tracing::debug!(title = %job.title, "Created job");
        Ok(())
    }
}

/// Build an `Api` error, preferring the backend's `{message}` and falling
/// back to `fallback` when the body is empty, not JSON, or has no message.
fn api_error(status: StatusCode, body: &str, fallback: impl FnOnce(u16) -> String) -> JobsClientError {
    let code = status.as_u16();
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback(code));

    JobsClientError::Api {
        status: code,
        message,
    }
}
