//! Job submission: draft coercion, the create request, and the refresh that
//! follows it.

use std::sync::Arc;

use chrono::NaiveDate;
use jobs_client::{JobType, JobsClientError, Location, NewJob};
use thiserror::Error;
use tokio::sync::watch;

use crate::fetcher::JobFetcher;
use crate::query::QueryParams;
use crate::traits::BaseJobsApi;

/// What the submission form collects. Numeric fields arrive as typed text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDraft {
    pub title: String,
    pub company_name: String,
    pub location: Option<Location>,
    pub job_type: Option<JobType>,
    /// Years of experience
    pub experience: String,
    /// Maximum salary in lakhs per annum
    pub salary: String,
    pub application_deadline: Option<NaiveDate>,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a non-negative number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Rejected(#[from] JobsClientError),
}

impl JobDraft {
    /// Check required fields and coerce into the backend's create shape.
    ///
    /// Company name and deadline are required or optional on the form only;
    /// the backend doesn't take them.
    pub fn to_new_job(&self) -> Result<NewJob, MutationError> {
        let title = required(&self.title, "Job title")?;
        required(&self.company_name, "Company name")?;
        let location = self.location.ok_or(MutationError::MissingField("Location"))?;
        let job_type = self.job_type.ok_or(MutationError::MissingField("Job type"))?;
        let experience = required(&self.experience, "Experience")?;
        let salary = required(&self.salary, "Salary")?;
        let description = required(&self.description, "Job description")?;

        let experience: u32 = experience
            .parse()
            .map_err(|_| MutationError::InvalidNumber {
                field: "Experience",
                value: experience.to_string(),
            })?;

        let salary: f64 = salary
            .parse()
            .ok()
            .filter(|s: &f64| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| MutationError::InvalidNumber {
                field: "Salary",
                value: salary.to_string(),
            })?;

        Ok(NewJob {
            title: title.to_string(),
            experience: experience.to_string(),
            job_type,
            location,
            description: description.to_string(),
            salary,
            is_active: true,
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, MutationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MutationError::MissingField(field));
    }
    Ok(trimmed)
}

/// Submission form as the presentation layer should show it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Closed,
    Open,
    Submitting,
    /// Still open, showing why the last submit failed
    Failed(String),
}

impl FormStatus {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormStatus::Closed)
    }
}

pub struct JobMutator {
    api: Arc<dyn BaseJobsApi>,
    fetcher: Arc<JobFetcher>,
    form: watch::Sender<FormStatus>,
}

impl JobMutator {
    pub fn new(api: Arc<dyn BaseJobsApi>, fetcher: Arc<JobFetcher>) -> Self {
        let (form, _) = watch::channel(FormStatus::Closed);
        Self { api, fetcher, form }
    }

    pub fn form_status(&self) -> FormStatus {
        self.form.borrow().clone()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<FormStatus> {
        self.form.subscribe()
    }

    pub fn open_form(&self) {
        self.form.send_replace(FormStatus::Open);
    }

    pub fn close_form(&self) {
        self.form.send_replace(FormStatus::Closed);
    }

    /// Submit `draft`, then refresh the listing for `query` without
    /// debouncing and close the form.
    ///
    /// The form closes even if the refresh fails; that failure shows up in
    /// the fetch state instead. On any error before that the form stays open
    /// with the message and the listing is left untouched.
    pub async fn create(&self, draft: &JobDraft, query: &QueryParams) -> Result<(), MutationError> {
        let job = draft.to_new_job().map_err(|e| self.fail(e))?;

        self.form.send_replace(FormStatus::Submitting);
        if let Err(e) = self.api.create_job(&job).await {
            tracing::warn!(status = ?e.status(), error = %e, "Failed to create job");
            return Err(self.fail(e.into()));
        }
        tracing::info!(title = %job.title, "Created job, refreshing listing");

        self.fetcher.fetch(query).await;
        self.form.send_replace(FormStatus::Closed);

        Ok(())
    }

    fn fail(&self, error: MutationError) -> MutationError {
        self.form.send_replace(FormStatus::Failed(error.to_string()));
        error
    }
}
