// Test doubles for the backend
//
// `MockJobsApi` records every call and replays queued responses in order.
// Responses may carry a delay to reproduce out-of-order completion.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use jobs_client::{Job, JobType, JobsClientError, Location, NewJob};

use crate::mutator::JobDraft;
use crate::query::QueryParams;
use crate::traits::BaseJobsApi;

struct Queued<T> {
    delay: Option<Duration>,
    result: Result<T, JobsClientError>,
}

#[derive(Clone, Default)]
pub struct MockJobsApi {
    list_responses: Arc<Mutex<VecDeque<Queued<Vec<Job>>>>>,
    create_responses: Arc<Mutex<VecDeque<Queued<()>>>>,
    list_calls: Arc<Mutex<Vec<QueryParams>>>,
    create_calls: Arc<Mutex<Vec<NewJob>>>,
}

impl MockJobsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful listing
    pub fn with_jobs(self, jobs: Vec<Job>) -> Self {
        self.push_list(None, Ok(jobs));
        self
    }

    /// Queue a listing that completes only after `delay`
    pub fn with_delayed_jobs(self, delay: Duration, jobs: Vec<Job>) -> Self {
        self.push_list(Some(delay), Ok(jobs));
        self
    }

    pub fn with_list_error(self, error: JobsClientError) -> Self {
        self.push_list(None, Err(error));
        self
    }

    /// Queue a non-2xx listing response
    pub fn with_list_status(self, status: u16, message: &str) -> Self {
        self.with_list_error(api_error(status, message))
    }

    pub fn with_create_error(self, error: JobsClientError) -> Self {
        self.create_responses.lock().unwrap().push_back(Queued {
            delay: None,
            result: Err(error),
        });
        self
    }

    /// Queue a non-2xx create response
    pub fn with_create_status(self, status: u16, message: &str) -> Self {
        self.with_create_error(api_error(status, message))
    }

    /// Get every query that was listed, in call order
    pub fn list_calls(&self) -> Vec<QueryParams> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Get every job that was submitted
    pub fn create_calls(&self) -> Vec<NewJob> {
        self.create_calls.lock().unwrap().clone()
    }

    fn push_list(&self, delay: Option<Duration>, result: Result<Vec<Job>, JobsClientError>) {
        self.list_responses
            .lock()
            .unwrap()
            .push_back(Queued { delay, result });
    }
}

#[async_trait]
impl BaseJobsApi for MockJobsApi {
    async fn list_jobs(&self, query: &QueryParams) -> Result<Vec<Job>, JobsClientError> {
        self.list_calls.lock().unwrap().push(query.clone());

        let next = self.list_responses.lock().unwrap().pop_front();
        match next {
            Some(queued) => {
                if let Some(delay) = queued.delay {
                    tokio::time::sleep(delay).await;
                }
                queued.result
            }
            None => Ok(vec![]),
        }
    }

    async fn create_job(&self, job: &NewJob) -> Result<(), JobsClientError> {
        self.create_calls.lock().unwrap().push(job.clone());

        let next = self.create_responses.lock().unwrap().pop_front();
        match next {
            Some(queued) => {
                if let Some(delay) = queued.delay {
                    tokio::time::sleep(delay).await;
                }
                queued.result
            }
            None => Ok(()),
        }
    }
}

/// Build the error the real client returns for a non-2xx response
pub fn api_error(status: u16, message: &str) -> JobsClientError {
    JobsClientError::Api {
        status,
        message: message.to_string(),
    }
}

/// A minimal active posting
pub fn job(id: &str, title: &str) -> Job {
    let posted = Utc
        .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default();

    Job {
        id: id.to_string(),
        title: title.to_string(),
        job_type: "Full-time".to_string(),
        location: "Remote".to_string(),
        description: format!("{} role", title),
        salary: 12.0,
        experience: "2".to_string(),
        is_active: true,
        created_at: posted,
        updated_at: posted,
        company_logo_url: None,
        posted_time: None,
    }
}

/// A complete submission form
pub fn job_draft() -> JobDraft {
    JobDraft {
        title: "Backend Engineer".into(),
        company_name: "Acme".into(),
        location: Some(Location::Remote),
        job_type: Some(JobType::FullTime),
        experience: "3".into(),
        salary: "18.5".into(),
        application_deadline: NaiveDate::from_ymd_opt(2025, 6, 30),
        description: "Own the job pipeline".into(),
    }
}
