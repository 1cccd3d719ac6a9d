// Backend seam for dependency injection
//
// The fetcher and mutator only see this trait; production wires in
// `JobsClient`, tests wire in `testing::MockJobsApi`.

use async_trait::async_trait;
use jobs_client::{Job, JobsClient, JobsClientError, NewJob};

use crate::query::QueryParams;

#[async_trait]
pub trait BaseJobsApi: Send + Sync {
    /// `GET /jobs` with `query` as URL parameters
    async fn list_jobs(&self, query: &QueryParams) -> Result<Vec<Job>, JobsClientError>;

    /// `POST /jobs`
    async fn create_job(&self, job: &NewJob) -> Result<(), JobsClientError>;
}

#[async_trait]
impl BaseJobsApi for JobsClient {
    async fn list_jobs(&self, query: &QueryParams) -> Result<Vec<Job>, JobsClientError> {
        JobsClient::list_jobs(self, query.pairs()).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<(), JobsClientError> {
        JobsClient::create_job(self, job).await
    }
}
