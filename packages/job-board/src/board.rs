//! Top-level state container for one job board session.
//!
//! The presentation layer owns a `JobBoard`, forwards user intents to it,
//! and renders whatever it publishes through [`JobBoard::subscribe`] and
//! [`JobBoard::subscribe_form`]. Filter edits are debounced; a successful
//! submission refreshes immediately.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use jobs_client::{JobType, JobsClient, Location};
use tokio::sync::watch;

use crate::config::Config;
use crate::debounce::DebounceScheduler;
use crate::fetcher::{FetchState, JobFetcher};
use crate::filters::{FilterCriteria, FilterState};
use crate::mutator::{FormStatus, JobDraft, JobMutator, MutationError};
use crate::query::{build_query, QueryParams};
use crate::tracker::ApplicationTracker;
use crate::traits::BaseJobsApi;

pub struct JobBoard {
    filters: FilterState,
    debounce: DebounceScheduler,
    fetcher: Arc<JobFetcher>,
    mutator: JobMutator,
    tracker: Arc<ApplicationTracker>,
}

impl JobBoard {
    pub fn new(api: Arc<dyn BaseJobsApi>, quiet_period: Duration) -> Self {
        let tracker = Arc::new(ApplicationTracker::new());
        let fetcher = Arc::new(JobFetcher::new(api.clone(), tracker.clone()));
        let mutator = JobMutator::new(api, fetcher.clone());

        Self {
            filters: FilterState::new(),
            debounce: DebounceScheduler::new(quiet_period),
            fetcher,
            mutator,
            tracker,
        }
    }

    /// Wire a board to the real backend described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = JobsClient::with_timeout(&config.backend_url, config.request_timeout)
            .context("Failed to create HTTP client")?;
        Ok(Self::new(Arc::new(client), config.debounce))
    }

    /// Schedule the initial listing, debounced like any filter change.
    pub fn mount(&mut self) {
        tracing::debug!("Mounting job board");
        self.schedule_fetch();
    }

    /// Cancel any pending debounced fetch. In-flight requests still finish.
    pub fn teardown(&mut self) {
        if self.debounce.cancel() {
            tracing::debug!("Cancelled pending fetch on teardown");
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn criteria(&self) -> &FilterCriteria {
        self.filters.criteria()
    }

    /// Query for the current criteria
    pub fn query(&self) -> QueryParams {
        build_query(self.filters.criteria())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let changed = self.filters.set_search(search);
        self.filters_changed(changed);
    }

    pub fn set_location(&mut self, location: Option<Location>) {
        let changed = self.filters.set_location(location);
        self.filters_changed(changed);
    }

    pub fn set_location_text(&mut self, text: &str) {
        let changed = self.filters.set_location_text(text);
        self.filters_changed(changed);
    }

    pub fn set_job_type(&mut self, job_type: Option<JobType>) {
        let changed = self.filters.set_job_type(job_type);
        self.filters_changed(changed);
    }

    pub fn set_job_type_text(&mut self, text: &str) {
        let changed = self.filters.set_job_type_text(text);
        self.filters_changed(changed);
    }

    pub fn set_experience(&mut self, experience: impl Into<String>) {
        let changed = self.filters.set_experience(experience);
        self.filters_changed(changed);
    }

    pub fn set_salary_range(&mut self, min: u32, max: u32) {
        let changed = self.filters.set_salary_range(min, max);
        self.filters_changed(changed);
    }

    pub fn set_min_salary_text(&mut self, text: &str) {
        let changed = self.filters.set_min_salary_text(text);
        self.filters_changed(changed);
    }

    pub fn set_max_salary_text(&mut self, text: &str) {
        let changed = self.filters.set_max_salary_text(text);
        self.filters_changed(changed);
    }

    pub fn reset_filters(&mut self) {
        let changed = self.filters.reset();
        self.filters_changed(changed);
    }

    fn filters_changed(&mut self, changed: bool) {
        if changed {
            self.schedule_fetch();
        }
    }

    /// The query is captured now, so the fetch uses the criteria as they
    /// were at the last edit.
    fn schedule_fetch(&mut self) {
        let query = self.query();
        tracing::debug!(query = %query, "Scheduling debounced fetch");

        let fetcher = self.fetcher.clone();
        self.debounce.schedule(async move {
            fetcher.fetch(&query).await;
        });
    }

    pub fn fetch_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    // ------------------------------------------------------------------
    // Listing
    // ------------------------------------------------------------------

    /// Fetch the current query right away, bypassing the debounce.
    pub async fn refresh(&self) -> FetchState {
        self.fetcher.fetch(&self.query()).await
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetcher.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.fetcher.subscribe()
    }

    /// Mark the row at `position` as applied.
    ///
    /// Returns false if the position isn't in the listing currently shown.
    pub fn apply(&self, position: usize) -> bool {
        let in_listing = self
            .fetcher
            .state()
            .jobs()
            .is_some_and(|jobs| position < jobs.len());
        if !in_listing {
            tracing::debug!(position, "Ignoring apply outside current listing");
            return false;
        }

        self.tracker.mark_applied(position);
        true
    }

    pub fn is_applied(&self, position: usize) -> bool {
        self.tracker.is_applied(position)
    }

    pub fn tracker(&self) -> &ApplicationTracker {
        &self.tracker
    }

    // ------------------------------------------------------------------
    // Submission form
    // ------------------------------------------------------------------

    pub fn open_form(&self) {
        self.mutator.open_form();
    }

    pub fn close_form(&self) {
        self.mutator.close_form();
    }

    pub fn form_status(&self) -> FormStatus {
        self.mutator.form_status()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<FormStatus> {
        self.mutator.subscribe_form()
    }

    /// Submit a new posting, then refresh the listing for the current filters.
    pub async fn submit_job(&self, draft: &JobDraft) -> Result<(), MutationError> {
        self.mutator.create(draft, &self.query()).await
    }
}

impl std::fmt::Debug for JobBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobBoard")
            .field("criteria", self.filters.criteria())
            .field("fetcher", &self.fetcher)
            .field("form", &self.mutator.form_status())
            .finish_non_exhaustive()
    }
}
