//! Listing reads and the fetch lifecycle.
//!
//! Every call to [`JobFetcher::fetch`] is one fetch cycle:
//! `Loading` is published immediately, then `Success` or `Failure` once the
//! backend answers. Requests are never cancelled, so two cycles can overlap.
//! Each cycle takes a sequence number when it starts and only publishes its
//! result if no later cycle has started since; a slow response can therefore
//! never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use jobs_client::Job;
use tokio::sync::watch;

use crate::query::QueryParams;
use crate::tracker::ApplicationTracker;
use crate::traits::BaseJobsApi;

/// State of the listing. Exactly one variant is active at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Job>),
    Failure(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn jobs(&self) -> Option<&[Job]> {
        match self {
            FetchState::Success(jobs) => Some(jobs),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

pub struct JobFetcher {
    api: Arc<dyn BaseJobsApi>,
    tracker: Arc<ApplicationTracker>,
    state: watch::Sender<FetchState>,
    issued: AtomicU64,
}

impl JobFetcher {
    pub fn new(api: Arc<dyn BaseJobsApi>, tracker: Arc<ApplicationTracker>) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            api,
            tracker,
            state,
            issued: AtomicU64::new(0),
        }
    }

    /// Current published state
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every published state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Sequence number of the most recently started fetch cycle.
    pub fn latest_sequence(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Run one fetch cycle for `query` and return its outcome.
    ///
    /// The returned state is always this cycle's own result. It is only
    /// published (and only clears the application tracker) if this cycle is
    /// still the latest one when the response arrives.
    pub async fn fetch(&self, query: &QueryParams) -> FetchState {
        let mut seq = 0;
        // Sequence assignment and the Loading publish happen under the
        // channel lock so they can't interleave with another cycle's publish.
        self.state.send_modify(|state| {
            seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FetchState::Loading;
        });
        tracing::debug!(seq, query = %query, "Fetching jobs");

        let outcome = match self.api.list_jobs(query).await {
            Ok(jobs) => {
                tracing::info!(seq, count = jobs.len(), "Fetched jobs");
                FetchState::Success(jobs)
            }
            Err(e) => {
                tracing::warn!(seq, status = ?e.status(), error = %e, "Failed to fetch jobs");
                FetchState::Failure(e.to_string())
            }
        };

        let published = self.state.send_if_modified(|state| {
            if self.issued.load(Ordering::SeqCst) != seq {
                return false;
            }
            if matches!(outcome, FetchState::Success(_)) {
                self.tracker.reset();
            }
            *state = outcome.clone();
            true
        });

        if !published {
            tracing::warn!(
                seq,
                latest = self.latest_sequence(),
                "Discarding stale job listing response"
            );
        }

        outcome
    }
}

impl std::fmt::Debug for JobFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobFetcher")
            .field("state", &*self.state.borrow())
            .field("issued", &self.issued)
            .finish_non_exhaustive()
    }
}
