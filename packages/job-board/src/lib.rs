//! Client-side core of the job board.
//!
//! Holds the filter criteria, turns them into listing queries, debounces
//! filter edits, tracks the fetch lifecycle, submits new postings and
//! remembers which rows the user applied to. Rendering is left to the
//! caller, which observes [`FetchState`] and [`FormStatus`] through watch
//! channels.
//!
//! # Example
//!
//! ```rust,ignore
//! use job_board::{Config, JobBoard};
//!
//! let mut board = JobBoard::from_config(&Config::from_env()?)?;
//! board.mount();
//!
//! let mut listing = board.subscribe();
//! board.set_search("Engineer");
//! listing.changed().await?;
//! ```

pub mod board;
pub mod config;
pub mod debounce;
pub mod fetcher;
pub mod filters;
pub mod mutator;
pub mod query;
pub mod tracker;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use board::JobBoard;
pub use config::Config;
pub use debounce::{DebounceScheduler, DEFAULT_QUIET_PERIOD};
pub use fetcher::{FetchState, JobFetcher};
pub use filters::{FilterCriteria, FilterState, SalaryRange, GLOBAL_MAX_SALARY, GLOBAL_MIN_SALARY};
pub use mutator::{FormStatus, JobDraft, JobMutator, MutationError};
pub use query::{build_query, QueryParams};
pub use tracker::ApplicationTracker;
pub use traits::BaseJobsApi;

pub use jobs_client::{Job, JobType, JobsClient, JobsClientError, Location, NewJob};
