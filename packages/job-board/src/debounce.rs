//! Cancelable delayed task used to coalesce bursts of filter edits.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period between the last filter edit and the fetch.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Runs at most one pending task, `quiet` after it was last scheduled.
///
/// Scheduling again before the quiet period elapses cancels the pending task
/// and restarts the clock. Once the timer fires the task runs detached, so a
/// later `schedule` or `cancel` never aborts work that already started.
///
/// Dropping the scheduler cancels whatever is still pending. Must be used
/// from within a tokio runtime.
#[derive(Debug)]
pub struct DebounceScheduler {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebounceScheduler {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending task with `task`, to run after the quiet period.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancel() {
            tracing::trace!("Rescheduled pending debounced task");
        }

        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            tokio::spawn(task);
        }));
    }

    /// Cancel the pending task. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::{sleep, Instant};

    type Fired = Arc<Mutex<Vec<(Duration, &'static str)>>>;

    fn record(fired: &Fired, start: Instant, label: &'static str) -> impl Future<Output = ()> {
        let fired = fired.clone();
        async move {
            fired.lock().unwrap().push((start.elapsed(), label));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_after_last_event() {
        let fired: Fired = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::default();

        scheduler.schedule(record(&fired, start, "t0"));
        sleep(Duration::from_millis(100)).await;
        scheduler.schedule(record(&fired, start, "t100"));
        sleep(Duration::from_millis(50)).await;
        scheduler.schedule(record(&fired, start, "t150"));

        sleep(Duration::from_millis(299)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(scheduler.is_pending());

        sleep(Duration::from_secs(1)).await;
        assert_eq!(
            fired.lock().unwrap().as_slice(),
            &[(Duration::from_millis(450), "t150")]
        );
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_events_each_fire() {
        let fired: Fired = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::default();

        scheduler.schedule(record(&fired, start, "first"));
        sleep(Duration::from_millis(400)).await;
        scheduler.schedule(record(&fired, start, "second"));
        sleep(Duration::from_millis(400)).await;

        assert_eq!(
            fired.lock().unwrap().as_slice(),
            &[
                (Duration::from_millis(300), "first"),
                (Duration::from_millis(700), "second"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let fired: Fired = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::default();

        scheduler.schedule(record(&fired, start, "never"));
        sleep(Duration::from_millis(100)).await;
        assert!(scheduler.cancel());
        assert!(!scheduler.cancel());

        sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_task() {
        let fired: Fired = Arc::default();
        let start = Instant::now();

        {
            let mut scheduler = DebounceScheduler::new(Duration::from_millis(50));
            scheduler.schedule(record(&fired, start, "never"));
        }

        sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn started_task_survives_reschedule() {
        let fired: Fired = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::new(Duration::from_millis(10));

        let slow = {
            let fired = fired.clone();
            async move {
                sleep(Duration::from_millis(100)).await;
                fired.lock().unwrap().push((start.elapsed(), "slow"));
            }
        };
        scheduler.schedule(slow);
        sleep(Duration::from_millis(20)).await;

        // the slow task is mid-flight; neither of these may abort it
        scheduler.schedule(record(&fired, start, "next"));
        scheduler.cancel();

        sleep(Duration::from_secs(1)).await;
        assert_eq!(
            fired.lock().unwrap().as_slice(),
            &[(Duration::from_millis(110), "slow")]
        );
    }
}
