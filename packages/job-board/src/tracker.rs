//! Session-only "applied" flags for the rendered listing.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Positions in the current listing the user has applied to.
///
/// Keyed by list position, so the set only means something for the
/// collection it was built against. The fetcher clears it whenever a new
/// collection is published. Nothing is sent to the backend.
#[derive(Debug, Default)]
pub struct ApplicationTracker {
    applied: Mutex<BTreeSet<usize>>,
}

impl ApplicationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `position` as applied. Returns false if it already was.
    pub fn mark_applied(&self, position: usize) -> bool {
        self.lock().insert(position)
    }

    pub fn is_applied(&self, position: usize) -> bool {
        self.lock().contains(&position)
    }

    /// Applied positions in ascending order
    pub fn applied(&self) -> Vec<usize> {
        self.lock().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub(crate) fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<usize>> {
        // A plain set can't be left half-updated, so a poisoned lock is still usable.
        self.applied.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_applied_is_idempotent() {
        let tracker = ApplicationTracker::new();

        assert!(tracker.mark_applied(2));
        assert!(!tracker.mark_applied(2));
        assert!(tracker.is_applied(2));
        assert!(!tracker.is_applied(1));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn reset_clears_every_position() {
        let tracker = ApplicationTracker::new();
        tracker.mark_applied(0);
        tracker.mark_applied(5);
        assert_eq!(tracker.applied(), vec![0, 5]);

        tracker.reset();

        assert!(tracker.is_empty());
        assert!(!tracker.is_applied(0));
        assert!(!tracker.is_applied(5));
    }
}
