//! Deletion Scheduler Port - Delayed, cancellable removal of transient files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Port for scheduling best-effort file deletion.
///
/// Jobs are detached from the caller. Scheduling a path that already has a
/// pending job replaces that job.
pub trait DeletionScheduler: Send + Sync {
    /// Delete `path` once `delay` has elapsed.
    fn schedule(&self, path: PathBuf, delay: Duration) -> ScheduledDeletion;

    /// Cancel the pending job for `path`. Returns `false` if none was pending.
    fn cancel(&self, path: &Path) -> bool;

    /// Number of jobs that have not fired yet.
    fn pending(&self) -> usize;

    /// Cancel every pending job.
    fn shutdown(&self);
}

/// Receipt for a scheduled deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledDeletion {
    pub path: PathBuf,
    pub due_at: DateTime<Utc>,
}

impl ScheduledDeletion {
    /// Receipt for a job due `delay` from now.
    pub fn after(path: PathBuf, delay: Duration) -> Self {
        let due_at = chrono::Duration::from_std(delay)
            .ok()
            .and_then(|delay| Utc::now().checked_add_signed(delay))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { path, due_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_is_due_in_the_future() {
        let before = Utc::now();
        let receipt = ScheduledDeletion::after(PathBuf::from("out.docx"), Duration::from_secs(5));
        assert!(receipt.due_at >= before + chrono::Duration::seconds(5));
        assert_eq!(receipt.path, PathBuf::from("out.docx"));
    }

    #[test]
    fn huge_delay_saturates() {
        let receipt = ScheduledDeletion::after(PathBuf::from("x"), Duration::MAX);
        assert_eq!(receipt.due_at, DateTime::<Utc>::MAX_UTC);
    }
}
