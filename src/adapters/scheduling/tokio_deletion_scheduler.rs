//! Tokio Deletion Scheduler
//!
//! Each scheduled deletion is a spawned task that sleeps, then removes the
//! file through `ArtifactStorage`. Jobs are tracked by path so they can be
//! replaced, cancelled, or all aborted on shutdown.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::ports::{ArtifactStorage, DeletionScheduler, ScheduledDeletion};

struct Job {
    generation: u64,
    handle: AbortHandle,
}

type JobTable = Arc<Mutex<HashMap<PathBuf, Job>>>;

fn lock_jobs(jobs: &Mutex<HashMap<PathBuf, Job>>) -> MutexGuard<'_, HashMap<PathBuf, Job>> {
    jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Delayed file deletion on the tokio runtime.
///
/// Must be used from within a tokio runtime.
pub struct TokioDeletionScheduler {
    storage: Arc<dyn ArtifactStorage>,
    jobs: JobTable,
    next_generation: AtomicU64,
}

impl TokioDeletionScheduler {
    pub fn new(storage: Arc<dyn ArtifactStorage>) -> Self {
        Self {
            storage,
            jobs: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    async fn delete_after(
        storage: Arc<dyn ArtifactStorage>,
        jobs: JobTable,
        path: PathBuf,
        delay: Duration,
        generation: u64,
    ) {
        tokio::time::sleep(delay).await;

        match storage.delete(&path).await {
            Ok(true) => info!(path = %path.display(), "Deleted transient file"),
            Ok(false) => debug!(path = %path.display(), "Transient file already gone"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete transient file"),
        }

        let mut jobs = lock_jobs(&jobs);
        if jobs.get(&path).map(|job| job.generation) == Some(generation) {
            jobs.remove(&path);
        }
    }
}

impl DeletionScheduler for TokioDeletionScheduler {
    fn schedule(&self, path: PathBuf, delay: Duration) -> ScheduledDeletion {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let receipt = ScheduledDeletion::after(path.clone(), delay);

        // Hold the table while spawning so a zero-delay job cannot finish
        // before it is registered.
        let mut jobs = lock_jobs(&self.jobs);
        let task = tokio::spawn(Self::delete_after(
            Arc::clone(&self.storage),
            Arc::clone(&self.jobs),
            path.clone(),
            delay,
            generation,
        ));
        let previous = jobs.insert(
            path.clone(),
            Job {
                generation,
                handle: task.abort_handle(),
            },
        );
        drop(jobs);

        if let Some(previous) = previous {
            previous.handle.abort();
            debug!(path = %path.display(), "Replaced pending deletion");
        }
        debug!(path = %path.display(), delay_secs = delay.as_secs_f64(), "Scheduled deletion");

        receipt
    }

    fn cancel(&self, path: &Path) -> bool {
        match lock_jobs(&self.jobs).remove(path) {
            Some(job) => {
                job.handle.abort();
                true
            }
            None => false,
        }
    }

    fn pending(&self) -> usize {
        lock_jobs(&self.jobs).len()
    }

    fn shutdown(&self) {
        let drained: Vec<Job> = lock_jobs(&self.jobs).drain().map(|(_, job)| job).collect();
        if !drained.is_empty() {
            info!(count = drained.len(), "Cancelling pending deletions");
        }
        for job in drained {
            job.handle.abort();
        }
    }
}

impl Drop for TokioDeletionScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::LocalArtifactStorage;
    use tempfile::TempDir;

    fn scheduler() -> TokioDeletionScheduler {
        TokioDeletionScheduler::new(Arc::new(LocalArtifactStorage::new()))
    }

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"generated").unwrap();
        path
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    #[tokio::test]
    async fn deletes_file_after_delay() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "filled.docx");
        let scheduler = scheduler();

        scheduler.schedule(path.clone(), Duration::from_millis(20));
        assert!(path.exists());
        assert_eq!(scheduler.pending(), 1);

        settle().await;

        assert!(!path.exists());
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler();

        scheduler.schedule(dir.path().join("never-written.docx"), Duration::ZERO);
        settle().await;

        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn cancel_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "filled.docx");
        let scheduler = scheduler();

        scheduler.schedule(path.clone(), Duration::from_millis(20));
        assert!(scheduler.cancel(&path));
        assert!(!scheduler.cancel(&path));

        settle().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn rescheduling_replaces_earlier_job() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "filled.docx");
        let scheduler = scheduler();

        scheduler.schedule(path.clone(), Duration::from_millis(20));
        scheduler.schedule(path.clone(), Duration::from_secs(60));
        assert_eq!(scheduler.pending(), 1);

        settle().await;

        assert!(path.exists(), "short job should have been replaced");
        scheduler.shutdown();
    }

    #[tokio::test]
    async fn shutdown_cancels_everything() {
        let dir = TempDir::new().unwrap();
        let first = touch(&dir, "a.docx");
        let second = touch(&dir, "b.docx");
        let scheduler = scheduler();

        scheduler.schedule(first.clone(), Duration::from_millis(20));
        scheduler.schedule(second.clone(), Duration::from_millis(20));
        scheduler.shutdown();

        settle().await;

        assert_eq!(scheduler.pending(), 0);
        assert!(first.exists());
        assert!(second.exists());
    }

    #[tokio::test]
    async fn receipt_reports_due_time() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler();
        let before = chrono::Utc::now();

        let receipt = scheduler.schedule(dir.path().join("x.docx"), Duration::from_secs(300));

        assert!(receipt.due_at >= before + chrono::Duration::seconds(300));
        scheduler.shutdown();
    }
}
