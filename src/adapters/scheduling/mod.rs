//! Scheduling adapters.
//!
//! - `TokioDeletionScheduler` - Delayed, cancellable file deletion on tokio

mod tokio_deletion_scheduler;

pub use tokio_deletion_scheduler::TokioDeletionScheduler;
