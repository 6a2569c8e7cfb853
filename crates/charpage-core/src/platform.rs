//! Platform abstraction for running background work.
//!
//! The runtime never spawns threads itself; it hands jobs to a
//! [`BackgroundExecutor`] so hosts and tests can decide where work runs.

use std::sync::{Arc, Mutex};

/// Job handed to an executor. Results travel back through the UI dispatcher.
pub type BackgroundJob = Box<dyn FnOnce() + Send + 'static>;

/// Runs background jobs on behalf of the runtime.
///
/// Implementations must be safe to use from multiple threads. A job that
/// cannot be scheduled is handed back so the runtime can still run it.
pub trait BackgroundExecutor: Send + Sync {
    fn spawn(&self, job: BackgroundJob) -> Result<(), BackgroundJob>;
}

/// Spawns one named OS thread per job.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadExecutor;

impl BackgroundExecutor for ThreadExecutor {
    fn spawn(&self, job: BackgroundJob) -> Result<(), BackgroundJob> {
        // The thread closure is dropped unrun when spawning fails, leaving the job here.
        let slot = Arc::new(Mutex::new(Some(job)));
        let worker_slot = Arc::clone(&slot);
        let spawned = std::thread::Builder::new()
            .name("charpage-worker".into())
            .spawn(move || {
                let job = take_job(&worker_slot);
                if let Some(job) = job {
                    job();
                }
            });
        match spawned {
            Ok(_) => Ok(()),
            Err(err) => {
                log::error!("failed to spawn background worker: {err}");
                take_job(&slot).map_or(Ok(()), Err)
            }
        }
    }
}

fn take_job(slot: &Mutex<Option<BackgroundJob>>) -> Option<BackgroundJob> {
    slot.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take()
}
