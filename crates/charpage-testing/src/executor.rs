use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use charpage_core::platform::{BackgroundExecutor, BackgroundJob};

/// Executor that parks background jobs until the test runs them.
///
/// Jobs run on the calling thread, so results reach the runtime in exactly
/// the order the test chooses.
#[derive(Clone, Default)]
pub struct ManualExecutor {
    jobs: Arc<Mutex<VecDeque<BackgroundJob>>>,
}

impl ManualExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    fn jobs(&self) -> MutexGuard<'_, VecDeque<BackgroundJob>> {
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pending(&self) -> usize {
        self.jobs().len()
    }

    /// Run the oldest parked job. Returns `false` when none are parked.
    pub fn run_next(&self) -> bool {
        let job = self.jobs().pop_front();
        match job {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run the most recently parked job.
    pub fn run_latest(&self) -> bool {
        let job = self.jobs().pop_back();
        match job {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run every parked job, including ones parked while running.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }
}

impl BackgroundExecutor for ManualExecutor {
    fn spawn(&self, job: BackgroundJob) -> Result<(), BackgroundJob> {
        self.jobs().push_back(job);
        Ok(())
    }
}
