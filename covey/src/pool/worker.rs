//! # Pool Worker Implementation
//!
//! Each worker pulls jobs from the shared intake channel, applies the
//! executor, and emits exactly one result per job. A worker exits when the
//! intake is closed and drained.
//!
//! ## Error Isolation
//!
//! Executor errors and panics are converted into failure outcomes; a
//! faulty job never terminates the worker.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use covey_api::errors::JobError;
use covey_api::executor::JobExecutor;
use covey_api::job::{Job, JobResult};

use crate::log_job;
use crate::pool::PoolMetrics;

/// One executor loop of a worker pool.
pub(crate) struct Worker<E: JobExecutor> {
    /// Worker index within the pool, used in logs
    id: usize,

    /// Name of the owning pool, used in logs
    pool_name: String,

    /// Shared intake channel; workers compete for the next job
    intake: flume::Receiver<Job<E::Payload>>,

    /// Output channel; dropped on exit so collectors observe the drain
    results: flume::Sender<JobResult<E::Output>>,

    /// Caller-supplied execution capability, shared by all workers
    executor: Arc<E>,

    /// Pool-wide counters
    metrics: Arc<PoolMetrics>,
}

impl<E: JobExecutor> Worker<E> {
    pub(crate) fn new(
        id: usize,
        pool_name: String,
        intake: flume::Receiver<Job<E::Payload>>,
        results: flume::Sender<JobResult<E::Output>>,
        executor: Arc<E>,
        metrics: Arc<PoolMetrics>,
    ) -> Self {
        Self {
            id,
            pool_name,
            intake,
            results,
            executor,
            metrics,
        }
    }

    /// Launches the worker's main loop as a Tokio task.
    pub(crate) fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run_loop())
    }

    /// Main worker loop.
    ///
    /// Runs until the intake channel is closed and drained. The worker's
    /// clone of the result sender is dropped on return, which is what lets
    /// the result stream terminate once all workers are done.
    async fn run_loop(self) {
        debug!("Worker {} of pool {} started", self.id, self.pool_name);

        while let Ok(job) = self.intake.recv_async().await {
            let job_id = job.id;
            let active = self.metrics.job_started();
            log_job!(job_id, "dequeued", worker = self.id, active = active);

            let outcome = match AssertUnwindSafe(self.executor.execute(job))
                .catch_unwind()
                .await
            {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(error)) => Err(JobError::Execution(error)),
                Err(panic) => Err(JobError::Panicked(panic_message(panic.as_ref()))),
            };

            if let Err(error) = &outcome {
                warn!(
                    "Worker {} of pool {} captured failure of job {}: {}",
                    self.id, self.pool_name, job_id, error
                );
            }
            self.metrics.job_finished(outcome.is_err());

            let result = JobResult { job_id, outcome };
            if self.results.send_async(result).await.is_err() {
                // The pool and every result stream are gone; nothing is
                // left to deliver to.
                break;
            }
        }

        debug!("Worker {} of pool {} stopped", self.id, self.pool_name);
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    }
}
