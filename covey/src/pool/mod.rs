//! # Worker Pool
//!
//! A fixed set of concurrent workers consuming from one shared intake
//! channel and emitting results into one output channel. Pure
//! fan-out/fan-in: jobs are independent, so distribution needs no
//! coordination beyond channel access.
//!
//! ## Guarantees
//!
//! - Every submitted job yields exactly one result, executed at most once.
//! - Results arrive in completion order; submission order is not
//!   preserved.
//! - A failing or panicking job becomes a failure outcome, never a pool
//!   failure.
//!
//! ## Shutdown
//!
//! `close` severs the intake; queued and in-flight jobs drain, workers
//! exit, and the result stream terminates once the last result is
//! consumed. `close` itself never waits for the drain.

mod worker;

use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use covey_api::errors::PoolError;
use covey_api::executor::JobExecutor;
use covey_api::job::{Job, JobId, JobResult};
use covey_api::types::PoolResult;

use crate::config::PoolConfig;
use crate::log_job;

use worker::Worker;

/// # Worker Pool
///
/// Distributes independent jobs across a fixed number of workers.
///
/// ## Key Responsibilities
/// - Validating configuration before any worker launches
/// - Fan-out of submitted jobs over the shared intake channel
/// - Fan-in of exactly one result per job into the result stream
/// - Idempotent close that lets queued work drain
///
/// ## Usage
///
/// Must be started from within a Tokio runtime; workers run as detached
/// tasks that exit once the intake is closed and drained.
pub struct WorkerPool<E: JobExecutor> {
    /// Instance name used in logs
    name: String,

    /// Sender side of the intake; taken (dropped) on close
    intake: Mutex<Option<flume::Sender<Job<E::Payload>>>>,

    /// Receiver side of the output channel; cloned into result streams
    results: flume::Receiver<JobResult<E::Output>>,

    /// Set once `close` has run
    closed: AtomicBool,

    /// Pool-wide counters shared with the workers
    metrics: Arc<PoolMetrics>,

    /// Handles of the worker tasks
    worker_handles: Vec<JoinHandle<()>>,
}

impl<E: JobExecutor> fmt::Debug for WorkerPool<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("name", &self.name)
            .field("workers", &self.worker_handles.len())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

impl<E: JobExecutor> WorkerPool<E> {
    /// Launches `config.workers` workers sharing `executor`.
    ///
    /// # Returns
    /// * `Ok(pool)` - Workers are running and accepting jobs
    /// * `Err(PoolError::InvalidConfiguration)` - Rejected configuration;
    ///   nothing was launched
    pub fn start(config: PoolConfig, executor: E) -> PoolResult<Self> {
        config.validate()?;

        let (intake_tx, intake_rx) = match config.queue_capacity {
            Some(capacity) => flume::bounded(capacity),
            None => flume::unbounded(),
        };
        let (results_tx, results_rx) = flume::unbounded();
        let metrics = Arc::new(PoolMetrics::default());
        let executor = Arc::new(executor);

        let mut worker_handles = Vec::with_capacity(config.workers);
        for id in 0..config.workers {
            let worker = Worker::new(
                id,
                config.name.clone(),
                intake_rx.clone(),
                results_tx.clone(),
                Arc::clone(&executor),
                Arc::clone(&metrics),
            );
            worker_handles.push(worker.spawn());
        }
        // From here on the workers hold the only intake receivers and
        // result senders; their exit is what terminates the result stream.
        drop(intake_rx);
        drop(results_tx);

        info!(
            "Worker pool {} started with {} workers",
            config.name, config.workers
        );
        Ok(Self {
            name: config.name,
            intake: Mutex::new(Some(intake_tx)),
            results: results_rx,
            closed: AtomicBool::new(false),
            metrics,
            worker_handles,
        })
    }

    /// Wraps `payload` into a job, enqueues it, and returns its id.
    ///
    /// Waits if the intake is bounded and currently full. Fails with
    /// [`PoolError::Closed`] once the pool has been closed.
    pub async fn submit(&self, payload: E::Payload) -> PoolResult<JobId> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(PoolError::Closed);
        }
        let sender = { self.intake.lock().await.as_ref().cloned() };
        let sender = match sender {
            Some(sender) => sender,
            None => return Err(PoolError::Closed),
        };

        let job = Job::new(payload);
        let id = job.id;
        sender.send_async(job).await.map_err(|_| PoolError::Closed)?;
        self.metrics.record_submitted();
        log_job!(id, "submitted");
        Ok(id)
    }

    /// Signals that no further jobs will be submitted. Idempotent.
    ///
    /// Dropping the last external intake sender lets the workers drain
    /// everything still queued and then exit; `close` does not wait for
    /// that drain. Drain completion is observable as the result stream
    /// terminating.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let sender = self.intake.lock().await.take();
        drop(sender);
        info!("Worker pool {} closed", self.name);
    }

    /// Opens a consumer over the pool's result channel.
    ///
    /// The sequence is lazy and finite: it yields one result per submitted
    /// job and ends once the pool is closed and fully drained. Streams
    /// returned by separate calls compete for results; each result is
    /// delivered to exactly one consumer.
    pub fn results(&self) -> JobResultStream<E::Output> {
        JobResultStream::new(self.results.clone())
    }

    /// Instance name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of workers this pool was started with.
    pub fn worker_count(&self) -> usize {
        self.worker_handles.len()
    }

    /// Number of worker tasks that have not yet exited.
    pub fn active_workers(&self) -> usize {
        self.worker_handles
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Snapshot of the pool-wide counters.
    pub fn metrics(&self) -> PoolMetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Lazy, finite sequence of job results in completion order.
///
/// Obtained from [`WorkerPool::results`]. Implements [`Stream`]; the
/// inherent [`recv`](JobResultStream::recv) method covers plain loops.
pub struct JobResultStream<R: 'static> {
    inner: flume::r#async::RecvStream<'static, JobResult<R>>,
}

impl<R: 'static> JobResultStream<R> {
    fn new(receiver: flume::Receiver<JobResult<R>>) -> Self {
        Self {
            inner: receiver.into_stream(),
        }
    }

    /// Receives the next result, or `None` once the pool has closed and
    /// every result has been delivered.
    pub async fn recv(&mut self) -> Option<JobResult<R>> {
        self.inner.next().await
    }
}

impl<R: 'static> Stream for JobResultStream<R> {
    type Item = JobResult<R>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Pool-wide counters.
///
/// `active` and `max_active` instrument concurrent executions, which is
/// how the bounded-concurrency guarantee is observed from outside.
#[derive(Debug, Default)]
pub struct PoolMetrics {
    /// Jobs accepted by `submit`
    submitted: AtomicU64,

    /// Jobs that produced a success outcome
    completed: AtomicU64,

    /// Jobs that produced a failure outcome
    failed: AtomicU64,

    /// Jobs currently executing
    active: AtomicUsize,

    /// High-water mark of `active`
    max_active: AtomicUsize,
}

impl PoolMetrics {
    pub(crate) fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Marks one job as executing and returns the current active count.
    pub(crate) fn job_started(&self) -> usize {
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        now_active
    }

    pub(crate) fn job_finished(&self, failed: bool) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        if failed {
            self.failed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.completed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> PoolMetricsSnapshot {
        PoolMetricsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            active: self.active.load(Ordering::SeqCst),
            max_active: self.max_active.load(Ordering::SeqCst),
        }
    }
}

/// Point-in-time view of [`PoolMetrics`].
#[derive(Debug, Clone, Copy)]
pub struct PoolMetricsSnapshot {
    /// Jobs accepted so far
    pub submitted: u64,

    /// Success outcomes so far
    pub completed: u64,

    /// Failure outcomes so far
    pub failed: u64,

    /// Jobs executing right now
    pub active: usize,

    /// Most jobs ever executing at once
    pub max_active: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use covey_api::executor::FnExecutor;

    #[test]
    fn test_metrics_track_active_watermark() {
        let metrics = PoolMetrics::default();

        assert_eq!(metrics.job_started(), 1);
        assert_eq!(metrics.job_started(), 2);
        metrics.job_finished(false);
        assert_eq!(metrics.job_started(), 2);
        metrics.job_finished(true);
        metrics.job_finished(false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.active, 0);
        assert_eq!(snapshot.max_active, 2);
        assert_eq!(snapshot.completed, 2);
        assert_eq!(snapshot.failed, 1);
    }

    #[tokio::test]
    async fn test_submit_after_close_is_rejected() {
        let pool = WorkerPool::start(
            PoolConfig::with_workers(1),
            FnExecutor::new(|job: Job<i32>| Ok(job.payload)),
        )
        .unwrap();

        pool.close().await;
        pool.close().await; // second close is a no-op

        assert!(pool.is_closed());
        assert!(matches!(pool.submit(1).await, Err(PoolError::Closed)));
    }
}
