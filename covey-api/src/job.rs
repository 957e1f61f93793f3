//! # Job and Result Types
//!
//! This module defines the unit of work accepted by a worker pool and the
//! outcome record produced for it.
//!
//! ## Lifecycle
//!
//! A [`Job`] is created per submission and owned by the submitter until it
//! is handed to the pool; payload ownership then transfers to the worker
//! that executes it. Exactly one [`JobResult`] is produced per job and is
//! consumed exactly once by the collector. Results arrive in completion
//! order, not submission order.

use uuid::Uuid;

use crate::errors::JobError;
use crate::types::JobOutcome;

/// Unique identifier of a submitted job.
///
/// Generated when the payload is wrapped into a [`Job`] and echoed in the
/// corresponding [`JobResult`] so callers can correlate the two.
pub type JobId = Uuid;

/// An opaque unit of work.
///
/// The pool never inspects the payload; it is meaningful only to the
/// caller-supplied executor.
#[derive(Debug)]
pub struct Job<P> {
    /// Identifier echoed in the result produced for this job.
    pub id: JobId,

    /// Caller-supplied payload handed to the executor.
    pub payload: P,
}

impl<P> Job<P> {
    /// Wraps a payload with a freshly generated identifier.
    pub fn new(payload: P) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
        }
    }
}

/// Outcome record produced by a worker from exactly one job.
#[derive(Debug)]
pub struct JobResult<R> {
    /// Identifier of the job this result belongs to.
    pub job_id: JobId,

    /// Success value from the executor, or the captured failure.
    pub outcome: JobOutcome<R>,
}

impl<R> JobResult<R> {
    /// Builds a success result for `job_id`.
    pub fn success(job_id: JobId, value: R) -> Self {
        Self {
            job_id,
            outcome: Ok(value),
        }
    }

    /// Builds a failure result for `job_id`.
    pub fn failure(job_id: JobId, error: JobError) -> Self {
        Self {
            job_id,
            outcome: Err(error),
        }
    }

    /// True if the job produced a success value.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// True if the job failed (executor error or panic).
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }

    /// Consumes the record, yielding the plain outcome.
    pub fn into_outcome(self) -> JobOutcome<R> {
        self.outcome
    }
}
