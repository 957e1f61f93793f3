//! # Concurrency Core Error Types
//!
//! This module defines the error types used throughout the covey
//! concurrency core. The taxonomy is deliberately small: every failure is
//! either a synchronous setup error returned to the caller, or a value
//! travelling through the normal result flow.
//!
//! ## Design Philosophy
//!
//! - Setup errors (`PoolError`, `StateError`) are returned synchronously
//!   from the call that caused them and never poison a running instance.
//! - Per-job failures (`JobError`) are converted to data and delivered as
//!   result outcomes; they must never terminate a worker or the pool.
//! - There is no global unhandled-failure state.
//!
//! ## Usage Example
//!
//! ```rust
//! use covey_api::errors::PoolError;
//!
//! fn report(error: PoolError) {
//!     match error {
//!         PoolError::InvalidConfiguration(msg) => {
//!             println!("refusing to start: {}", msg);
//!         }
//!         PoolError::Closed => {
//!             println!("pool already closed, job not submitted");
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors surfaced by the worker pool itself.
///
/// These cover pool lifecycle only. Failures of individual jobs are never
/// reported here; they arrive as [`JobError`] inside a result outcome.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The pool was started with an unusable configuration.
    ///
    /// Raised only by `start`, before any worker is launched; running
    /// pools are never affected.
    ///
    /// # Parameters
    /// * String - Explanation of the rejected configuration
    #[error("Invalid worker pool configuration: {0}")]
    InvalidConfiguration(String),

    /// A submission was attempted after the pool was closed.
    ///
    /// Recoverable by the caller: the job was not enqueued and no work
    /// was performed.
    #[error("Worker pool is closed")]
    Closed,
}

/// Errors surfaced by the state actor.
#[derive(Error, Debug)]
pub enum StateError {
    /// A request was issued after `stop()`, or the actor tore down while
    /// the request was still waiting for its response.
    ///
    /// Recoverable by the caller. For writes this means the write may or
    /// may not have been applied before teardown; the acknowledgement is
    /// the only visibility guarantee.
    #[error("State actor stopped")]
    Stopped,
}

/// Failure of a single job, captured by the executing worker.
///
/// Converted to a result outcome and delivered through the normal result
/// stream; never escalated to the pool.
#[derive(Error, Debug)]
pub enum JobError {
    /// The executor returned an error for this job.
    #[error("Job execution failed: {0}")]
    Execution(#[from] anyhow::Error),

    /// The executor panicked while processing this job.
    ///
    /// The worker catches the panic and keeps serving subsequent jobs.
    ///
    /// # Parameters
    /// * String - The captured panic message
    #[error("Job panicked: {0}")]
    Panicked(String),
}
