//! # Common Type Definitions
//!
//! Shared type aliases used across the covey API. Centralizing them keeps
//! signatures short and makes the error taxonomy visible at a glance.

use crate::errors::{JobError, PoolError, StateError};

/// Result type for worker pool operations.
pub type PoolResult<T> = Result<T, PoolError>;

/// Result type for state actor operations.
pub type StateResult<T> = Result<T, StateError>;

/// Outcome of a single job: the success value produced by the executor,
/// or the captured failure. Job failures are data, not pool failures.
pub type JobOutcome<R> = Result<R, JobError>;
