//! # Job Executor Seam
//!
//! The worker pool is generic over a caller-supplied execution capability.
//! This module defines that seam as an async trait plus an adapter for the
//! common case where the work is a plain function.
//!
//! ## Failure Contract
//!
//! An executor reports a failed job by returning an error. Workers convert
//! both returned errors and panics into failure outcomes; neither may take
//! down a worker or the pool.

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::job::Job;

/// Caller-supplied execution capability for a worker pool.
///
/// Implementations must be shareable across workers: the pool holds one
/// executor instance and invokes it from all workers concurrently.
#[async_trait]
pub trait JobExecutor: Send + Sync + 'static {
    /// Payload type carried by each job.
    type Payload: Send + 'static;

    /// Success value produced per job.
    type Output: Send + 'static;

    /// Executes one job to completion.
    ///
    /// # Parameters
    /// * `job` - The job to execute; payload ownership transfers here
    ///
    /// # Returns
    /// The success value, or the error to capture as this job's outcome.
    async fn execute(&self, job: Job<Self::Payload>) -> anyhow::Result<Self::Output>;
}

/// Adapter lifting a plain function into a [`JobExecutor`].
///
/// Useful for simple transformations and tests:
///
/// ```rust
/// use covey_api::executor::FnExecutor;
/// use covey_api::job::Job;
///
/// let executor = FnExecutor::new(|job: Job<i64>| Ok(job.payload * 2));
/// # let _ = executor;
/// ```
pub struct FnExecutor<P, R, F> {
    function: F,
    _payload: PhantomData<fn(P) -> R>,
}

impl<P, R, F> FnExecutor<P, R, F>
where
    P: Send + 'static,
    R: Send + 'static,
    F: Fn(Job<P>) -> anyhow::Result<R> + Send + Sync + 'static,
{
    /// Wraps `function` so the pool can call it as an executor.
    pub fn new(function: F) -> Self {
        Self {
            function,
            _payload: PhantomData,
        }
    }
}

#[async_trait]
impl<P, R, F> JobExecutor for FnExecutor<P, R, F>
where
    P: Send + 'static,
    R: Send + 'static,
    F: Fn(Job<P>) -> anyhow::Result<R> + Send + Sync + 'static,
{
    type Payload = P;
    type Output = R;

    async fn execute(&self, job: Job<P>) -> anyhow::Result<R> {
        (self.function)(job)
    }
}
