//! # Covey Concurrency Core API
//!
//! Covey is a small concurrency core built on two composable patterns: a
//! fixed-size worker pool for independent units of work, and a stateful
//! serialization actor that owns shared state behind a message-passing
//! boundary. This crate defines the contracts shared by the runtime and
//! its callers.
//!
//! ## Design Principles
//!
//! - **Message passing over locks**: shared state is owned by exactly one
//!   loop; callers interact through requests, never through a mutex.
//! - **Failures as data**: a failed or panicking job becomes a failure
//!   outcome in the result stream, never a pool failure.
//! - **Type safety**: pools and actors are generic over payloads, outputs,
//!   keys and values; no type erasure at the API boundary.
//!
//! ## Core Components
//!
//! - [`job`]: the unit of work ([`Job`]) and its outcome ([`JobResult`])
//! - [`executor`]: the caller-supplied execution seam ([`JobExecutor`])
//! - [`errors`]: the error taxonomy
//! - [`types`]: shared result aliases
//!
//! ## Usage Example
//!
//! ```rust
//! use covey_api::executor::{FnExecutor, JobExecutor};
//! use covey_api::job::Job;
//!
//! async fn doubled() -> anyhow::Result<i64> {
//!     let executor = FnExecutor::new(|job: Job<i64>| Ok(job.payload * 2));
//!     executor.execute(Job::new(21)).await
//! }
//! # let _ = doubled;
//! ```

pub mod errors;
pub mod executor;
pub mod job;
pub mod types;

pub use errors::{JobError, PoolError, StateError};
pub use executor::{FnExecutor, JobExecutor};
pub use job::{Job, JobId, JobResult};
pub use types::{JobOutcome, PoolResult, StateResult};
