// Covey Concurrency Core Implementation
//
// This crate provides the runtime half of the covey concurrency core: a
// worker pool for independent jobs and a state actor for serialized
// shared state, both built on Tokio tasks and flume channels.

pub mod config;
pub mod logging;
pub mod pool;
pub mod state;

// Re-export commonly used types
pub use config::{PoolConfig, StateActorConfig};
pub use pool::{JobResultStream, PoolMetricsSnapshot, WorkerPool};
pub use state::{StateActor, StateMetricsSnapshot};
pub use covey_api::{
    FnExecutor, Job, JobError, JobExecutor, JobId, JobOutcome, JobResult, PoolError, PoolResult,
    StateError, StateResult,
};
