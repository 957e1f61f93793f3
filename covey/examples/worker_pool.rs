use std::time::Duration;

use async_trait::async_trait;

use covey::logging;
use covey::{PoolConfig, WorkerPool};
use covey_api::executor::JobExecutor;
use covey_api::job::Job;

// Executor that doubles numbers, slowly enough to watch the pool work
struct Doubler;

#[async_trait]
impl JobExecutor for Doubler {
    type Payload = u64;
    type Output = u64;

    async fn execute(&self, job: Job<u64>) -> anyhow::Result<u64> {
        tokio::time::sleep(Duration::from_millis(250)).await;
        Ok(job.payload * 2)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log at debug level so the per-job flow is visible
    logging::init_development();

    // Start three workers over a bounded intake queue
    let config = PoolConfig {
        name: "doubling-pool".to_string(),
        workers: 3,
        queue_capacity: Some(5),
    };
    let pool = WorkerPool::start(config, Doubler)?;

    // Submit payloads
    for n in 1..=5u64 {
        let id = pool.submit(n).await?;
        println!("submitted payload {} as job {}", n, id);
    }

    // Close the intake; everything queued still runs to completion
    pool.close().await;

    // Drain results in completion order
    let mut results = pool.results();
    while let Some(result) = results.recv().await {
        match result.outcome {
            Ok(value) => println!("job {} finished with {}", result.job_id, value),
            Err(error) => println!("job {} failed: {}", result.job_id, error),
        }
    }

    // Report the pool counters
    let metrics = pool.metrics();
    println!(
        "submitted={} completed={} failed={} peak_concurrency={}",
        metrics.submitted, metrics.completed, metrics.failed, metrics.max_active
    );

    Ok(())
}
