use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use covey::logging;
use covey::{StateActor, StateActorConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_default();

    // One shared map, five hot keys
    let config = StateActorConfig {
        name: "shared-counters".to_string(),
    };
    let actor: StateActor<i32, i32> = StateActor::start_with_config(config, HashMap::new());

    let deadline = Instant::now() + Duration::from_secs(1);

    // Many readers sampling the hot keys
    let mut tasks = Vec::new();
    for reader in 0..100u32 {
        let handle = actor.clone();
        tasks.push(tokio::spawn(async move {
            let mut step = reader;
            while Instant::now() < deadline {
                let key = (step % 5) as i32;
                let _ = handle.read(key).await;
                step += 1;
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }));
    }

    // A few writers rotating over the same keys
    for writer in 0..10u32 {
        let handle = actor.clone();
        tasks.push(tokio::spawn(async move {
            let mut step = writer;
            while Instant::now() < deadline {
                let key = (step % 5) as i32;
                let _ = handle.write(key, step as i32).await;
                step += 1;
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }));
    }

    for task in tasks {
        task.await?;
    }

    // Final picture of the hot keys
    for key in 0..5i32 {
        println!("key {} = {}", key, actor.read(key).await?);
    }

    let metrics = actor.metrics();
    println!(
        "reads_served={} writes_applied={}",
        metrics.reads_served, metrics.writes_applied
    );

    actor.stop();
    Ok(())
}
