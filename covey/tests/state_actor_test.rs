#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use tokio::time::timeout;

    use covey::{StateActor, StateActorConfig};
    use covey_api::errors::StateError;

    #[tokio::test]
    async fn test_written_value_is_returned_and_missing_key_defaults() {
        let actor: StateActor<i32, i32> = StateActor::start(HashMap::new());

        // A written value comes back exactly as stored
        actor.write(5, 42).await.unwrap();
        assert_eq!(actor.read(5).await.unwrap(), 42);

        // An absent key is not an error; it reads as the default value
        assert_eq!(actor.read(99).await.unwrap(), 0);

        actor.stop();
    }

    #[tokio::test]
    async fn test_acknowledged_write_is_visible_through_any_handle() {
        let actor: StateActor<String, i32> = StateActor::start(HashMap::new());
        let reader = actor.clone();

        actor.write("confirmed".to_string(), 7).await.unwrap();
        assert_eq!(reader.read("confirmed".to_string()).await.unwrap(), 7);

        actor.stop();
    }

    #[tokio::test]
    async fn test_later_write_to_same_key_wins() {
        let actor: StateActor<i32, i32> = StateActor::start(HashMap::new());

        // Two acknowledged writes in sequence; the second must not be lost
        actor.write(1, 10).await.unwrap();
        actor.write(1, 20).await.unwrap();
        assert_eq!(actor.read(1).await.unwrap(), 20);

        actor.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_to_distinct_keys_are_all_applied() {
        let actor: StateActor<u32, u64> = StateActor::start(HashMap::new());

        // Eight writer tasks, 25 keys each, all distinct
        let mut writers = Vec::new();
        for task in 0..8u32 {
            let handle = actor.clone();
            writers.push(tokio::spawn(async move {
                for i in 0..25u32 {
                    let key = task * 25 + i;
                    handle.write(key, u64::from(key) + 1).await.unwrap();
                }
            }));
        }
        for writer in writers {
            writer.await.unwrap();
        }

        // Every write must be visible; none may be lost or torn
        for key in 0..200u32 {
            assert_eq!(actor.read(key).await.unwrap(), u64::from(key) + 1);
        }
        assert_eq!(actor.metrics().writes_applied, 200);

        actor.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reads_observe_monotonic_write_sequence() {
        let actor: StateActor<i32, u64> = StateActor::start(HashMap::new());

        // One writer publishes an increasing counter under a single key
        let writer = {
            let handle = actor.clone();
            tokio::spawn(async move {
                for value in 1..=100u64 {
                    handle.write(0, value).await.unwrap();
                }
            })
        };

        // Concurrent readers must never see the counter move backwards
        let mut readers = Vec::new();
        for _ in 0..4 {
            let handle = actor.clone();
            readers.push(tokio::spawn(async move {
                let mut last_seen = 0u64;
                for _ in 0..50 {
                    let value = handle.read(0).await.unwrap();
                    assert!(
                        value >= last_seen,
                        "counter went backwards: {} after {}",
                        value,
                        last_seen
                    );
                    last_seen = value;
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }

        // With the writer done, a final read sees its last write
        assert_eq!(actor.read(0).await.unwrap(), 100);

        actor.stop();
    }

    #[tokio::test]
    async fn test_stop_rejects_later_requests_and_is_idempotent() {
        let actor: StateActor<i32, i32> = StateActor::start(HashMap::new());
        actor.write(1, 1).await.unwrap();

        // Stop twice; the second call must be a harmless no-op
        actor.stop();
        actor.stop();
        assert!(actor.is_stopped());

        assert!(matches!(actor.read(1).await, Err(StateError::Stopped)));
        assert!(matches!(actor.write(2, 2).await, Err(StateError::Stopped)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_requests_racing_a_stop_resolve_promptly() {
        let actor: StateActor<u32, u32> = StateActor::start(HashMap::new());

        let mut requests = Vec::new();
        for key in 0..100u32 {
            let handle = actor.clone();
            requests.push(tokio::spawn(async move { handle.write(key, key).await }));
        }
        actor.stop();

        // Every outstanding request must resolve quickly: applied before
        // the loop exited, or rejected as stopped. None may hang.
        for request in requests {
            let outcome = timeout(Duration::from_secs(1), request)
                .await
                .expect("request hung after stop")
                .unwrap();
            assert!(matches!(outcome, Ok(()) | Err(StateError::Stopped)));
        }
    }

    /// Value whose `Clone` blocks long enough to hold the serialization
    /// loop inside one read while further requests queue behind it.
    #[derive(Debug, Default, PartialEq)]
    struct SlowClone(u32);

    impl Clone for SlowClone {
        fn clone(&self) -> Self {
            std::thread::sleep(Duration::from_millis(80));
            SlowClone(self.0)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_requests_queued_at_stop_fail_instead_of_hanging() {
        let actor: StateActor<u32, SlowClone> = StateActor::start(HashMap::new());
        actor.write(1, SlowClone(7)).await.unwrap();

        // Occupy the loop: this read stalls inside the value's clone
        let in_flight = {
            let handle = actor.clone();
            tokio::spawn(async move { handle.read(1).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Queue writes behind the stalled read, then stop before the loop
        // can reach them
        let mut queued = Vec::new();
        for key in 2..5u32 {
            let handle = actor.clone();
            queued.push(tokio::spawn(async move { handle.write(key, SlowClone(key)).await }));
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        actor.stop();

        // The request being processed at stop may still complete
        let read = timeout(Duration::from_secs(2), in_flight)
            .await
            .expect("in-flight read hung after stop")
            .unwrap();
        assert!(matches!(read, Ok(SlowClone(7)) | Err(StateError::Stopped)));

        // Requests still queued when the loop exited must fail, not hang
        for write in queued {
            let outcome = timeout(Duration::from_secs(2), write)
                .await
                .expect("queued request hung after stop")
                .unwrap();
            assert!(matches!(outcome, Err(StateError::Stopped)));
        }
    }

    #[tokio::test]
    async fn test_named_configuration_and_served_counters() {
        let config = StateActorConfig {
            name: "inventory".to_string(),
        };
        let actor: StateActor<i32, i32> = StateActor::start_with_config(config, HashMap::new());
        assert_eq!(actor.name(), "inventory");

        for key in 0..5 {
            actor.write(key, key * 10).await.unwrap();
        }
        for key in 0..5 {
            assert_eq!(actor.read(key).await.unwrap(), key * 10);
        }

        let metrics = actor.metrics();
        assert_eq!(metrics.writes_applied, 5);
        assert_eq!(metrics.reads_served, 5);

        actor.stop();
    }
}
