use covey_api::errors::PoolError;
use covey_api::types::PoolResult;
use uuid::Uuid;

// --- Worker Pool Configuration ---

/// Configuration for a `WorkerPool`.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Instance name used in logs and spans.
    pub name: String,

    /// The number of concurrent workers. Must be at least 1.
    pub workers: usize,

    /// Capacity of the shared intake queue. `None` means unbounded;
    /// `Some(n)` makes `submit` wait once `n` jobs are queued.
    pub queue_capacity: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: format!("pool-{}", Uuid::new_v4()),
            workers: num_cpus::get(),
            queue_capacity: None,
        }
    }
}

impl PoolConfig {
    /// Convenience constructor for the common case of overriding only the
    /// worker count.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Checks the configuration before any worker is launched.
    pub fn validate(&self) -> PoolResult<()> {
        if self.workers == 0 {
            return Err(PoolError::InvalidConfiguration(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// --- State Actor Configuration ---

/// Configuration for a `StateActor`.
#[derive(Clone, Debug)]
pub struct StateActorConfig {
    /// Instance name used in logs and spans.
    pub name: String,
}

impl Default for StateActorConfig {
    fn default() -> Self {
        Self {
            name: format!("state-{}", Uuid::new_v4()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_config_is_valid() {
        let config = PoolConfig::default();
        assert!(config.workers >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = PoolConfig::with_workers(0);
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_names_are_distinct() {
        assert_ne!(PoolConfig::default().name, PoolConfig::default().name);
        assert_ne!(
            StateActorConfig::default().name,
            StateActorConfig::default().name
        );
    }
}
