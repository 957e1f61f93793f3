// Logging System for Covey
//
// This module provides a unified logging interface for the covey
// concurrency core, built on the `tracing` ecosystem.
//
// # Usage Examples
//
// ## Basic Initialization
//
// ```rust
// use covey::logging;
//
// // Initialize with default settings (INFO level, console output)
// logging::init_default();
//
// // Or initialize with custom settings
// let config = logging::LogConfig {
//     level: tracing::Level::DEBUG,
//     json_format: false,
//     ..Default::default()
// };
// logging::init(config);
// ```
//
// ## Environment Presets
//
// ```rust
// use covey::logging;
//
// // Development: DEBUG level, colored output, file/line info
// logging::init_development();
//
// // Production: INFO level, JSON output, no file/line info
// logging::init_production();
//
// // Tests: WARN level, compact output
// logging::init_test();
// ```
//
// ## Using Log Macros
//
// ```rust
// use covey::logging;
//
// logging::init_default();
//
// logging::info!("pool started");
// logging::debug!("job {} dequeued", 7);
// ```

use std::sync::Once;

use tracing::{Level, Subscriber};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Configuration for the covey logging system
///
/// # Examples
///
/// ```rust
/// use covey::logging::LogConfig;
/// use tracing::Level;
///
/// let config = LogConfig {
///     level: Level::DEBUG,
///     json_format: true,
///     show_file_line: false,
///     show_thread_info: true,
///     show_time: true,
///     target_filters: Some("covey=debug,covey::pool=trace".to_string()),
/// };
/// # let _ = config;
/// ```
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to display
    pub level: Level,
    /// Whether to use JSON format for logs
    pub json_format: bool,
    /// Whether to include file and line information
    pub show_file_line: bool,
    /// Whether to include thread name/id
    pub show_thread_info: bool,
    /// Whether to include timestamps
    pub show_time: bool,
    /// Target filter expressions (format: "target=level,target2=level2,...")
    pub target_filters: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            show_file_line: true,
            show_thread_info: true,
            show_time: true,
            target_filters: None,
        }
    }
}

// Initialization guard to ensure we only initialize once
static INIT: Once = Once::new();

/// Initialize the logging system with the given configuration
///
/// Sets up the global tracing subscriber. Safe to call multiple times;
/// only the first call takes effect.
pub fn init(config: LogConfig) {
    INIT.call_once(|| {
        let mut env_filter = EnvFilter::from_default_env().add_directive(config.level.into());

        // Add any target-specific filters if provided
        if let Some(filters) = config.target_filters {
            for filter in filters.split(',') {
                if let Ok(directive) = filter.parse() {
                    env_filter = env_filter.add_directive(directive);
                }
            }
        }

        let fmt_layer = fmt::layer()
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_file(config.show_file_line)
            .with_line_number(config.show_file_line)
            .with_thread_names(config.show_thread_info)
            .with_thread_ids(config.show_thread_info);

        let registry = tracing_subscriber::registry().with(env_filter);

        let subscriber: Box<dyn Subscriber + Send + Sync> = if config.json_format {
            Box::new(registry.with(fmt::layer().json().flatten_event(true)))
        } else {
            Box::new(registry.with(fmt_layer))
        };

        set_global_subscriber(subscriber);
    });
}

// Helper function to set the global subscriber
fn set_global_subscriber<S>(subscriber: S)
where
    S: Subscriber + Send + Sync + 'static,
{
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error setting global tracing subscriber: {}", err);
    }
}

/// Initialize default logging
///
/// INFO level with human-readable console output; a reasonable choice for
/// demos and simple binaries.
pub fn init_default() {
    init(LogConfig::default());
}

/// Initialize logging optimized for development environments
///
/// DEBUG level for all covey modules, TRACE for the pool internals,
/// colorized output with file/line information.
pub fn init_development() {
    let config = LogConfig {
        level: Level::DEBUG,
        json_format: false,
        show_file_line: true,
        show_thread_info: true,
        show_time: true,
        target_filters: Some("covey=debug,covey::pool=trace".to_string()),
    };
    init(config);
}

/// Initialize logging optimized for production environments
///
/// INFO level, JSON formatted output for log aggregators, no file/line
/// information.
pub fn init_production() {
    let config = LogConfig {
        level: Level::INFO,
        json_format: true,
        show_file_line: false,
        show_thread_info: true,
        show_time: true,
        target_filters: None,
    };
    init(config);
}

/// Initialize logging for testing
///
/// Only shows warnings and errors to keep test output clean.
pub fn init_test() {
    let config = LogConfig {
        level: Level::WARN,
        json_format: false,
        show_file_line: true,
        show_thread_info: false,
        show_time: false,
        target_filters: None,
    };
    init(config);
}

/// Create a new span for worker pool operations
///
/// # Examples
///
/// ```rust
/// use covey::pool_span;
///
/// let span = pool_span!("pool-7");
/// let _guard = span.enter();
///
/// // With additional fields
/// let span = pool_span!("pool-7", workers = 3);
/// ```
#[macro_export]
macro_rules! pool_span {
    ($pool_name:expr) => {
        tracing::info_span!("pool", name = $pool_name)
    };
    ($pool_name:expr, $($fields:tt)*) => {
        tracing::info_span!("pool", name = $pool_name, $($fields)*)
    };
}

/// Log job lifecycle events - use for per-job progress
///
/// # Examples
///
/// ```rust
/// use covey::log_job;
///
/// let job_id = uuid::Uuid::new_v4();
/// log_job!(job_id, "submitted");
///
/// // With additional fields
/// log_job!(job_id, "completed", worker = 2);
/// ```
#[macro_export]
macro_rules! log_job {
    ($job_id:expr, $status:expr) => {
        tracing::debug!(job_id = %$job_id, status = $status);
    };
    ($job_id:expr, $status:expr, $($fields:tt)*) => {
        tracing::debug!(job_id = %$job_id, status = $status, $($fields)*);
    };
}

/// Log state actor request events
///
/// # Examples
///
/// ```rust
/// use covey::log_state_op;
///
/// log_state_op!("state-1", "read");
///
/// // With additional fields
/// log_state_op!("state-1", "write", pending = 4);
/// ```
#[macro_export]
macro_rules! log_state_op {
    ($actor:expr, $op:expr) => {
        tracing::debug!(actor = $actor, op = $op);
    };
    ($actor:expr, $op:expr, $($fields:tt)*) => {
        tracing::debug!(actor = $actor, op = $op, $($fields)*);
    };
}

/// Get the current tracing dispatcher
///
/// Useful when spawning threads that need access to the current tracing
/// configuration.
#[inline]
pub fn current_subscriber() -> tracing::Dispatch {
    tracing::dispatcher::get_default(|d| d.clone())
}

// Re-export the most commonly used tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn};
