//! src/coordinator/config.rs
//!
//! Configuration for WorkerCoordinator behaviour.
//!
//! Example:
//! ```ignore
//! let config = CoordinatorConfig::builder()
//!     .worker_name("fetcher")
//!     .stop_timeout(Duration::from_secs(2))
//!     .build();
//! ```

use std::time::Duration;

/// Configuration for WorkerCoordinator
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Thread-name prefix for spawned workers; worker threads are named
    /// `"{worker_name}-{worker_id}"`. Default: "parallel-worker".
    pub worker_name: String,
    /// Maximum time `stop()` waits for all workers to terminate.
    /// If exceeded, `stop()` reports failure and leaves the affected
    /// threads detached. Default: 5s.
    pub stop_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            worker_name: "parallel-worker".to_string(),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

impl CoordinatorConfig {
    pub fn builder() -> CoordinatorConfigBuilder {
        CoordinatorConfigBuilder::default()
    }
}

/// Builder for CoordinatorConfig with method chaining
#[derive(Default)]
pub struct CoordinatorConfigBuilder {
    config: CoordinatorConfig,
}

impl CoordinatorConfigBuilder {
    /// Set the thread-name prefix for worker threads.
    pub fn worker_name(mut self, name: impl Into<String>) -> Self {
        self.config.worker_name = name.into();
        self
    }

    /// Set the maximum time `stop()` waits for workers to terminate.
    ///
    /// - Too low: `stop()` may report failure during legitimate long iterations
    /// - Too high: delays detection of stuck workers
    pub fn stop_timeout(mut self, timeout: Duration) -> Self {
        self.config.stop_timeout = timeout;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> CoordinatorConfig {
        self.config
    }
}
