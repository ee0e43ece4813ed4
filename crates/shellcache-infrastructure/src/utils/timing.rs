//! Build timing
//!
//! Wraps a named operation so its outcome is logged with the elapsed time.

use shellcache_domain::error::Result;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Named operation with a start instant
///
/// ```
/// use shellcache_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start("tenant-a/session-factory");
/// assert_eq!(timer.operation(), "tenant-a/session-factory");
/// assert!(timer.elapsed_ms() < 60_000);
/// ```
#[derive(Debug)]
pub struct TimedOperation {
    operation: String,
    start: Instant,
}

impl TimedOperation {
    /// Start timing `operation`
    pub fn start(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    /// Name given at start
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Elapsed milliseconds, saturating
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Elapsed time since start
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log the outcome of the operation and hand it back
    ///
    /// Success is logged at debug, failure at warn.
    pub fn finish<T>(self, outcome: Result<T>) -> Result<T> {
        match &outcome {
            Ok(_) => debug!(
                operation = %self.operation,
                elapsed_ms = self.elapsed_ms(),
                "Operation completed"
            ),
            Err(e) => warn!(
                operation = %self.operation,
                elapsed_ms = self.elapsed_ms(),
                error = %e,
                "Operation failed"
            ),
        }
        outcome
    }
}
