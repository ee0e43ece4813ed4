//! Resource cache configuration types

use crate::constants::DEFAULT_BUILD_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resource cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Upper bound for a single build in seconds, 0 for none
    pub build_timeout_secs: u64,
}

impl CacheConfig {
    /// Build timeout, `None` when disabled
    pub fn build_timeout(&self) -> Option<Duration> {
        (self.build_timeout_secs > 0).then(|| Duration::from_secs(self.build_timeout_secs))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            build_timeout_secs: DEFAULT_BUILD_TIMEOUT_SECS,
        }
    }
}
