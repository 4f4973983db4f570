//! Runtime configuration for a [`Fleet`](crate::Fleet) instance.
//!
//! Both binaries resolve their flag/env/file chain down to this one
//! struct.

use std::time::Duration;

use url::Url;

/// Resolved connection settings for the fleet backend.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Server root, e.g. `http://tracker.example.net:6062`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl FleetConfig {
    /// Config with the default 30-second timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
