//! Sync agent configuration.

use std::time::Duration;

/// Default relay base URL
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8989";

/// Largest accepted outbound queue
pub const MAX_QUEUE_CAPACITY: usize = 65_536;

/// Tunables of [`ClientSyncAgent`](crate::agent::ClientSyncAgent)
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Period of the player / chat poll
    pub poll_interval: Duration,
    /// Capacity of the outbound position queue
    pub queue_capacity: usize,
    /// How long `stop` waits for each loop before aborting it
    pub join_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(30),
            queue_capacity: 10,
            join_timeout: Duration::from_secs(2),
        }
    }
}
