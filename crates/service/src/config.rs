//! Sync settings resolved from the environment.

use std::time::Duration;

use quotesync_core::constants::{
    DEFAULT_FETCH_LIMIT, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_INITIAL_SYNC_DELAY_SECS,
    DEFAULT_PUSH_USER_ID, DEFAULT_REMOTE_URL, DEFAULT_SYNC_INTERVAL_SECS, MIN_PERIOD_SECS,
};
use quotesync_core::{env_parse_with_default, env_secs, env_string};

/// Everything the remote client and scheduler need to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub remote_url: String,
    pub fetch_limit: usize,
    pub sync_interval: Duration,
    pub initial_delay: Duration,
    pub http_timeout: Duration,
    pub push_user_id: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_owned(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            sync_interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
            initial_delay: Duration::from_secs(DEFAULT_INITIAL_SYNC_DELAY_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            push_user_id: DEFAULT_PUSH_USER_ID,
        }
    }
}

impl SyncConfig {
    /// Reads `QUOTESYNC_*` variables, falling back to defaults.
    ///
    /// Intervals and timeouts are clamped to at least one second.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            remote_url: env_string("QUOTESYNC_REMOTE_URL")
                .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_owned()),
            fetch_limit: env_parse_with_default("QUOTESYNC_FETCH_LIMIT", DEFAULT_FETCH_LIMIT),
            sync_interval: env_secs(
                "QUOTESYNC_SYNC_INTERVAL_SECS",
                DEFAULT_SYNC_INTERVAL_SECS,
                MIN_PERIOD_SECS,
            ),
            initial_delay: env_secs(
                "QUOTESYNC_INITIAL_DELAY_SECS",
                DEFAULT_INITIAL_SYNC_DELAY_SECS,
                0,
            ),
            http_timeout: env_secs(
                "QUOTESYNC_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
                MIN_PERIOD_SECS,
            ),
            push_user_id: env_parse_with_default("QUOTESYNC_USER_ID", DEFAULT_PUSH_USER_ID),
        }
    }
}
