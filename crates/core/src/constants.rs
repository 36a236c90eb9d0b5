//! Shared constants for quotesync.
//!
//! Keys and defaults used by more than one crate live here.

/// Durable key holding the JSON array of quote records.
pub const QUOTES_KEY: &str = "quotes";

/// Session-scoped key holding the index of the last displayed quote.
pub const LAST_VIEWED_KEY: &str = "lastViewedQuoteIndex";

/// Prefix applied to ids of records that came from the remote source.
pub const REMOTE_ID_PREFIX: &str = "srv_";

/// Category assigned to remote items that carry no usable title.
pub const DEFAULT_REMOTE_CATEGORY: &str = "General";

/// Pseudo-category meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Default remote collection endpoint.
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Number of remote items requested per fetch.
pub const DEFAULT_FETCH_LIMIT: usize = 10;

/// Seconds between periodic sync attempts.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;

/// Seconds to wait before the first sync after startup.
pub const DEFAULT_INITIAL_SYNC_DELAY_SECS: u64 = 2;

/// Floor for the sync interval and request timeout, in seconds.
pub const MIN_PERIOD_SECS: u64 = 1;

/// Remote request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// `userId` sent with pushed records.
pub const DEFAULT_PUSH_USER_ID: u64 = 1;

/// Records written on the very first run so the collection is never empty.
pub const SEED_QUOTES: [(&str, &str); 3] = [
    ("The best way to get started is to quit talking and begin doing.", "Motivation"),
    ("Life is what happens when you’re busy making other plans.", "Life"),
    ("Do not let what you cannot do interfere with what you can do.", "Inspiration"),
];
