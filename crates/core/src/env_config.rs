//! `QUOTESYNC_*` environment lookups. Bad values warn and fall back.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Reads `var` and parses it, falling back to `default` when unset.
///
/// A value that is set but does not parse is logged at `warn`, never fatal:
/// a typo in one knob should not keep the collection from opening.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, default: T) -> T {
    let Some(raw) = env_string(var) else {
        return default;
    };
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(var, value = %raw, default = %default, "ignoring unparsable setting");
        default
    })
}

/// Reads a whole-seconds setting as a [`Duration`], never below `min_secs`.
pub fn env_secs(var: &str, default_secs: u64, min_secs: u64) -> Duration {
    let secs = env_parse_with_default(var, default_secs);
    if secs < min_secs {
        tracing::warn!(var, secs, min_secs, "setting below minimum, clamping");
    }
    Duration::from_secs(secs.max(min_secs))
}

/// Reads a string setting, treating blank values as unset.
#[must_use]
pub fn env_string(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
