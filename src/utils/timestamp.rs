//! Request timestamp freshness checks.

use crate::models::ValidationError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Parse a Unix epoch timestamp in seconds
pub fn parse_timestamp(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>()
        .map_err(|_| ValidationError::MalformedTimestamp)
}

/// Whether `timestamp` falls inside `window` around `now`
///
/// The window is centred on `now`: with `diff = (now + window / 2) - timestamp`
/// the timestamp is accepted iff `0 < diff < window`. Both bounds are open.
/// Computed in nanoseconds.
pub fn within_window(timestamp: i64, window: Duration, now: DateTime<Utc>) -> bool {
    const NANOS_PER_SEC: i128 = 1_000_000_000;

    let window_ns = window.as_nanos() as i128;
    let now_ns = now.timestamp() as i128 * NANOS_PER_SEC + now.timestamp_subsec_nanos() as i128;
    let diff = now_ns + window_ns / 2 - timestamp as i128 * NANOS_PER_SEC;

    diff > 0 && diff < window_ns
}

/// Parse `raw` and check it against `window`
///
/// A `None` window accepts any parseable timestamp.
pub fn check_freshness(
    raw: &str,
    window: Option<Duration>,
    now: DateTime<Utc>,
) -> Result<i64, ValidationError> {
    let timestamp = parse_timestamp(raw)?;

    match window {
        Some(window) if !within_window(timestamp, window, now) => {
            Err(ValidationError::StaleOrFutureTimestamp)
        }
        _ => Ok(timestamp),
    }
}
