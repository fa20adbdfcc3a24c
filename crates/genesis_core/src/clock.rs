//! Wall-clock helpers.
//!
//! All persisted timestamps are UNIX epoch based; latency measurements
//! use `Instant` at the call site instead.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the UNIX epoch.
#[must_use]
pub fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Nanoseconds since the UNIX epoch, saturated to u64.
#[must_use]
pub fn unix_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
