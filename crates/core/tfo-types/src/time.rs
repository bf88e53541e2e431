//! Canonical rendering of service timestamps.

use chrono::{DateTime, Utc};

/// Render a timestamp the way Terraform state has always stored it.
///
/// The layout is `YYYY-MM-DD HH:MM:SS[.fraction] +0000 UTC`. The fraction
/// keeps nanosecond precision with trailing zeros trimmed, and is left out
/// entirely for whole seconds.
pub fn format_sdk_time(t: &DateTime<Utc>) -> String {
    let base = t.format("%Y-%m-%d %H:%M:%S");
    let nanos = t.timestamp_subsec_nanos() % 1_000_000_000;

    if nanos == 0 {
        format!("{base} +0000 UTC")
    } else {
        let fraction = format!("{nanos:09}");
        format!("{base}.{} +0000 UTC", fraction.trim_end_matches('0'))
    }
}
