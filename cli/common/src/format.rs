//! Formatting utilities for CLI summaries.

use chrono::Duration;

/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use tfo_cli_common::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format a duration as seconds with millisecond precision.
///
/// ```
/// use chrono::Duration;
/// use tfo_cli_common::format_duration;
///
/// assert_eq!(format_duration(Duration::milliseconds(1500)), "1.500s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    format!("{:.3}s", duration.num_milliseconds() as f64 / 1000.0)
}
