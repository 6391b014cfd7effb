//! Compact relative-time formatting for timestamps.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Largest unit of the elapsed time since `then`, e.g. "3m", "2h", "5days".
///
/// Future timestamps (clock skew) read as "now".
pub fn fmt_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    let Ok(secs) = u64::try_from(secs) else {
        return "now".into();
    };
    if secs < 60 {
        return "now".into();
    }
    // Drop seconds so the largest unit leads.
    let rounded = Duration::from_secs(secs - secs % 60);
    humantime::format_duration(rounded)
        .to_string()
        .split_whitespace()
        .next()
        .map_or_else(|| "now".into(), str::to_owned)
}

/// Absolute timestamp for detail views: "2024-06-15 10:30 UTC (3h ago)".
pub fn fmt_timestamp(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = fmt_age(then, now);
    let stamp = then.format("%Y-%m-%d %H:%M UTC");
    if age == "now" {
        format!("{stamp} (just now)")
    } else {
        format!("{stamp} ({age} ago)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn ago(delta: TimeDelta) -> String {
        let now = Utc::now();
        fmt_age(now - delta, now)
    }

    #[test]
    fn age_uses_largest_unit() {
        assert_eq!(ago(TimeDelta::seconds(5)), "now");
        assert_eq!(ago(TimeDelta::minutes(3) + TimeDelta::seconds(10)), "3m");
        assert_eq!(ago(TimeDelta::hours(2) + TimeDelta::minutes(5)), "2h");
        assert_eq!(ago(TimeDelta::days(5)), "5days");
    }

    #[test]
    fn future_timestamps_read_as_now() {
        assert_eq!(ago(TimeDelta::minutes(-10)), "now");
    }
}
