//! Display formatting for run timestamps and links

use chrono::{DateTime, Utc};

/// Absolute time truncated to seconds, e.g. `2021-06-04 08:34:42 +0000 UTC`
pub fn format_absolute(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S +0000 UTC").to_string()
}

/// Time relative to `now`, e.g. `5 minutes ago` or `in 2 hours`
///
/// Uses the largest whole unit; partial units are dropped.
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const UNITS: [(i64, &str); 6] = [
        (365 * 24 * 3600, "year"),
        (30 * 24 * 3600, "month"),
        (24 * 3600, "day"),
        (3600, "hour"),
        (60, "minute"),
        (1, "second"),
    ];

    let delta = now.signed_duration_since(ts).num_seconds();
    let magnitude = delta.abs();

    let (count, unit) = UNITS
        .iter()
        .find(|(secs, _)| magnitude >= *secs)
        .map(|(secs, unit)| (magnitude / secs, *unit))
        .unwrap_or((0, "second"));

    let plural = if count == 1 { "" } else { "s" };
    if delta >= 0 {
        format!("{} {}{} ago", count, unit, plural)
    } else {
        format!("in {} {}{}", count, unit, plural)
    }
}

/// Run duration in whole seconds, ties rounded to even (`"3 sec"`)
pub fn format_latency(started: DateTime<Utc>, finished: DateTime<Utc>) -> String {
    let millis = finished.signed_duration_since(started).num_milliseconds();
    let secs = (millis as f64 / 1000.0).round_ties_even();
    format!("{:.0} sec", secs)
}

/// Link to the diff of `commit`
///
/// `diff_url_format` is a printf-style template with a single `%s`. Returns
/// `None` when either part is empty or the template has no placeholder.
pub fn commit_link(diff_url_format: &str, commit: &str) -> Option<String> {
    if commit.is_empty() || diff_url_format.is_empty() || !diff_url_format.contains("%s") {
        return None;
    }
    Some(diff_url_format.replacen("%s", commit, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, nanos).unwrap()
    }

    #[test]
    fn test_format_absolute() {
        assert_eq!(format_absolute(at(0, 0)), "1970-01-01 00:00:00 +0000 UTC");
        assert_eq!(
            format_absolute(at(2, 537_554_234)),
            "1970-01-01 00:00:02 +0000 UTC"
        );
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(at(0, 0), at(0, 0)), "0 sec");
        assert_eq!(format_latency(at(0, 0), at(5, 0)), "5 sec");
        assert_eq!(format_latency(at(0, 0), at(2, 500_000_000)), "2 sec");
        assert_eq!(format_latency(at(0, 0), at(2, 137_454_234)), "2 sec");
        assert_eq!(format_latency(at(0, 0), at(2, 537_554_234)), "3 sec");
    }

    #[test]
    fn test_format_relative() {
        let now = at(10_000_000, 0);
        assert_eq!(format_relative(at(10_000_000, 0), now), "0 seconds ago");
        assert_eq!(format_relative(at(10_000_000 - 1, 0), now), "1 second ago");
        assert_eq!(format_relative(at(10_000_000 - 90, 0), now), "1 minute ago");
        assert_eq!(
            format_relative(at(10_000_000 - 5 * 3600, 0), now),
            "5 hours ago"
        );
        assert_eq!(
            format_relative(at(10_000_000 + 2 * 86_400, 0), now),
            "in 2 days"
        );
    }

    #[test]
    fn test_commit_link() {
        assert_eq!(
            commit_link("https://github.com/org/repo/commit/%s", "5f3fd1cc").as_deref(),
            Some("https://github.com/org/repo/commit/5f3fd1cc")
        );
        assert_eq!(commit_link("https://github.com/org/repo/commit/%s", ""), None);
        assert_eq!(commit_link("", "5f3fd1cc"), None);
        assert_eq!(commit_link("https://github.com/org/repo", "5f3fd1cc"), None);
    }
}
