use chrono::{NaiveTime, Timelike};
use crate::constants::SECONDS_PER_DAY;

/// Parse a time string in HH:MM:SS format
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a valid time in HH:MM:SS format.
pub fn parse_time_hms(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
}

/// Parse `HH:MM:SS` into seconds since midnight.
///
/// Wall-clock times go through chrono; anything chrono rejects is retried as
/// plain `h:m:s` fields so that service running past midnight (`25:10:00`)
/// still parses. Returns `None` for anything else.
#[must_use]
pub fn try_parse_clock(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(time) = parse_time_hms(s) {
        return Some(i64::from(time.num_seconds_from_midnight()));
    }

    let mut fields = s.split(':');
    let (Some(h), Some(m), Some(sec), None) = (fields.next(), fields.next(), fields.next(), fields.next()) else {
        return None;
    };
    let hours = parse_field(h)?;
    let minutes = parse_field(m)?;
    let seconds = parse_field(sec)?;
    if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }
    hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)
}

/// Unsigned decimal field; signs and whitespace are rejected
fn parse_field(field: &str) -> Option<i64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse `HH:MM:SS` into seconds since midnight, returning 0 for malformed input.
///
/// 0 doubles as "unparseable"; use [`try_parse_clock`] where midnight is a
/// legitimate value.
#[must_use]
pub fn parse_clock(s: &str) -> i64 {
    try_parse_clock(s).unwrap_or(0)
}

/// Format seconds since midnight as zero-padded `HH:MM:SS`
///
/// Values past 23:59:59 keep counting hours; negative values get a leading `-`.
#[must_use]
pub fn format_clock(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{sign}{hours:02}:{minutes:02}:{secs:02}")
}

/// Shift a clock string by `delta` seconds. No clamping is applied.
#[must_use]
pub fn add_seconds(time: &str, delta: i64) -> String {
    format_clock(parse_clock(time) + delta)
}

/// Signed difference `to - from` in seconds
#[must_use]
pub fn seconds_between(from: &str, to: &str) -> i64 {
    parse_clock(to) - parse_clock(from)
}

/// Inclusive range containment on seconds since midnight
#[must_use]
pub const fn is_within(t: i64, start: i64, end: i64) -> bool {
    start <= t && t <= end
}

/// Convert seconds since midnight to a `NaiveTime`, wrapping past midnight
#[must_use]
pub fn to_naive_time(seconds: i64) -> Option<NaiveTime> {
    let wrapped = u32::try_from(seconds.rem_euclid(SECONDS_PER_DAY)).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(wrapped, 0)
}

/// Short `HH:MM` label for a clock value, as drawn next to the scrubber
#[must_use]
pub fn short_label(seconds: i64) -> String {
    to_naive_time(seconds).map_or_else(|| format_clock(seconds), |t| t.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_hms_valid() {
        let time = parse_time_hms("08:30:45").expect("should parse");
        assert_eq!(time.hour(), 8);
        assert_eq!(time.minute(), 30);
        assert_eq!(time.second(), 45);
    }

    #[test]
    fn test_parse_time_hms_invalid_hour() {
        assert!(parse_time_hms("25:00:00").is_err());
    }

    #[test]
    fn test_parse_clock_basic() {
        assert_eq!(parse_clock("00:00:00"), 0);
        assert_eq!(parse_clock("07:02:00"), 7 * 3600 + 120);
        assert_eq!(parse_clock("23:59:59"), 86_399);
    }

    #[test]
    fn test_parse_clock_past_midnight() {
        assert_eq!(try_parse_clock("25:10:00"), Some(25 * 3600 + 600));
    }

    #[test]
    fn test_parse_clock_malformed_is_zero() {
        assert_eq!(parse_clock(""), 0);
        assert_eq!(parse_clock("08:30"), 0);
        assert_eq!(parse_clock("WITHDRAWN"), 0);
        assert_eq!(parse_clock("12:60:00"), 0);
        assert_eq!(parse_clock("1:2:3:4"), 0);
        assert_eq!(try_parse_clock("ab:cd:ef"), None);
    }

    #[test]
    fn test_parse_clock_rejects_signs() {
        assert_eq!(try_parse_clock("-00:00:30"), None);
        assert_eq!(try_parse_clock("-01:00:00"), None);
        assert_eq!(try_parse_clock("+01:00:00"), None);
        assert_eq!(try_parse_clock("25:-1:00"), None);
        assert_eq!(try_parse_clock("25:00:+5"), None);
    }

    #[test]
    fn test_parse_clock_huge_hours_is_none() {
        assert_eq!(try_parse_clock("99999999999999999:00:00"), None);
        assert_eq!(try_parse_clock("99999999999999999999999:00:00"), None);
        assert_eq!(parse_clock("99999999999999999:00:00"), 0);
    }

    #[test]
    fn test_format_clock_padding() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(3661), "01:01:01");
        assert_eq!(format_clock(86_399), "23:59:59");
        assert_eq!(format_clock(-10), "-00:00:10");
    }

    #[test]
    fn test_round_trip_whole_day() {
        for t in 0..SECONDS_PER_DAY {
            assert_eq!(parse_clock(&format_clock(t)), t, "round trip failed at {t}");
        }
    }

    #[test]
    fn test_add_seconds_does_not_clamp() {
        assert_eq!(add_seconds("07:00:00", 90), "07:01:30");
        assert_eq!(add_seconds("00:00:30", -60), "-00:00:30");
        assert_eq!(add_seconds("23:59:50", 20), "24:00:10");
    }

    #[test]
    fn test_seconds_between_and_within() {
        assert_eq!(seconds_between("07:00:00", "07:05:00"), 300);
        assert_eq!(seconds_between("07:05:00", "07:00:00"), -300);
        assert!(is_within(10, 10, 20));
        assert!(is_within(20, 10, 20));
        assert!(!is_within(21, 10, 20));
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label(parse_clock("07:05:30")), "07:05");
        assert_eq!(short_label(parse_clock("25:00:00")), "01:00");
    }
}
