//! Countdown arithmetic for daily intake times.
//!
//! A prescription carries a wall-clock `HH:MM` intake time. The dashboard shows
//! a per-prescription countdown to the next occurrence of that time: if it is
//! still ahead today the countdown is `target - now`, otherwise the next
//! occurrence is tomorrow and a full day is added. The ticking itself lives in
//! the dashboard components; everything here is pure so it can be tested
//! against a fixed clock.
//!
//! This is a wall-clock countdown, not a scheduler: after firing, the timer is
//! re-armed to a flat 24 hours, so drift accumulates when the tab is throttled
//! or the machine sleeps. Accepted limitation.

use chrono::{NaiveDateTime, NaiveTime};

/// Re-arm value after a countdown fires.
pub const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Parse an `HH:MM` intake time.
pub fn parse_intake_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Seconds until the next occurrence of `intake`, seen from `now`.
///
/// Returns a value in `(0, 86400]`: at or after today's occurrence the next
/// one is tomorrow's.
pub fn seconds_until_next(intake: NaiveTime, now: NaiveDateTime) -> i64 {
    let target = now.date().and_time(intake);
    let mut diff = (target - now).num_seconds();
    if diff <= 0 {
        diff += SECONDS_PER_DAY;
    }
    diff
}

/// Countdown for a raw `HH:MM` string, or `None` when it does not parse.
pub fn countdown_from(intake_time: &str, now: NaiveDateTime) -> Option<i64> {
    parse_intake_time(intake_time).map(|t| seconds_until_next(t, now))
}

/// Render a second count as `HH:MM:SS`. Negative values clamp to zero.
pub fn format_countdown(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn counts_down_to_a_time_later_today() {
        let intake = parse_intake_time("08:00").unwrap();
        // 06:30:00 -> 1h30m left
        assert_eq!(seconds_until_next(intake, at(6, 30, 0)), 5400);
    }

    #[test]
    fn rolls_over_to_tomorrow_once_the_time_has_passed() {
        let intake = parse_intake_time("08:00").unwrap();
        // 08:00:01 is 1s past: tomorrow minus one second
        assert_eq!(seconds_until_next(intake, at(8, 0, 1)), SECONDS_PER_DAY - 1);
        // exactly at the intake time the next occurrence is tomorrow
        assert_eq!(seconds_until_next(intake, at(8, 0, 0)), SECONDS_PER_DAY);
    }

    #[test]
    fn countdown_is_always_within_one_day() {
        let intake = parse_intake_time("13:37").unwrap();
        for hour in 0..24 {
            let secs = seconds_until_next(intake, at(hour, 15, 42));
            assert!(secs > 0 && secs <= SECONDS_PER_DAY, "got {secs} at hour {hour}");
        }
    }

    #[test]
    fn rejects_malformed_intake_times() {
        assert!(parse_intake_time("").is_none());
        assert!(parse_intake_time("25:00").is_none());
        assert!(parse_intake_time("8h30").is_none());
        assert!(countdown_from("bogus", at(6, 0, 0)).is_none());
    }

    #[test]
    fn accepts_padded_input() {
        assert!(parse_intake_time(" 07:45 ").is_some());
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(59), "00:00:59");
        assert_eq!(format_countdown(3661), "01:01:01");
        assert_eq!(format_countdown(SECONDS_PER_DAY), "24:00:00");
        assert_eq!(format_countdown(-5), "00:00:00");
    }
}
