//! Timestamp and elapsed-time text used in the action log.

use chrono::{DateTime, Local, LocalResult, NaiveDate, TimeDelta, TimeZone};
use std::fmt;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format an instant as `YYYY-MM-DDTHH:MM:SS` in local time.
pub fn format_timestamp(instant: &DateTime<Local>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Format the date part only, as shown in front of the reference time input.
pub fn format_date_prefix(instant: &DateTime<Local>) -> String {
    instant.format("%Y-%m-%dT").to_string()
}

/// Format a signed duration as `+HH:MM:SS` / `-HH:MM:SS`.
///
/// Sub-second parts are truncated toward zero before the sign is taken, so
/// anything shorter than one second prints as `+00:00:00`.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds();
    let sign = if total >= 0 { '+' } else { '-' };
    let abs = total.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    let seconds = abs % 60;
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
}

/// A wall-clock time of day typed in by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferenceTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ReferenceTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: if hour <= 23 { hour } else { 0 },
            minute: if minute <= 59 { minute } else { 0 },
            second: if second <= 59 { second } else { 0 },
        }
    }

    /// Build from raw field text. Each field that is not a number, or is out
    /// of range, becomes 0.
    pub fn from_fields(hour: &str, minute: &str, second: &str) -> Self {
        Self {
            hour: parse_field(hour, 23),
            minute: parse_field(minute, 59),
            second: parse_field(second, 59),
        }
    }

    /// Combine with a calendar date into a local instant.
    pub fn on_date(&self, date: NaiveDate) -> DateTime<Local> {
        let naive = date
            .and_hms_opt(self.hour, self.minute, self.second)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
        match Local.from_local_datetime(&naive) {
            LocalResult::Single(instant) => instant,
            LocalResult::Ambiguous(earliest, _) => earliest,
            // inside a DST gap: the wall time does not exist, step past it
            LocalResult::None => Local
                .from_local_datetime(&(naive + TimeDelta::hours(1)))
                .earliest()
                .unwrap_or_else(|| Local.from_utc_datetime(&naive)),
        }
    }

    /// Combine with the calendar date of `today`.
    pub fn on_same_day(&self, today: &DateTime<Local>) -> DateTime<Local> {
        self.on_date(today.date_naive())
    }
}

impl fmt::Display for ReferenceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Leading-digit integer parse with a fallback of 0, bounded by `max`.
pub fn parse_field(text: &str, max: u32) -> u32 {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(value) if value <= max => value,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap()
    }

    #[test]
    fn test_format_timestamp_zero_pads() {
        let t = Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_timestamp(&t), "2024-03-05T07:08:09");
        assert_eq!(format_date_prefix(&t), "2024-03-05T");
    }

    #[test]
    fn test_format_elapsed_positive() {
        assert_eq!(format_elapsed(TimeDelta::seconds(65)), "+00:01:05");
        assert_eq!(format_elapsed(TimeDelta::seconds(3 * 3600 + 7)), "+03:00:07");
        assert_eq!(format_elapsed(TimeDelta::zero()), "+00:00:00");
    }

    #[test]
    fn test_format_elapsed_negative_uses_absolute_fields() {
        assert_eq!(format_elapsed(TimeDelta::seconds(-5)), "-00:00:05");
        assert_eq!(format_elapsed(TimeDelta::seconds(-3661)), "-01:01:01");
    }

    #[test]
    fn test_format_elapsed_truncates_sub_second() {
        assert_eq!(format_elapsed(TimeDelta::milliseconds(1999)), "+00:00:01");
        assert_eq!(format_elapsed(TimeDelta::milliseconds(-999)), "+00:00:00");
        assert_eq!(format_elapsed(TimeDelta::milliseconds(-1500)), "-00:00:01");
    }

    #[test]
    fn test_format_elapsed_past_a_day() {
        assert_eq!(format_elapsed(TimeDelta::hours(25)), "+25:00:00");
        assert_eq!(format_elapsed(TimeDelta::hours(-100)), "-100:00:00");
    }

    #[test]
    fn test_parse_field_defaults() {
        assert_eq!(parse_field("12", 23), 12);
        assert_eq!(parse_field("07", 59), 7);
        assert_eq!(parse_field(" 5", 59), 5);
        assert_eq!(parse_field("12abc", 23), 12);
        assert_eq!(parse_field("abc", 23), 0);
        assert_eq!(parse_field("", 23), 0);
        assert_eq!(parse_field("-3", 59), 0);
        assert_eq!(parse_field("24", 23), 0);
        assert_eq!(parse_field("60", 59), 0);
        assert_eq!(parse_field("99999999999999", 59), 0);
    }

    #[test]
    fn test_reference_time_from_fields() {
        let t = ReferenceTime::from_fields("21", "x", "75");
        assert_eq!(t, ReferenceTime::new(21, 0, 0));
        assert_eq!(t.to_string(), "21:00:00");
    }

    #[test]
    fn test_reference_time_new_clamps_to_zero() {
        assert_eq!(ReferenceTime::new(30, 61, 5), ReferenceTime::new(0, 0, 5));
    }

    #[test]
    fn test_reference_time_on_same_day() {
        let now = at(22, 30, 0);
        let origin = ReferenceTime::new(21, 0, 0).on_same_day(&now);
        assert_eq!(origin.date_naive(), now.date_naive());
        assert_eq!(
            (origin.hour(), origin.minute(), origin.second()),
            (21, 0, 0)
        );
        assert_eq!(origin.nanosecond(), 0);
    }
}
