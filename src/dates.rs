//! Date display rules for cards and the article overlay.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// Timestamps closer than this are treated as the same moment.
pub const SAME_TIME_THRESHOLD_SECS: i64 = 3600;

/// `October 19, 2026, 02:05 PM` in the local time zone.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    format_date_in(timestamp, &Local)
}

pub fn format_date_in<Tz>(timestamp: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(zone)
        .format("%B %-d, %Y, %I:%M %p")
        .to_string()
}

/// Empty string for a missing timestamp.
pub fn format_optional(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map(format_date).unwrap_or_default()
}

/// Both present and no more than an hour apart.
pub fn dates_equal(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            (a - b).num_milliseconds().abs() <= SAME_TIME_THRESHOLD_SECS * 1000
        }
        _ => false,
    }
}

/// Whether an "Updated" line should accompany the published date.
pub fn show_updated(published: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) -> bool {
    updated.is_some() && !dates_equal(updated, published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_updated_hidden_within_an_hour() {
        let published = t0();
        assert!(!show_updated(Some(published), Some(published + Duration::seconds(3000))));
        assert!(!show_updated(Some(published), Some(published + Duration::seconds(3600))));
        assert!(!show_updated(Some(published), Some(published - Duration::seconds(3000))));
    }

    #[test]
    fn test_updated_shown_after_an_hour() {
        let published = t0();
        assert!(show_updated(Some(published), Some(published + Duration::seconds(4000))));
        assert!(show_updated(Some(published), Some(published + Duration::seconds(3601))));
        let just_over = Duration::milliseconds(3_600_500);
        assert!(show_updated(Some(published), Some(published + just_over)));
        assert!(show_updated(Some(published), Some(published - just_over)));
    }

    #[test]
    fn test_missing_timestamps() {
        assert!(!show_updated(Some(t0()), None));
        assert!(show_updated(None, Some(t0())));
        assert!(!dates_equal(None, None));
    }

    #[test]
    fn test_format_date_in_fixed_zone() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_date_in(t0(), &utc), "March 1, 2024, 09:00 AM");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_date_in(t0() + Duration::hours(6), &plus_two),
            "March 1, 2024, 05:00 PM"
        );
    }

    #[test]
    fn test_format_optional_missing() {
        assert_eq!(format_optional(None), "");
        assert!(!format_optional(Some(t0())).is_empty());
    }
}
