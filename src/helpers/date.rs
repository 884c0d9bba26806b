//! Date helper functions

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// Format a date for display ("March 5, 2021"), in its own offset
pub fn display_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Parse a date string in various formats.
///
/// Strings without an offset are read as UTC so the displayed calendar day
/// never depends on the build machine's timezone.
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    let utc = FixedOffset::east_opt(0)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return utc.from_local_datetime(&dt).single();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return utc.from_local_datetime(&dt).single();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_drops_day_padding() {
        let date = parse_date_string("2021-03-05").unwrap();
        assert_eq!(display_date(&date), "March 5, 2021");
    }

    #[test]
    fn test_display_date_keeps_offset_day() {
        // Late evening in Seoul is still the 5th, even though UTC is earlier
        let date = parse_date_string("2021-03-05T23:30:00+09:00").unwrap();
        assert_eq!(display_date(&date), "March 5, 2021");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date_string("2021/03/05").is_some());
        assert!(parse_date_string("2021-03-05 08:00").is_some());
        assert!(parse_date_string("2021-03-05T08:00:00Z").is_some());
        assert!(parse_date_string("yesterday").is_none());
    }
}
