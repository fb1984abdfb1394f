use chrono::{DateTime, Local, LocalResult, TimeZone};

/// Literal produced for timestamps that cannot be represented as a date.
pub const INVALID_DATE: &str = "Invalid Date";

/// The two presentation styles the dashboard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Three-letter weekday, e.g. "Mon". The day-group label.
    WeekdayShort,
    /// 12-hour clock with lowercase marker, e.g. "5:30 pm".
    ClockAmPm,
}

/// Format a unix timestamp (seconds) in the machine's local timezone.
///
/// Out-of-range timestamps yield [`INVALID_DATE`] rather than an error;
/// the string flows into rendering like any other label.
pub fn format_unix(secs: i64, style: DateStyle) -> String {
    match Local.timestamp_opt(secs, 0) {
        LocalResult::Single(dt) => format_datetime(&dt, style),
        _ => INVALID_DATE.to_string(),
    }
}

/// Timezone-generic formatting core.
///
/// Any path separator the formatter emits is normalized to a hyphen.
/// Neither style below produces one today; the normalization guards the
/// label contract if a date-bearing style is added.
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>, style: DateStyle) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let formatted = match style {
        DateStyle::WeekdayShort => dt.format("%a").to_string(),
        DateStyle::ClockAmPm => dt.format("%-I:%M %P").to_string(),
    };

    formatted.replace('/', "-")
}
