// Timezone-safe handling of the API's `YYYY-MM-DD` dates
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid ISO date: {0:?}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// `DD/MM`, used on chart axes.
    DayMonth,
    /// `DD/MM/YYYY`, used in tooltips, badges and period labels.
    Full,
}

/// Builds a date in the viewer's timezone that shows the same calendar day
/// as `iso`.
///
/// The value is anchored at local midday instead of UTC midnight, so
/// rendering it in any offset between UTC-12 and UTC+14 can never move it to
/// a neighbouring day.
pub fn to_local_date<Tz: TimeZone>(iso: &str, tz: &Tz) -> Result<DateTime<Tz>, DateError> {
    let date = NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
        .map_err(|_| DateError::Invalid(iso.to_string()))?;
    let midday = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());

    tz.from_local_datetime(&midday)
        .earliest()
        .ok_or_else(|| DateError::Invalid(iso.to_string()))
}

pub fn format_display_date<Tz: TimeZone>(date: &DateTime<Tz>, granularity: Granularity) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match granularity {
        Granularity::DayMonth => date.format("%d/%m").to_string(),
        Granularity::Full => date.format("%d/%m/%Y").to_string(),
    }
}

/// Formats an API date for display in the process-local timezone.
pub fn display_iso_date(iso: &str, granularity: Granularity) -> Result<String, DateError> {
    let date = to_local_date(iso, &Local)?;
    Ok(format_display_date(&date, granularity))
}

/// `"01/12/2025 - 20/01/2026"` for a series spanning those dates.
pub fn display_period(start: &str, end: &str) -> Result<String, DateError> {
    Ok(format!(
        "{} - {}",
        display_iso_date(start, Granularity::Full)?,
        display_iso_date(end, Granularity::Full)?
    ))
}
