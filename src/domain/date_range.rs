//! Calendar helpers for transaction timestamps.
//!
//! Timestamps are stored in UTC; calendar-day questions are answered in the
//! local time zone, which is how dates are entered and displayed.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::AppError;

/// Inclusive range of local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> Result<Self, AppError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the timestamp falls on a local day within the range.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.with_timezone(&Local).date_naive();
        self.start <= day && day <= self.end
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(value.trim().to_string()))
}

/// Start of the given local calendar day, as UTC.
pub fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date, |naive| Local.from_local_datetime(naive).map(|at| at.with_timezone(&Utc)))
}

/// First instant of `date` that `resolve` maps to a real time. A DST gap over
/// midnight moves the start to the first whole hour after the gap.
fn start_of_day<F>(date: NaiveDate, resolve: F) -> DateTime<Utc>
where
    F: Fn(&NaiveDateTime) -> LocalResult<DateTime<Utc>>,
{
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|naive| resolve(&naive).earliest())
        .unwrap_or_else(|| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// `yyyy-mm-dd HH:MM:SS` in local time.
pub fn format_local(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
