// Date utility functions
// All grid dates are naive calendar dates: no time of day, no timezone.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Day-of-week classification used for weekend shading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Weekday,
    Saturday,
    Sunday,
}

impl DayKind {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => DayKind::Saturday,
            Weekday::Sun => DayKind::Sunday,
            _ => DayKind::Weekday,
        }
    }

    pub fn is_weekend(&self) -> bool {
        !matches!(self, DayKind::Weekday)
    }
}

/// Format as the API's `YYYY-MM-DD`
pub fn to_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an API `YYYY-MM-DD` string
pub fn parse_ymd(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}

/// Parse a `YYYY-MM` month anchor into the first day of that month
pub fn parse_month_anchor(value: &str) -> Result<NaiveDate, String> {
    let (year, month) = value
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("Invalid month '{}': expected YYYY-MM", value))?;
    if year.len() != 4 || month.len() != 2 {
        return Err(format!("Invalid month '{}': expected YYYY-MM", value));
    }
    let year: i32 = year
        .parse()
        .map_err(|_| format!("Invalid year in '{}'", value))?;
    let month: u32 = month
        .parse()
        .map_err(|_| format!("Invalid month in '{}'", value))?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| format!("Invalid month '{}'", value))
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = add_months(start_of_month(date), 1);
    first_of_next.pred_opt().unwrap_or(date)
}

/// First day of the month `delta` months away from `date`'s month
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

pub fn add_days(date: NaiveDate, delta: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(delta)).unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    end_of_month(date).day()
}

/// "June 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
