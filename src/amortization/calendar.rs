use chrono::{Months, NaiveDate};

/// advance a date by whole calendar months
///
/// The day of month is kept where the target month has it; otherwise the
/// result is the last day of the target month (Jan 31 + 1 month = Feb 28/29).
/// Returns `None` only when the result falls outside chrono's date range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// parse an ISO `YYYY-MM-DD` date as entered on a form
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// render a date as ISO `YYYY-MM-DD`
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
