use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{GanttError, Result};

/// Display format used in tables and on the chart axis.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", DISPLAY_FORMAT];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date given as `YYYY-MM-DD`, `DD/MM/YYYY`, or a datetime whose
/// time part is dropped.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(GanttError::InvalidDate(s.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Anything that can be normalized to a calendar date: a date value, a
/// datetime, or a parseable string.
pub trait IntoDate {
    fn into_date(self) -> Result<NaiveDate>;
}

impl IntoDate for NaiveDate {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoDate for NaiveDateTime {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self.date())
    }
}

impl IntoDate for &str {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl IntoDate for String {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(&self)
    }
}

impl IntoDate for &String {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}
