//! Date helpers: parsing, day bounds and the work-day rule.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// Hour at which a new work day begins; earlier activity belongs to the previous day.
pub const DEFAULT_WORK_DAY_START_HOUR: u32 = 6;

/// ISO-8601 layout used for persisted session instants.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Local wall-clock "now".
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `YYYY-MM-DD HH:MM[:SS[.fff]]`, with either a space or a `T`.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Storage layout for record timestamps.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn to_iso(dt: &NaiveDateTime) -> String {
    dt.format(ISO_FORMAT).to_string()
}

pub fn date_key(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn start_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 of the given day.
pub fn end_of_day(d: NaiveDate) -> NaiveDateTime {
    start_of_day(d) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

/// Calendar date of the work day `ts` belongs to.
pub fn work_day_of(ts: NaiveDateTime, start_hour: u32) -> NaiveDate {
    let date = ts.date();
    if ts.hour() < start_hour {
        date.checked_sub_days(Days::new(1)).unwrap_or(date)
    } else {
        date
    }
}

/// True when `ts` falls in the after-midnight tail of a work day.
pub fn is_late_night(ts: NaiveDateTime, start_hour: u32) -> bool {
    ts.hour() < start_hour
}
