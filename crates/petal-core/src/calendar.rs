//! Calendar utilities for date-key arithmetic.
//!
//! Every per-day record in the state document is keyed by a canonical
//! `YYYY-MM-DD` string in local time. This module owns formatting, parsing
//! with real-calendar validation, Monday-anchored weeks, and month ranges.
//! Everything here is pure except [`today`], which reads the local clock so
//! the rest of the crate never has to.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// One entry of a Monday-anchored week row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDate {
    /// Canonical date key of the day
    pub key: String,
    /// Day of month, 1-31
    pub day_of_month: u32,
    /// Weekday index, 0 = Sunday .. 6 = Saturday
    pub weekday_index: u8,
}

/// Current date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date as a canonical `YYYY-MM-DD` key.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date as a `YYYY-MM` month key.
pub fn format_month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse a canonical date key.
///
/// Returns `None` unless the key matches the `YYYY-MM-DD` pattern exactly
/// and names a real calendar date: `2024-02-30` is rejected rather than
/// rolled over, and so are unpadded forms like `2024-2-3`.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let bytes = key.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }

    let year: i32 = key[0..4].parse().ok()?;
    let month: u32 = key[5..7].parse().ok()?;
    let day: u32 = key[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Monday of the week containing `date`. Sunday maps six days back, so a
/// week always runs Monday..Sunday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven days of the week containing `date`, starting at Monday.
pub fn week_dates(date: NaiveDate) -> Vec<WeekDate> {
    let monday = week_start(date);
    (0..7)
        .map(|offset| {
            let day = monday + Duration::days(offset);
            WeekDate {
                key: format_date_key(day),
                day_of_month: day.day(),
                weekday_index: day.weekday().num_days_from_sunday() as u8,
            }
        })
        .collect()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    match next_month {
        Some(first) => first - Duration::days(1),
        None => start,
    }
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    month_end(date).day()
}

/// Date keys for every day of the month containing `date`, ascending.
pub fn date_keys_of_month(date: NaiveDate) -> Vec<String> {
    let start = month_start(date);
    (0..days_in_month(date))
        .map(|offset| format_date_key(start + Duration::days(i64::from(offset))))
        .collect()
}

/// Shift a date key by a number of days.
///
/// Falls back to today's key when the input does not parse; navigation
/// lands somewhere valid instead of propagating a corrupt key.
pub fn shift_date_key_by_days(key: &str, days: i64) -> String {
    match parse_date_key(key) {
        Some(date) => format_date_key(date + Duration::days(days)),
        None => format_date_key(today()),
    }
}

/// Whole-day difference `left - right`.
pub fn date_diff_in_days(left: NaiveDate, right: NaiveDate) -> i64 {
    (left - right).num_days()
}
