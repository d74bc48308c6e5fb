// File: ./src/dates.rs
//! Pure calendar arithmetic: Easter, Nth weekday of a month and ISO weeks.
//!
//! Everything here works on `NaiveDate` (no time of day, no time zone) and
//! has no side effects, so results can be cached or computed in parallel
//! freely by callers.

use crate::error::DateError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Upper bound on the day-by-day scan in [`first_day_of_iso_week`].
const ISO_WEEK_SCAN_LIMIT: usize = 370;

/// Easter Sunday for `year` (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Result<NaiveDate, DateError> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or(DateError::OutOfRange)
}

/// Date of the `nth` (1-5) `weekday` in `month` of `year`.
///
/// When the requested occurrence spills into the following month (a 5th
/// Monday in a month with only four) the previous occurrence is returned,
/// so `nth = 5` reads as "last".
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    nth: u32,
    weekday: Weekday,
) -> Result<NaiveDate, DateError> {
    if !(1..=5).contains(&nth) {
        return Err(DateError::InvalidNth(nth));
    }
    if !(1..=12).contains(&month) {
        return Err(DateError::InvalidMonth(month));
    }

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1).ok_or(DateError::OutOfRange)?;
    let days_to_add = (weekday.num_days_from_sunday() + 7
        - first_of_month.weekday().num_days_from_sunday())
        % 7;
    let first_occurrence = add_days(first_of_month, i64::from(days_to_add))?;

    let nth_occurrence = add_days(first_occurrence, i64::from(nth - 1) * 7)?;
    if nth_occurrence.month() != month {
        return add_days(first_occurrence, i64::from(nth - 2) * 7);
    }
    Ok(nth_occurrence)
}

/// Monday of ISO week `week` in ISO year `year`.
///
/// Scans forward from January 1 until a day of the target week shows up
/// (week 1 may already belong to the next calendar year), then steps back to
/// that week's Monday.
pub fn first_day_of_iso_week(year: i32, week: u32) -> Result<NaiveDate, DateError> {
    if !(1..=53).contains(&week) {
        return Err(DateError::InvalidWeek(week));
    }

    let mut date_in_week = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DateError::OutOfRange)?;
    let mut found = false;
    for _ in 0..ISO_WEEK_SCAN_LIMIT {
        let iso = date_in_week.iso_week();
        let (y, w) = (iso.year(), iso.week());
        if y == year && w == week {
            found = true;
            break;
        }
        if y > year || (y == year && w > week && week != 1) {
            if week == 1 && y == year + 1 && w == 1 {
                found = true;
                break;
            }
            return Err(DateError::WeekOvershot { year, week });
        }
        date_in_week = add_days(date_in_week, 1)?;
    }
    if !found {
        return Err(DateError::WeekNotFound { year, week });
    }

    let offset = i64::from(date_in_week.weekday().num_days_from_monday());
    let monday = add_days(date_in_week, -offset)?;

    let iso = monday.iso_week();
    let (fy, fw) = (iso.year(), iso.week());
    if fy == year && fw == week {
        return Ok(monday);
    }
    if fw == week && (fy == year || (fy == year - 1 && week >= 52)) {
        return Ok(monday);
    }
    Err(DateError::WeekCheckFailed { year, week })
}

/// Builds a date the lenient way: `day` is counted from the first of the
/// month, so Feb 30 becomes Mar 1 (or Mar 2 in a non-leap year).
pub fn normalized_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
    if !(1..=12).contains(&month) {
        return Err(DateError::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(DateError::OutOfRange)?;
    add_days(first, i64::from(day) - 1)
}

/// Overflow-checked `date + days`.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DateError> {
    let delta = Duration::try_days(days).ok_or(DateError::OutOfRange)?;
    date.checked_add_signed(delta).ok_or(DateError::OutOfRange)
}

/// Weekday from the 1 (Monday) .. 7 (Sunday) numbering.
pub fn weekday_from_iso_number(n: u32) -> Option<Weekday> {
    match n {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Weekday from the 0 (Sunday) .. 6 (Saturday) numbering.
pub fn weekday_from_sunday_index(n: u32) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1..=6 => weekday_from_iso_number(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalized_date_overflows_into_next_month() {
        assert_eq!(normalized_date(2023, 2, 30).unwrap(), ymd(2023, 3, 2));
        assert_eq!(normalized_date(2024, 2, 30).unwrap(), ymd(2024, 3, 1));
        assert_eq!(normalized_date(2024, 2, 29).unwrap(), ymd(2024, 2, 29));
        assert_eq!(normalized_date(2025, 4, 31).unwrap(), ymd(2025, 5, 1));
        assert_eq!(normalized_date(2025, 12, 31).unwrap(), ymd(2025, 12, 31));
        assert!(normalized_date(2025, 13, 1).is_err());
    }

    #[test]
    fn test_weekday_numberings() {
        assert_eq!(weekday_from_iso_number(1), Some(Weekday::Mon));
        assert_eq!(weekday_from_iso_number(7), Some(Weekday::Sun));
        assert_eq!(weekday_from_iso_number(0), None);
        assert_eq!(weekday_from_sunday_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_sunday_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_from_sunday_index(7), None);
    }

    #[test]
    fn test_add_days_overflow_is_an_error() {
        assert_eq!(add_days(NaiveDate::MAX, 1), Err(DateError::OutOfRange));
        assert_eq!(add_days(ymd(2025, 1, 1), i64::MAX), Err(DateError::OutOfRange));
    }
}
