//! Concrete dates from holiday rules.
//!
//! Pure functions over the proleptic Gregorian calendar. A rule that does not
//! produce a date in a given year (Feb 29 in a non-leap year, a fifth Monday
//! that does not exist) returns `None`; that is a normal outcome.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::catalog::{HolidayDefinition, HolidayRule};

/// Map a Sunday-based index (0 = Sunday … 6 = Saturday) to a `Weekday`.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Gregorian Easter Sunday for `year`, by Gauss's algorithm (Computus).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use holiday_engine::rules::compute_easter;
///
/// assert_eq!(compute_easter(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// ```
pub fn compute_easter(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let month = (h + l - 7 * m + 114).div_euclid(31);
    let day = (h + l - 7 * m + 114).rem_euclid(31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// A fixed month/day in `year`, or `None` if that day does not exist.
pub fn compute_fixed(month: u32, day: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The `occurrence`-th `weekday` of `month` (Sunday = 0), or the last one
/// when `occurrence == -1`.
///
/// Returns `None` when the Nth occurrence falls outside the month (e.g. a
/// fifth Monday in February) or the inputs are out of range.
pub fn compute_floating(month: u32, weekday: u8, occurrence: i8, year: i32) -> Option<NaiveDate> {
    let weekday = weekday_from_index(weekday)?;

    if occurrence >= 1 {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let diff = (weekday.num_days_from_sunday() as i64
            - first.weekday().num_days_from_sunday() as i64)
            .rem_euclid(7);
        let target = first + Duration::days(diff + (occurrence as i64 - 1) * 7);
        if target.month() == month {
            Some(target)
        } else {
            None
        }
    } else if occurrence == -1 {
        let last = last_day_of_month(year, month)?;
        let back = (last.weekday().num_days_from_sunday() as i64
            - weekday.num_days_from_sunday() as i64)
            .rem_euclid(7);
        Some(last - Duration::days(back))
    } else {
        None
    }
}

/// Victoria Day: the Monday on or before May 24.
pub fn victoria_day(year: i32) -> Option<NaiveDate> {
    let may24 = NaiveDate::from_ymd_opt(year, 5, 24)?;
    let back = may24.weekday().num_days_from_monday() as i64;
    Some(may24 - Duration::days(back))
}

/// Easter Sunday of `year` shifted by `offset_days`.
pub fn compute_easter_based(offset_days: i32, year: i32) -> Option<NaiveDate> {
    compute_easter(year)?.checked_add_signed(Duration::days(offset_days as i64))
}

/// The nominal (pre-observance) date of `definition` in `year`.
pub fn evaluate(definition: &HolidayDefinition, year: i32) -> Option<NaiveDate> {
    match definition.rule {
        HolidayRule::Fixed { month, day } => compute_fixed(month, day, year),
        HolidayRule::Floating {
            month,
            weekday,
            occurrence,
        } => compute_floating(month, weekday, occurrence, year),
        HolidayRule::EasterBased { offset_days } => compute_easter_based(offset_days, year),
        HolidayRule::VictoriaDay => victoria_day(year),
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}
