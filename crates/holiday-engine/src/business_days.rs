//! Business-day counting over a range of local calendar days.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::{debug, trace};

use crate::aggregate::{aggregate_holidays, HolidaySet, HolidaySources};
use crate::calendar::validate_calendar_code;
use crate::error::{CalendarError, Result};
use crate::zone::{local_date, parse_instant, parse_timezone};

/// Longest accepted range, in days (100 years including leap days).
pub const MAX_RANGE_DAYS: i64 = 36_525;

/// Day counts for a range. `business_days + weekend_days + holiday_count`
/// always equals `total_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BusinessDayCount {
    pub total_days: u32,
    pub business_days: u32,
    pub weekend_days: u32,
    pub holiday_count: u32,
}

/// Options for [`business_days`].
#[derive(Debug, Clone)]
pub struct BusinessDaysOptions {
    /// Count Saturdays and Sundays as non-business days. Defaults to `true`.
    pub exclude_weekends: bool,
    /// Use observed (substitute) days for calendar holidays. Defaults to `true`.
    pub include_observed: bool,
    /// Jurisdiction calendar to pull holidays from (e.g. `"US"`).
    pub holiday_calendar: Option<String>,
    /// Legacy list of holiday dates.
    pub holidays: Vec<String>,
    /// Additional holiday dates.
    pub custom_holidays: Vec<String>,
}

impl Default for BusinessDaysOptions {
    fn default() -> Self {
        Self {
            exclude_weekends: true,
            include_observed: true,
            holiday_calendar: None,
            holidays: Vec::new(),
            custom_holidays: Vec::new(),
        }
    }
}

pub(crate) fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classify every day from `first` to `last` inclusive (either order).
///
/// Precedence is weekend, then holiday, then business. With
/// `include_weekends`, days classified as weekend are counted as business
/// days instead; holidays stay holidays.
pub fn count_days(
    first: NaiveDate,
    last: NaiveDate,
    holidays: &HolidaySet,
    include_weekends: bool,
) -> BusinessDayCount {
    let (first, last) = if first <= last { (first, last) } else { (last, first) };
    let mut count = BusinessDayCount::default();

    for day in first.iter_days().take_while(|d| *d <= last) {
        count.total_days += 1;
        if is_weekend(day) {
            count.weekend_days += 1;
            trace!(%day, "weekend");
        } else if holidays.contains(&day) {
            count.holiday_count += 1;
            trace!(%day, "holiday");
        } else {
            count.business_days += 1;
            trace!(%day, "business day");
        }
    }

    if include_weekends {
        debug!(weekend_days = count.weekend_days, "counting weekends as business days");
        count.business_days += count.weekend_days;
        count.weekend_days = 0;
    }

    count
}

/// Count business days between two dates in `timezone`.
///
/// `start` and `end` accept anything [`parse_instant`] does and are reduced to
/// local calendar days; both ends are inclusive and a reversed range is
/// counted as if it were in order.
///
/// # Errors
///
/// - [`CalendarError::InvalidTimezone`] for an unknown timezone
/// - [`CalendarError::InvalidDateFormat`] if `start` or `end` cannot be parsed
/// - [`CalendarError::InvalidParameter`] for a malformed calendar code or a
///   range longer than [`MAX_RANGE_DAYS`]
/// - [`CalendarError::HolidayData`] for a malformed holiday date
///
/// # Examples
///
/// ```
/// use holiday_engine::business_days::{business_days, BusinessDaysOptions};
///
/// let options = BusinessDaysOptions {
///     holiday_calendar: Some("US".to_string()),
///     ..Default::default()
/// };
/// // July 2026: Independence Day falls on Saturday and is observed Friday the 3rd
/// let count = business_days("2026-07-01", "2026-07-07", "America/New_York", &options).unwrap();
/// assert_eq!(count.total_days, 7);
/// assert_eq!(count.weekend_days, 2);
/// assert_eq!(count.holiday_count, 1);
/// assert_eq!(count.business_days, 4);
/// ```
pub fn business_days(
    start: &str,
    end: &str,
    timezone: &str,
    options: &BusinessDaysOptions,
) -> Result<BusinessDayCount> {
    let tz = parse_timezone(timezone)?;
    if let Some(code) = &options.holiday_calendar {
        validate_calendar_code(code)?;
    }

    let start_dt = parse_instant(start, &tz, "start_date")?;
    let end_dt = parse_instant(end, &tz, "end_date")?;

    let span = (end_dt - start_dt).num_days().abs();
    if span > MAX_RANGE_DAYS {
        return Err(CalendarError::invalid_parameter(
            "date_range",
            span,
            format!("range of {span} days exceeds the maximum of {MAX_RANGE_DAYS}"),
        ));
    }

    let sources = HolidaySources {
        calendar: options.holiday_calendar.as_deref(),
        custom: &options.custom_holidays,
        legacy: &options.holidays,
        include_observed: options.include_observed,
    };
    let holidays = aggregate_holidays(&sources, &tz, &start_dt, &end_dt)?;

    let first = local_date(&start_dt, &tz);
    let last = local_date(&end_dt, &tz);
    let count = count_days(first, last, &holidays, !options.exclude_weekends);

    debug!(
        %first,
        %last,
        total = count.total_days,
        business = count.business_days,
        weekends = count.weekend_days,
        holidays = count.holiday_count,
        "counted business days"
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_invariant(c: &BusinessDayCount) {
        assert_eq!(c.business_days + c.weekend_days + c.holiday_count, c.total_days);
    }

    #[test]
    fn test_count_plain_week() {
        // Mon 2025-01-13 .. Sun 2025-01-19
        let c = count_days(date(2025, 1, 13), date(2025, 1, 19), &HolidaySet::new(), false);
        assert_eq!(c.total_days, 7);
        assert_eq!(c.business_days, 5);
        assert_eq!(c.weekend_days, 2);
        assert_eq!(c.holiday_count, 0);
    }

    #[test]
    fn test_count_single_day() {
        let c = count_days(date(2025, 1, 20), date(2025, 1, 20), &HolidaySet::new(), false);
        assert_eq!(c.total_days, 1);
        assert_eq!(c.business_days, 1);
    }

    #[test]
    fn test_count_reversed_range() {
        let forward = count_days(date(2025, 1, 1), date(2025, 1, 31), &HolidaySet::new(), false);
        let backward = count_days(date(2025, 1, 31), date(2025, 1, 1), &HolidaySet::new(), false);
        assert_eq!(forward, backward);
        assert_eq!(forward.total_days, 31);
    }

    #[test]
    fn test_weekend_takes_precedence_over_holiday() {
        // Sat 2026-07-04 in the set is still a weekend day
        let holidays: HolidaySet = [date(2026, 7, 4), date(2026, 7, 6)].into_iter().collect();
        let c = count_days(date(2026, 7, 4), date(2026, 7, 6), &holidays, false);
        assert_eq!(c.weekend_days, 2);
        assert_eq!(c.holiday_count, 1);
        assert_eq!(c.business_days, 0);
        assert_invariant(&c);
    }

    #[test]
    fn test_include_weekends_keeps_invariant() {
        let holidays: HolidaySet = [date(2025, 1, 15)].into_iter().collect();
        let c = count_days(date(2025, 1, 13), date(2025, 1, 19), &holidays, true);
        assert_eq!(c.business_days, 6);
        assert_eq!(c.weekend_days, 0);
        assert_eq!(c.holiday_count, 1);
        assert_invariant(&c);
    }

    #[test]
    fn test_business_days_with_calendar_and_custom() {
        let options = BusinessDaysOptions {
            holiday_calendar: Some("US".to_string()),
            custom_holidays: vec!["2025-12-24".to_string(), "2025-12-25".to_string()],
            ..Default::default()
        };
        // Dec 22 (Mon) .. Dec 28 (Sun) 2025
        let c = business_days("2025-12-22", "2025-12-28", "UTC", &options).unwrap();
        assert_eq!(c.total_days, 7);
        assert_eq!(c.holiday_count, 2);
        assert_eq!(c.weekend_days, 2);
        assert_eq!(c.business_days, 3);
    }

    #[test]
    fn test_business_days_observed_toggle() {
        let mut options = BusinessDaysOptions {
            holiday_calendar: Some("US".to_string()),
            include_observed: false,
            ..Default::default()
        };
        // Without observed dates, Sat July 4 2026 is just a weekend day
        let c = business_days("2026-07-01", "2026-07-07", "UTC", &options).unwrap();
        assert_eq!(c.holiday_count, 0);
        assert_eq!(c.business_days, 5);

        options.include_observed = true;
        let c = business_days("2026-07-01", "2026-07-07", "UTC", &options).unwrap();
        assert_eq!(c.holiday_count, 1);
        assert_eq!(c.business_days, 4);
    }

    #[test]
    fn test_business_days_timezone_shifts_local_day() {
        // 2025-01-17T23:30Z is already Saturday in Tokyo
        let options = BusinessDaysOptions::default();
        let utc = business_days("2025-01-17T23:30:00Z", "2025-01-17T23:45:00Z", "UTC", &options).unwrap();
        assert_eq!(utc.business_days, 1);
        let tokyo = business_days(
            "2025-01-17T23:30:00Z",
            "2025-01-17T23:45:00Z",
            "Asia/Tokyo",
            &options,
        )
        .unwrap();
        assert_eq!(tokyo.weekend_days, 1);
    }

    #[test]
    fn test_business_days_exclude_weekends_false() {
        let options = BusinessDaysOptions {
            exclude_weekends: false,
            ..Default::default()
        };
        let c = business_days("2025-01-13", "2025-01-19", "UTC", &options).unwrap();
        assert_eq!(c.business_days, 7);
        assert_invariant(&c);
    }

    #[test]
    fn test_business_days_errors() {
        let options = BusinessDaysOptions::default();
        assert_eq!(
            business_days("2025-01-01", "2025-01-10", "Nowhere/City", &options)
                .unwrap_err()
                .code(),
            "INVALID_TIMEZONE"
        );
        assert_eq!(
            business_days("2025-02-30", "2025-03-10", "UTC", &options)
                .unwrap_err()
                .code(),
            "INVALID_DATE_FORMAT"
        );
        assert_eq!(
            business_days("1900-01-01", "2025-01-01", "UTC", &options)
                .unwrap_err()
                .code(),
            "INVALID_PARAMETER"
        );

        let bad_calendar = BusinessDaysOptions {
            holiday_calendar: Some("usa".to_string()),
            ..Default::default()
        };
        assert_eq!(
            business_days("2025-01-01", "2025-01-10", "UTC", &bad_calendar)
                .unwrap_err()
                .code(),
            "INVALID_PARAMETER"
        );

        let bad_holiday = BusinessDaysOptions {
            holidays: vec!["2025-01-02".to_string(), "nope".to_string()],
            ..Default::default()
        };
        let err = business_days("2025-01-01", "2025-01-10", "UTC", &bad_holiday).unwrap_err();
        assert_eq!(err.code(), "INVALID_HOLIDAY_DATE");
        assert_eq!(err.details()["index"], 1);
    }

    #[test]
    fn test_unknown_calendar_counts_no_holidays() {
        let options = BusinessDaysOptions {
            holiday_calendar: Some("XX".to_string()),
            ..Default::default()
        };
        let c = business_days("2025-12-22", "2025-12-26", "UTC", &options).unwrap();
        assert_eq!(c.business_days, 5);
    }
}
