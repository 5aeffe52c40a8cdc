//! Business-hour durations with per-day windows and partial-day clipping.
//!
//! A range is split into the local calendar days it touches. Each day gets
//! its opening window (one window for every day, or one per weekday), loses it
//! entirely on holidays and excluded weekends, and has it clipped to the
//! range on the first and last day.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::aggregate::{aggregate_holidays, HolidaySet, HolidaySources};
use crate::calendar::validate_calendar_code;
use crate::error::{CalendarError, Result};
use crate::zone::{local_date, local_instant, midday, parse_instant, parse_timezone};

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    fn as_naive(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.hour > 23 {
            return Err(CalendarError::invalid_parameter(
                format!("{field}.hour"),
                self.hour,
                "hour must be between 0 and 23",
            ));
        }
        if self.minute > 59 {
            return Err(CalendarError::invalid_parameter(
                format!("{field}.minute"),
                self.minute,
                "minute must be between 0 and 59",
            ));
        }
        Ok(())
    }
}

/// Opening hours for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl HoursWindow {
    /// 09:00–17:00.
    pub const DEFAULT: HoursWindow = HoursWindow {
        start: TimeOfDay::new(9, 0),
        end: TimeOfDay::new(17, 0),
    };

    fn validate(&self, field: &str) -> Result<()> {
        self.start.validate(&format!("{field}.start"))?;
        self.end.validate(&format!("{field}.end"))
    }
}

impl Default for HoursWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Opening hours for a whole week.
///
/// In JSON either a single window, `{"start": {...}, "end": {...}}`, or a map
/// from weekday (`"0"` = Sunday … `"6"` = Saturday) to a window or `null`
/// for closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BusinessHours {
    /// The same window every open day.
    Daily(HoursWindow),
    /// Per-weekday windows; `None` marks a closed day. Weekdays missing from
    /// the map use [`HoursWindow::DEFAULT`].
    Weekly(BTreeMap<u8, Option<HoursWindow>>),
}

// Hand-written because integer map keys do not survive serde's untagged
// buffering.
impl<'de> Deserialize<'de> for BusinessHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Value::Object(map) = value else {
            return Err(de::Error::custom("business hours must be an object"));
        };

        if map.contains_key("start") || map.contains_key("end") {
            return serde_json::from_value(Value::Object(map))
                .map(BusinessHours::Daily)
                .map_err(de::Error::custom);
        }

        let mut days = BTreeMap::new();
        for (key, window) in map {
            let day: u8 = key
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid day of week: '{key}'")))?;
            let window: Option<HoursWindow> =
                serde_json::from_value(window).map_err(de::Error::custom)?;
            days.insert(day, window);
        }
        Ok(BusinessHours::Weekly(days))
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        BusinessHours::Daily(HoursWindow::DEFAULT)
    }
}

impl BusinessHours {
    /// Check hour, minute and weekday ranges.
    pub fn validate(&self) -> Result<()> {
        match self {
            BusinessHours::Daily(window) => window.validate("business_hours"),
            BusinessHours::Weekly(days) => {
                for (day, window) in days {
                    if *day > 6 {
                        return Err(CalendarError::invalid_parameter(
                            "business_hours",
                            day,
                            "day of week must be between 0 (Sunday) and 6 (Saturday)",
                        ));
                    }
                    if let Some(window) = window {
                        window.validate(&format!("business_hours.{day}"))?;
                    }
                }
                Ok(())
            }
        }
    }

    /// The window for a Sunday-based weekday index, or `None` when closed.
    pub fn window_for(&self, weekday: u8) -> Option<HoursWindow> {
        match self {
            BusinessHours::Daily(window) => Some(*window),
            BusinessHours::Weekly(days) => match days.get(&weekday) {
                Some(window) => *window,
                None => Some(HoursWindow::DEFAULT),
            },
        }
    }
}

/// One day of a business-hours breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBusinessHours {
    pub date: NaiveDate,
    pub day_of_week: &'static str,
    pub business_minutes: i64,
    pub is_weekend: bool,
    pub is_holiday: bool,
}

/// Business time within a range, with a per-day breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessHoursSummary {
    pub total_business_minutes: i64,
    pub total_business_hours: f64,
    pub breakdown: Vec<DayBusinessHours>,
}

/// Options for [`business_hours`].
#[derive(Debug, Clone)]
pub struct BusinessHoursOptions {
    /// Opening hours; `None` means 09:00–17:00 every day.
    pub business_hours: Option<BusinessHours>,
    /// Legacy list of holiday dates.
    pub holidays: Vec<String>,
    /// Additional holiday dates.
    pub custom_holidays: Vec<String>,
    /// Jurisdiction calendar to pull holidays from.
    pub holiday_calendar: Option<String>,
    /// Use observed days for calendar holidays. Defaults to `true`.
    pub include_observed: bool,
    /// Count Saturdays and Sundays as open days. Defaults to `false`.
    pub include_weekends: bool,
}

impl Default for BusinessHoursOptions {
    fn default() -> Self {
        Self {
            business_hours: None,
            holidays: Vec::new(),
            custom_holidays: Vec::new(),
            holiday_calendar: None,
            include_observed: true,
            include_weekends: false,
        }
    }
}

/// Business time between `start` and `end` in `timezone`.
///
/// # Errors
///
/// - [`CalendarError::InvalidTimezone`] for an unknown timezone
/// - [`CalendarError::InvalidDateFormat`] if `start` or `end` cannot be parsed
/// - [`CalendarError::InvalidParameter`] for out-of-range business-hour fields
///   or a malformed calendar code
/// - [`CalendarError::HolidayData`] for a malformed holiday date
///
/// A zero-length or reversed range, or one entirely outside business hours,
/// is not an error: it yields zero minutes.
///
/// # Examples
///
/// ```
/// use holiday_engine::business_hours::{business_hours, BusinessHoursOptions};
///
/// let summary = business_hours(
///     "2025-01-20T10:00:00",
///     "2025-01-20T15:00:00",
///     "UTC",
///     &BusinessHoursOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(summary.total_business_minutes, 300);
/// assert_eq!(summary.total_business_hours, 5.0);
/// ```
pub fn business_hours(
    start: &str,
    end: &str,
    timezone: &str,
    options: &BusinessHoursOptions,
) -> Result<BusinessHoursSummary> {
    let tz = parse_timezone(timezone)?;
    let hours = options.business_hours.clone().unwrap_or_default();
    hours.validate()?;
    if let Some(code) = &options.holiday_calendar {
        validate_calendar_code(code)?;
    }

    let start_dt = parse_instant(start, &tz, "start_time")?;
    let end_dt = parse_instant(end, &tz, "end_time")?;

    let sources = HolidaySources {
        calendar: options.holiday_calendar.as_deref(),
        custom: &options.custom_holidays,
        legacy: &options.holidays,
        include_observed: options.include_observed,
    };
    let holidays = aggregate_holidays(&sources, &tz, &start_dt, &end_dt)?;

    Ok(business_hours_between(
        &start_dt,
        &end_dt,
        &tz,
        &hours,
        &holidays,
        options.include_weekends,
    ))
}

/// Business time between two instants, day by day in `tz`.
///
/// Every local day from `start`'s to `end`'s appears in the breakdown. When
/// `end` precedes `start` only `end`'s day is listed, with zero minutes.
pub fn business_hours_between(
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
    tz: &Tz,
    hours: &BusinessHours,
    holidays: &HolidaySet,
    include_weekends: bool,
) -> BusinessHoursSummary {
    let first = local_date(start, tz);
    let last = local_date(end, tz);
    let days: Vec<NaiveDate> = if first <= last {
        first.iter_days().take_while(|d| *d <= last).collect()
    } else {
        vec![last]
    };

    let mut breakdown = Vec::with_capacity(days.len());
    let mut total = 0;

    for day in days {
        let weekday = midday(day, tz).weekday();
        let index = weekday.num_days_from_sunday() as u8;
        let is_weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        let is_holiday = holidays.contains(&day);

        let minutes = if is_holiday {
            debug!(%day, "holiday, no business hours");
            0
        } else if is_weekend && !include_weekends {
            debug!(%day, "weekend excluded");
            0
        } else {
            match hours.window_for(index) {
                Some(window) => clipped_minutes(day, &window, start, end, tz),
                None => {
                    debug!(%day, "closed");
                    0
                }
            }
        };

        total += minutes;
        breakdown.push(DayBusinessHours {
            date: day,
            day_of_week: DAY_NAMES[index as usize],
            business_minutes: minutes,
            is_weekend,
            is_holiday,
        });
    }

    debug!(
        total_minutes = total,
        days = breakdown.len(),
        "calculated business hours"
    );

    BusinessHoursSummary {
        total_business_minutes: total,
        total_business_hours: total as f64 / 60.0,
        breakdown,
    }
}

/// Minutes of `window` on `day` that fall inside `[start, end]`.
fn clipped_minutes(
    day: NaiveDate,
    window: &HoursWindow,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
    tz: &Tz,
) -> i64 {
    let (Some(open), Some(close)) = (window.start.as_naive(), window.end.as_naive()) else {
        return 0;
    };
    let open = local_instant(day, open, tz);
    let close = local_instant(day, close, tz);

    let effective_start = open.max(*start);
    let effective_end = close.min(*end);
    if effective_end <= effective_start {
        return 0;
    }

    if effective_start > open || effective_end < close {
        debug!(%day, %effective_start, %effective_end, "partial day");
    }
    (effective_end - effective_start).num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calc(start: &str, end: &str, tz: &str, options: &BusinessHoursOptions) -> BusinessHoursSummary {
        business_hours(start, end, tz, options).unwrap()
    }

    #[test]
    fn test_single_day_inside_default_window() {
        let s = calc(
            "2025-01-20T10:00:00",
            "2025-01-20T15:00:00",
            "UTC",
            &BusinessHoursOptions::default(),
        );
        assert_eq!(s.total_business_minutes, 300);
        assert_eq!(s.breakdown.len(), 1);
        assert_eq!(s.breakdown[0].day_of_week, "Monday");
        assert!(!s.breakdown[0].is_weekend);
    }

    #[test]
    fn test_range_outside_window_is_zero() {
        let s = calc(
            "2025-01-20T18:00:00",
            "2025-01-20T22:00:00",
            "UTC",
            &BusinessHoursOptions::default(),
        );
        assert_eq!(s.total_business_minutes, 0);
        assert_eq!(s.total_business_hours, 0.0);
        assert_eq!(s.breakdown.len(), 1);
    }

    #[test]
    fn test_fractional_hours() {
        let s = calc(
            "2025-01-20T10:00:00",
            "2025-01-20T10:30:00",
            "UTC",
            &BusinessHoursOptions::default(),
        );
        assert_eq!(s.total_business_minutes, 30);
        assert_eq!(s.total_business_hours, 0.5);
    }

    #[test]
    fn test_multi_day_clips_first_and_last_day() {
        // Fri 15:00 → Mon 11:00
        let s = calc(
            "2025-01-17T15:00:00",
            "2025-01-20T11:00:00",
            "UTC",
            &BusinessHoursOptions::default(),
        );
        let minutes: Vec<i64> = s.breakdown.iter().map(|d| d.business_minutes).collect();
        assert_eq!(minutes, vec![120, 0, 0, 120]);
        assert_eq!(s.total_business_minutes, 240);
        assert!(s.breakdown[1].is_weekend);
        assert_eq!(s.breakdown[1].day_of_week, "Saturday");
    }

    #[test]
    fn test_include_weekends() {
        let options = BusinessHoursOptions {
            include_weekends: true,
            ..Default::default()
        };
        let s = calc("2025-01-17T15:00:00", "2025-01-20T11:00:00", "UTC", &options);
        assert_eq!(s.total_business_minutes, 120 + 480 + 480 + 120);
    }

    #[test]
    fn test_weekly_schedule_with_closed_day_and_fallback() {
        let mut days = BTreeMap::new();
        days.insert(
            1,
            Some(HoursWindow {
                start: TimeOfDay::new(8, 0),
                end: TimeOfDay::new(12, 0),
            }),
        );
        days.insert(2, None);
        let options = BusinessHoursOptions {
            business_hours: Some(BusinessHours::Weekly(days)),
            ..Default::default()
        };
        // Mon, Tue (closed), Wed (not listed → default)
        let s = calc("2025-01-20T00:00:00", "2025-01-22T23:59:00", "UTC", &options);
        let minutes: Vec<i64> = s.breakdown.iter().map(|d| d.business_minutes).collect();
        assert_eq!(minutes, vec![240, 0, 480]);
    }

    #[test]
    fn test_calendar_holiday_zeroes_day() {
        let options = BusinessHoursOptions {
            holiday_calendar: Some("US".to_string()),
            ..Default::default()
        };
        // MLK Day 2025
        let s = calc("2025-01-20T09:00:00", "2025-01-21T17:00:00", "America/New_York", &options);
        assert_eq!(s.breakdown[0].business_minutes, 0);
        assert!(s.breakdown[0].is_holiday);
        assert_eq!(s.breakdown[1].business_minutes, 480);
        assert_eq!(s.total_business_minutes, 480);
    }

    #[test]
    fn test_legacy_holiday_on_weekend_sets_both_flags() {
        let options = BusinessHoursOptions {
            holidays: vec!["2025-01-18".to_string()],
            ..Default::default()
        };
        let s = calc("2025-01-18T09:00:00", "2025-01-18T17:00:00", "UTC", &options);
        assert!(s.breakdown[0].is_holiday);
        assert!(s.breakdown[0].is_weekend);
        assert_eq!(s.total_business_minutes, 0);
    }

    #[test]
    fn test_timezone_window_is_local() {
        // 09:00–17:00 New York (EST) is 14:00–22:00 UTC
        let s = calc(
            "2025-01-20T12:00:00Z",
            "2025-01-21T00:00:00Z",
            "America/New_York",
            &BusinessHoursOptions::default(),
        );
        assert_eq!(s.total_business_minutes, 480);
        assert_eq!(s.breakdown.len(), 1);
        assert_eq!(s.breakdown[0].date, date(2025, 1, 20));
    }

    #[test]
    fn test_dst_day_window_is_wall_clock() {
        // Spring forward happens at 02:00 on Sunday 2025-03-09; the 09:00–17:00 window is intact
        let options = BusinessHoursOptions {
            include_weekends: true,
            ..Default::default()
        };
        let s = calc("2025-03-09T00:00:00", "2025-03-09T23:00:00", "America/New_York", &options);
        assert_eq!(s.total_business_minutes, 480);
        assert_eq!(s.breakdown[0].day_of_week, "Sunday");
    }

    #[test]
    fn test_zero_length_range() {
        let s = calc(
            "2025-01-20T10:00:00",
            "2025-01-20T10:00:00",
            "UTC",
            &BusinessHoursOptions::default(),
        );
        assert_eq!(s.total_business_minutes, 0);
    }

    #[test]
    fn test_reversed_range_is_zero_without_error() {
        let s = calc(
            "2025-01-22T15:00:00",
            "2025-01-20T10:00:00",
            "UTC",
            &BusinessHoursOptions::default(),
        );
        assert_eq!(s.total_business_minutes, 0);
        assert_eq!(s.breakdown.len(), 1);
        assert_eq!(s.breakdown[0].date, date(2025, 1, 20));
    }

    #[test]
    fn test_inverted_window_is_zero() {
        let options = BusinessHoursOptions {
            business_hours: Some(BusinessHours::Daily(HoursWindow {
                start: TimeOfDay::new(17, 0),
                end: TimeOfDay::new(9, 0),
            })),
            ..Default::default()
        };
        let s = calc("2025-01-20T00:00:00", "2025-01-20T23:00:00", "UTC", &options);
        assert_eq!(s.total_business_minutes, 0);
    }

    #[test]
    fn test_invalid_hours_rejected() {
        let options = BusinessHoursOptions {
            business_hours: Some(BusinessHours::Daily(HoursWindow {
                start: TimeOfDay::new(24, 0),
                end: TimeOfDay::new(17, 0),
            })),
            ..Default::default()
        };
        let err = business_hours("2025-01-20", "2025-01-21", "UTC", &options).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
        assert_eq!(err.details()["field"], "business_hours.start.hour");

        let mut days = BTreeMap::new();
        days.insert(7, None);
        let options = BusinessHoursOptions {
            business_hours: Some(BusinessHours::Weekly(days)),
            ..Default::default()
        };
        let err = business_hours("2025-01-20", "2025-01-21", "UTC", &options).unwrap_err();
        assert_eq!(err.details()["value"], "7");

        let mut days = BTreeMap::new();
        days.insert(3, Some(HoursWindow {
            start: TimeOfDay::new(9, 0),
            end: TimeOfDay::new(17, 60),
        }));
        let options = BusinessHoursOptions {
            business_hours: Some(BusinessHours::Weekly(days)),
            ..Default::default()
        };
        let err = business_hours("2025-01-20", "2025-01-21", "UTC", &options).unwrap_err();
        assert_eq!(err.details()["field"], "business_hours.3.end.minute");
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let options = BusinessHoursOptions::default();
        assert_eq!(
            business_hours("tomorrow", "2025-01-21", "UTC", &options)
                .unwrap_err()
                .code(),
            "INVALID_DATE_FORMAT"
        );
        assert_eq!(
            business_hours("2025-01-20", "2025-01-21", "Not/AZone", &options)
                .unwrap_err()
                .code(),
            "INVALID_TIMEZONE"
        );
    }

    #[test]
    fn test_business_hours_json_shapes() {
        let daily: BusinessHours =
            serde_json::from_str(r#"{"start":{"hour":8,"minute":30},"end":{"hour":16,"minute":0}}"#)
                .unwrap();
        assert_eq!(
            daily.window_for(3),
            Some(HoursWindow {
                start: TimeOfDay::new(8, 30),
                end: TimeOfDay::new(16, 0),
            })
        );

        let weekly: BusinessHours = serde_json::from_str(
            r#"{"0":null,"1":{"start":{"hour":10,"minute":0},"end":{"hour":14,"minute":0}}}"#,
        )
        .unwrap();
        assert_eq!(weekly.window_for(0), None);
        assert_eq!(weekly.window_for(1).unwrap().start, TimeOfDay::new(10, 0));
        assert_eq!(weekly.window_for(4), Some(HoursWindow::DEFAULT));

        assert!(serde_json::from_str::<BusinessHours>(r#"{"mon":null}"#).is_err());
        assert!(serde_json::from_str::<BusinessHours>("[1, 2]").is_err());
    }

    #[test]
    fn test_summary_serialization() {
        let s = calc(
            "2025-01-20T10:00:00",
            "2025-01-20T15:00:00",
            "UTC",
            &BusinessHoursOptions::default(),
        );
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["total_business_minutes"], 300);
        assert_eq!(json["total_business_hours"], 5.0);
        assert_eq!(json["breakdown"][0]["date"], "2025-01-20");
        assert_eq!(json["breakdown"][0]["day_of_week"], "Monday");
    }
}
