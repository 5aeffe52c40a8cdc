//! Merge holidays from several sources into one set of calendar days.
//!
//! Sources are a jurisdiction calendar, caller-supplied custom dates, and a
//! legacy date list kept for older callers. Membership is by calendar day
//! (year, month, day), so the same day arriving from two sources counts once.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::calendar::holidays_for_year;
use crate::error::{CalendarError, Result};
use crate::zone::{local_date, parse_instant};

/// A deduplicated, ordered set of holiday calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a day. Returns `false` if it was already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        HolidaySet {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Where holidays come from for one aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HolidaySources<'a> {
    /// Jurisdiction key (e.g. `"US"`).
    pub calendar: Option<&'a str>,
    /// Caller-supplied holiday dates.
    pub custom: &'a [String],
    /// Holiday dates from the older `holidays` parameter.
    pub legacy: &'a [String],
    /// Use a calendar holiday's observed day instead of its actual day when
    /// the two differ.
    pub include_observed: bool,
}

/// Build the holiday set for the range `[start, end]` read in `tz`.
///
/// Calendar holidays are added for every local year the range touches and are
/// not filtered to the range; callers only ever look up days inside it.
/// Custom and legacy dates are parsed in `tz` and kept only when their local
/// day lies within the range's local days. The range may be given in either
/// order.
///
/// # Errors
///
/// Returns [`CalendarError::HolidayData`] naming the list, index and value of
/// the first custom or legacy entry that cannot be parsed.
pub fn aggregate_holidays(
    sources: &HolidaySources<'_>,
    tz: &Tz,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> Result<HolidaySet> {
    let a = local_date(start, tz);
    let b = local_date(end, tz);
    let (first, last) = if a <= b { (a, b) } else { (b, a) };

    let mut set = HolidaySet::new();

    if let Some(calendar) = sources.calendar {
        let before = set.len();
        for year in first.year()..=last.year() {
            for holiday in holidays_for_year(calendar, year) {
                let day = match holiday.observed_date {
                    Some(observed) if sources.include_observed => observed,
                    _ => holiday.date,
                };
                set.insert(day);
            }
        }
        debug!(calendar, added = set.len() - before, "added calendar holidays");
    }

    for (source_field, values) in [("custom_holidays", sources.custom), ("holidays", sources.legacy)] {
        if values.is_empty() {
            continue;
        }
        let dates = parse_holiday_dates(values, source_field, tz)?;
        let mut added = 0;
        for date in dates {
            if date >= first && date <= last {
                set.insert(date);
                added += 1;
            }
        }
        debug!(source = source_field, added, provided = values.len(), "added listed holidays");
    }

    debug!(total = set.len(), "aggregated holidays");
    Ok(set)
}

/// Parse holiday date strings into local calendar days in `tz`.
///
/// `source_field` names the list in the error for the first bad entry.
pub fn parse_holiday_dates(values: &[String], source_field: &str, tz: &Tz) -> Result<Vec<NaiveDate>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            parse_instant(value, tz, source_field)
                .map(|instant| local_date(&instant, tz))
                .map_err(|e| CalendarError::HolidayData {
                    source_field: source_field.to_string(),
                    index,
                    value: value.clone(),
                    reason: match e {
                        CalendarError::InvalidDateFormat { reason, .. } => reason,
                        other => other.to_string(),
                    },
                })
        })
        .collect()
}
