//! Concrete holiday lists per jurisdiction and year.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::trace;

use crate::catalog::{holiday_definitions, ObservanceRule, JURISDICTIONS};
use crate::error::{CalendarError, Result};
use crate::observance::observed_date;
use crate::rules::evaluate;

/// A holiday resolved to a concrete day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatedHoliday {
    pub name: String,
    /// The day the holiday falls on. For Monday-moving holidays this is
    /// already the moved day.
    pub date: NaiveDate,
    /// The substitute closure day, present only when it differs from `date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_date: Option<NaiveDate>,
}

/// Options for [`is_holiday`].
#[derive(Debug, Clone, Default)]
pub struct IsHolidayOptions {
    /// Also match a holiday's substitute (observed) day.
    pub check_observed: bool,
}

/// Every holiday of `jurisdiction` in `year`, in catalog order.
///
/// Holidays that do not occur in `year` are skipped. An unknown jurisdiction
/// yields an empty list.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use holiday_engine::calendar::holidays_for_year;
///
/// let holidays = holidays_for_year("US", 2026);
/// let july4 = holidays.iter().find(|h| h.name == "Independence Day").unwrap();
/// assert_eq!(july4.date, NaiveDate::from_ymd_opt(2026, 7, 4).unwrap());
/// assert_eq!(july4.observed_date, NaiveDate::from_ymd_opt(2026, 7, 3));
/// ```
pub fn holidays_for_year(jurisdiction: &str, year: i32) -> Vec<CalculatedHoliday> {
    let mut holidays = Vec::new();

    for def in holiday_definitions(jurisdiction) {
        let Some(date) = evaluate(def, year) else {
            trace!(jurisdiction, year, name = def.name, "holiday does not occur");
            continue;
        };

        let holiday = if def.observance == ObservanceRule::ChileMonday {
            CalculatedHoliday {
                name: def.name.to_string(),
                date: observed_date(date, def.observance),
                observed_date: None,
            }
        } else {
            let observed = observed_date(date, def.observance);
            CalculatedHoliday {
                name: def.name.to_string(),
                date,
                observed_date: (observed != date).then_some(observed),
            }
        };
        holidays.push(holiday);
    }

    holidays
}

/// Whether `date` is a holiday in `jurisdiction`.
pub fn is_holiday(date: NaiveDate, jurisdiction: &str, options: &IsHolidayOptions) -> bool {
    holidays_for_year(jurisdiction, date.year())
        .iter()
        .any(|h| h.date == date || (options.check_observed && h.observed_date == Some(date)))
}

/// Jurisdiction keys with holiday data.
pub fn jurisdictions() -> &'static [&'static str] {
    JURISDICTIONS
}

/// Reject calendar codes that are not 2–3 uppercase ASCII letters.
///
/// A well-formed code without holiday data is accepted; it simply has no
/// holidays.
pub fn validate_calendar_code(code: &str) -> Result<()> {
    let well_formed = (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_uppercase());
    if well_formed {
        Ok(())
    } else {
        Err(CalendarError::invalid_parameter(
            "holiday_calendar",
            code,
            "must be a 2-3 letter uppercase country code",
        ))
    }
}
