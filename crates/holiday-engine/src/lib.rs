//! # holiday-engine
//!
//! Deterministic holiday calendars and business-time arithmetic.
//!
//! The engine turns per-jurisdiction holiday definitions into concrete dates
//! for any year, applies each jurisdiction's observed-date rules, merges
//! holidays from several sources, and counts business days and business hours
//! across timezone-aware day boundaries. Every function is pure: no clock, no
//! I/O, no shared mutable state.
//!
//! ## Modules
//!
//! - [`catalog`] — Static holiday definitions per jurisdiction
//! - [`rules`] — Easter (Computus), fixed, floating and Victoria Day dates
//! - [`observance`] — Weekend-shift rules (US federal, UK bank, AU public, Chile Monday)
//! - [`calendar`] — Holidays for a jurisdiction and year; holiday membership
//! - [`aggregate`] — Merge calendar, custom and legacy holidays into one day set
//! - [`business_days`] — Count business, weekend and holiday days in a range
//! - [`business_hours`] — Business minutes per day with partial-day clipping
//! - [`zone`] — Instant parsing and local calendar days in IANA timezones
//! - [`error`] — Error types

pub mod aggregate;
pub mod business_days;
pub mod business_hours;
pub mod calendar;
pub mod catalog;
pub mod error;
pub mod observance;
pub mod rules;
pub mod zone;

pub use aggregate::{aggregate_holidays, HolidaySet, HolidaySources};
pub use business_days::{business_days, count_days, BusinessDayCount, BusinessDaysOptions};
pub use business_hours::{
    business_hours, business_hours_between, BusinessHours, BusinessHoursOptions,
    BusinessHoursSummary, DayBusinessHours, HoursWindow, TimeOfDay,
};
pub use calendar::{
    holidays_for_year, is_holiday, jurisdictions, CalculatedHoliday, IsHolidayOptions,
};
pub use catalog::{HolidayDefinition, HolidayRule, ObservanceRule};
pub use error::CalendarError;
pub use observance::observed_date;
pub use rules::compute_easter;
