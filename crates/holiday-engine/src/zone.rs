//! Timezone-aware instant handling.
//!
//! Every "local calendar day" in this crate is anchored through these
//! functions: parse an input expression into a single UTC instant, and read an
//! instant back as local wall-clock fields in an IANA timezone. Offsets come
//! from `chrono-tz`; nothing here does its own offset-table arithmetic.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::{CalendarError, Result};

/// Wall-clock forms accepted without an explicit offset. They are read in the
/// caller's timezone.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an IANA timezone string into `Tz`. The empty string means UTC.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    if s.is_empty() {
        return Ok(Tz::UTC);
    }
    s.parse::<Tz>()
        .map_err(|_| CalendarError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse a date/time expression into a UTC instant.
///
/// Accepted inputs:
///
/// - RFC 3339 with `Z` or an explicit offset (`2025-01-20T10:00:00-05:00`)
/// - an all-digit Unix timestamp, in seconds (more than 10 digits = milliseconds)
/// - local wall-clock time in `tz`: `2025-01-20T10:00[:00]`, `2025-01-20 10:00[:00]`
/// - a bare date `2025-01-20`, meaning local midnight in `tz`
///
/// `field` names the input in the returned error.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDateFormat`] for anything else, including
/// calendrically impossible dates such as `2025-02-30`.
///
/// # Examples
///
/// ```
/// use holiday_engine::zone::{parse_instant, parse_timezone};
///
/// let tz = parse_timezone("America/New_York").unwrap();
/// let instant = parse_instant("2025-01-20T10:00:00", &tz, "start_time").unwrap();
/// assert_eq!(instant.to_rfc3339(), "2025-01-20T15:00:00+00:00");
/// ```
pub fn parse_instant(input: &str, tz: &Tz, field: &str) -> Result<DateTime<Utc>> {
    let s = input.trim();
    let invalid = |reason: String| CalendarError::InvalidDateFormat {
        field: field.to_string(),
        value: input.to_string(),
        reason,
    };

    if s.is_empty() {
        return Err(invalid("empty date".to_string()));
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        let n: i64 = s
            .parse()
            .map_err(|_| invalid("timestamp out of range".to_string()))?;
        let dt = if s.len() > 10 {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };
        return dt.ok_or_else(|| invalid("timestamp out of range".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(resolve_local(&naive, tz).with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| resolve_local(&date.and_time(NaiveTime::MIN), tz).with_timezone(&Utc))
        .map_err(|e| invalid(e.to_string()))
}

/// The calendar day `instant` falls on in `tz`.
pub fn local_date(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// The instant at which the wall clock in `tz` reads `time` on `date`.
pub fn local_instant(date: NaiveDate, time: NaiveTime, tz: &Tz) -> DateTime<Utc> {
    resolve_local(&date.and_time(time), tz).with_timezone(&Utc)
}

/// Local noon on `date`. Weekday lookups go through this anchor so a DST
/// transition at midnight cannot move a day into its neighbour.
pub fn midday(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    resolve_local(&date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)), tz)
}

/// Map a local wall-clock time to an instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// spring-forward gap are read with the offset in force before the gap, which
/// pushes the wall clock forward by the gap length (02:30 → 03:30).
fn resolve_local(naive: &NaiveDateTime, tz: &Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(*naive - Duration::days(1))).fix();
            let utc = *naive - Duration::seconds(before.local_minus_utc() as i64);
            Utc.from_utc_datetime(&utc).with_timezone(tz)
        }
    }
}
