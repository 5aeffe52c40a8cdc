//! Observed-date shifting for holidays that land on a weekend.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::catalog::ObservanceRule;

/// The date a holiday on `date` is observed under `rule`.
///
/// | Rule        | Sat      | Sun      | Tue/Wed/Thu     | Mon/Fri |
/// |-------------|----------|----------|-----------------|---------|
/// | UsFederal   | Fri (−1) | Mon (+1) | –               | –       |
/// | UkBank      | Mon (+2) | Mon (+1) | –               | –       |
/// | AuPublic    | –        | Mon (+1) | –               | –       |
/// | ChileMonday | Mon (+2) | Mon (+1) | preceding Mon   | –       |
///
/// `None` and `Always` never move the date.
pub fn observed_date(date: NaiveDate, rule: ObservanceRule) -> NaiveDate {
    let shift = match (rule, date.weekday()) {
        (ObservanceRule::UsFederal, Weekday::Sat) => -1,
        (ObservanceRule::UsFederal, Weekday::Sun) => 1,
        (ObservanceRule::UkBank, Weekday::Sat) => 2,
        (ObservanceRule::UkBank, Weekday::Sun) => 1,
        // Saturday is not substituted in Australia.
        (ObservanceRule::AuPublic, Weekday::Sun) => 1,
        (ObservanceRule::ChileMonday, _) => return chile_monday(date),
        _ => 0,
    };
    date + Duration::days(shift)
}

/// Chile's Monday-moving rule (Ley 19.973): a Tuesday, Wednesday or Thursday
/// holiday moves back to that week's Monday, a weekend holiday moves forward
/// to the next Monday, and Monday or Friday stays.
pub fn chile_monday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Tue | Weekday::Wed | Weekday::Thu => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        Weekday::Mon | Weekday::Fri => date,
    }
}
