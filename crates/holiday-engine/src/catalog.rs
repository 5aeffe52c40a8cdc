//! Static per-jurisdiction holiday definitions.
//!
//! Each jurisdiction is an ordered slice of [`HolidayDefinition`]s. The table
//! is plain data: a tagged [`HolidayRule`] says how to find the date in a given
//! year, and an [`ObservanceRule`] says how a weekend landing is shifted. The
//! evaluators in [`crate::rules`] and [`crate::observance`] do the work.
//!
//! To add a jurisdiction, add a slice below and a key in [`JURISDICTIONS`] and
//! [`holiday_definitions`].

use serde::Serialize;

/// How a holiday's date is found in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HolidayRule {
    /// Same month/day every year.
    Fixed { month: u32, day: u32 },
    /// The Nth (`occurrence >= 1`) or last (`occurrence == -1`) `weekday` of
    /// `month`. `weekday` counts from Sunday = 0.
    Floating {
        month: u32,
        weekday: u8,
        occurrence: i8,
    },
    /// Signed day offset from Gregorian Easter Sunday.
    EasterBased { offset_days: i32 },
    /// Canada: the Monday on or before May 24.
    VictoriaDay,
}

/// Jurisdiction policy for a holiday that lands on a weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservanceRule {
    /// No substitute day is given.
    #[default]
    None,
    /// Always observed on the actual date.
    Always,
    /// Saturday → Friday, Sunday → Monday.
    UsFederal,
    /// Saturday → Monday, Sunday → Monday.
    UkBank,
    /// Sunday → Monday; Saturday stays put.
    AuPublic,
    /// Chile's Monday-moving law: the holiday itself moves.
    ChileMonday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HolidayDefinition {
    pub name: &'static str,
    pub rule: HolidayRule,
    pub observance: ObservanceRule,
}

const fn fixed(name: &'static str, month: u32, day: u32, observance: ObservanceRule) -> HolidayDefinition {
    HolidayDefinition {
        name,
        rule: HolidayRule::Fixed { month, day },
        observance,
    }
}

const fn floating(
    name: &'static str,
    month: u32,
    weekday: u8,
    occurrence: i8,
    observance: ObservanceRule,
) -> HolidayDefinition {
    HolidayDefinition {
        name,
        rule: HolidayRule::Floating {
            month,
            weekday,
            occurrence,
        },
        observance,
    }
}

const fn easter(name: &'static str, offset_days: i32, observance: ObservanceRule) -> HolidayDefinition {
    HolidayDefinition {
        name,
        rule: HolidayRule::EasterBased { offset_days },
        observance,
    }
}

use ObservanceRule::{AuPublic, ChileMonday, UkBank, UsFederal};
const ALWAYS: ObservanceRule = ObservanceRule::Always;
const NEVER: ObservanceRule = ObservanceRule::None;

const MON: u8 = 1;
const THU: u8 = 4;
const LAST: i8 = -1;

static US: &[HolidayDefinition] = &[
    fixed("New Year's Day", 1, 1, UsFederal),
    floating("Martin Luther King Jr. Day", 1, MON, 3, ALWAYS),
    floating("Presidents Day", 2, MON, 3, ALWAYS),
    floating("Memorial Day", 5, MON, LAST, ALWAYS),
    fixed("Juneteenth National Independence Day", 6, 19, UsFederal),
    fixed("Independence Day", 7, 4, UsFederal),
    floating("Labor Day", 9, MON, 1, ALWAYS),
    floating("Columbus Day", 10, MON, 2, ALWAYS),
    fixed("Veterans Day", 11, 11, UsFederal),
    floating("Thanksgiving", 11, THU, 4, ALWAYS),
    fixed("Christmas Day", 12, 25, UsFederal),
];

static UK: &[HolidayDefinition] = &[
    fixed("New Year's Day", 1, 1, UkBank),
    easter("Good Friday", -2, ALWAYS),
    easter("Easter Monday", 1, ALWAYS),
    floating("Early May Bank Holiday", 5, MON, 1, ALWAYS),
    floating("Spring Bank Holiday", 5, MON, LAST, ALWAYS),
    floating("Summer Bank Holiday", 8, MON, LAST, ALWAYS),
    fixed("Christmas Day", 12, 25, UkBank),
    fixed("Boxing Day", 12, 26, UkBank),
];

static CA: &[HolidayDefinition] = &[
    fixed("New Year's Day", 1, 1, UsFederal),
    easter("Good Friday", -2, ALWAYS),
    HolidayDefinition {
        name: "Victoria Day",
        rule: HolidayRule::VictoriaDay,
        observance: ALWAYS,
    },
    fixed("Canada Day", 7, 1, UsFederal),
    floating("Labour Day", 9, MON, 1, ALWAYS),
    floating("Thanksgiving Day", 10, MON, 2, ALWAYS),
    // Observed in some provinces only, with no substitute day.
    fixed("Remembrance Day", 11, 11, NEVER),
    fixed("Christmas Day", 12, 25, UsFederal),
    fixed("Boxing Day", 12, 26, UsFederal),
];

static AU: &[HolidayDefinition] = &[
    fixed("New Year's Day", 1, 1, AuPublic),
    fixed("Australia Day", 1, 26, AuPublic),
    easter("Good Friday", -2, ALWAYS),
    easter("Easter Saturday", -1, ALWAYS),
    easter("Easter Monday", 1, ALWAYS),
    fixed("Anzac Day", 4, 25, NEVER),
    floating("Queen's Birthday", 6, MON, 2, ALWAYS),
    fixed("Christmas Day", 12, 25, AuPublic),
    fixed("Boxing Day", 12, 26, AuPublic),
];

// Federal public holidays only.
static VE: &[HolidayDefinition] = &[
    fixed("Año Nuevo", 1, 1, NEVER),
    easter("Lunes de Carnaval", -48, NEVER),
    easter("Martes de Carnaval", -47, NEVER),
    easter("Jueves Santo", -3, NEVER),
    easter("Viernes Santo", -2, NEVER),
    fixed("Declaración de la Independencia", 4, 19, NEVER),
    fixed("Día del Trabajador", 5, 1, NEVER),
    fixed("Batalla de Carabobo", 6, 24, NEVER),
    fixed("Día de la Independencia", 7, 5, NEVER),
    fixed("Natalicio de Simón Bolívar", 7, 24, NEVER),
    fixed("Día de la Resistencia Indígena", 10, 12, NEVER),
    fixed("Navidad", 12, 25, NEVER),
];

static CL: &[HolidayDefinition] = &[
    fixed("Año Nuevo", 1, 1, NEVER),
    easter("Viernes Santo", -2, NEVER),
    easter("Sábado Santo", -1, NEVER),
    fixed("Día del Trabajo", 5, 1, NEVER),
    fixed("Día de las Glorias Navales", 5, 21, NEVER),
    fixed("Día Nacional de los Pueblos Indígenas", 6, 20, NEVER),
    fixed("San Pedro y San Pablo", 6, 29, ChileMonday),
    fixed("Día de la Virgen del Carmen", 7, 16, NEVER),
    fixed("Asunción de la Virgen", 8, 15, NEVER),
    fixed("Independencia Nacional", 9, 18, NEVER),
    fixed("Día de las Glorias del Ejército", 9, 19, NEVER),
    fixed("Encuentro de Dos Mundos", 10, 12, ChileMonday),
    fixed("Día de las Iglesias Evangélicas", 10, 31, NEVER),
    fixed("Día de Todos los Santos", 11, 1, NEVER),
    fixed("Inmaculada Concepción", 12, 8, NEVER),
    fixed("Navidad", 12, 25, NEVER),
];

/// Every jurisdiction key with a holiday table.
pub const JURISDICTIONS: &[&str] = &["US", "UK", "CA", "AU", "VE", "CL"];

/// The ordered holiday definitions for `jurisdiction`, or an empty slice when
/// the key is unknown.
pub fn holiday_definitions(jurisdiction: &str) -> &'static [HolidayDefinition] {
    match jurisdiction {
        "US" => US,
        "UK" => UK,
        "CA" => CA,
        "AU" => AU,
        "VE" => VE,
        "CL" => CL,
        _ => &[],
    }
}
