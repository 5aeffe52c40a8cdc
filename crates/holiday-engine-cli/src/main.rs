//! `holiday` - command-line access to the holiday engine.
//!
//! Every command prints pretty JSON on stdout.
//!
//! ```bash
//! holiday holidays US 2026
//! holiday is-holiday 2026-07-03 US --check-observed
//! holiday --timezone America/New_York business-days 2026-07-01 2026-07-31 --calendar US
//! holiday business-hours 2025-01-20T10:00 2025-01-24T15:00 \
//!     --business-hours '{"start":{"hour":8,"minute":30},"end":{"hour":16,"minute":0}}'
//! DEFAULT_TIMEZONE=Europe/London holiday business-days 2025-12-22 2026-01-02 --calendar UK
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use holiday_engine::calendar::validate_calendar_code;
use holiday_engine::zone::{local_date, parse_instant, parse_timezone};
use holiday_engine::{
    business_days, business_hours, holidays_for_year, is_holiday, jurisdictions, BusinessHours,
    BusinessDaysOptions, BusinessHoursOptions, IsHolidayOptions,
};

#[derive(Parser, Debug)]
#[command(name = "holiday", version, about = "Holiday calendars and business-time arithmetic")]
struct Cli {
    /// IANA timezone used to read dates and split days
    #[arg(long, global = true, env = "DEFAULT_TIMEZONE", default_value = "UTC")]
    timezone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the holidays of a jurisdiction for one year
    Holidays {
        /// Jurisdiction code (US, UK, CA, AU, VE, CL)
        code: String,
        year: i32,
    },
    /// Check whether a date is a holiday in a jurisdiction
    IsHoliday {
        /// Date (YYYY-MM-DD or any accepted instant), read in --timezone
        date: String,
        code: String,
        /// Also match a holiday's observed (substitute) day
        #[arg(long)]
        check_observed: bool,
    },
    /// Count business, weekend and holiday days between two dates (inclusive)
    BusinessDays {
        start: String,
        end: String,
        #[command(flatten)]
        holidays: HolidayArgs,
        /// Count Saturdays and Sundays as business days
        #[arg(long)]
        include_weekends: bool,
    },
    /// Sum business minutes between two instants
    BusinessHours {
        start: String,
        end: String,
        #[command(flatten)]
        holidays: HolidayArgs,
        /// Count Saturdays and Sundays as open days
        #[arg(long)]
        include_weekends: bool,
        /// Opening hours as JSON: {"start":..,"end":..} or a weekday map
        #[arg(long, value_name = "JSON")]
        business_hours: Option<String>,
    },
    /// List the supported jurisdiction codes
    Jurisdictions,
}

#[derive(Args, Debug)]
struct HolidayArgs {
    /// Jurisdiction calendar to exclude holidays from
    #[arg(long)]
    calendar: Option<String>,
    /// Extra holiday date (repeatable)
    #[arg(long = "custom-holiday", value_name = "DATE")]
    custom_holidays: Vec<String>,
    /// Holiday date in the legacy list (repeatable)
    #[arg(long = "holiday", value_name = "DATE")]
    holidays: Vec<String>,
    /// Use each calendar holiday's actual day instead of its observed day
    #[arg(long)]
    no_observed: bool,
}

#[derive(Serialize)]
struct HolidayCheck<'a> {
    date: chrono::NaiveDate,
    jurisdiction: &'a str,
    is_holiday: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    debug!(timezone = %cli.timezone, command = ?cli.command, "running");
    match cli.command {
        Command::Holidays { code, year } => {
            validate_calendar_code(&code)?;
            print_json(&holidays_for_year(&code, year))
        }
        Command::IsHoliday {
            date,
            code,
            check_observed,
        } => {
            validate_calendar_code(&code)?;
            let tz = parse_timezone(&cli.timezone)?;
            let day = local_date(&parse_instant(&date, &tz, "date")?, &tz);
            let result = is_holiday(day, &code, &IsHolidayOptions { check_observed });
            print_json(&HolidayCheck {
                date: day,
                jurisdiction: &code,
                is_holiday: result,
            })
        }
        Command::BusinessDays {
            start,
            end,
            holidays,
            include_weekends,
        } => {
            let options = BusinessDaysOptions {
                exclude_weekends: !include_weekends,
                include_observed: !holidays.no_observed,
                holiday_calendar: holidays.calendar,
                holidays: holidays.holidays,
                custom_holidays: holidays.custom_holidays,
            };
            let count = business_days(&start, &end, &cli.timezone, &options)?;
            print_json(&count)
        }
        Command::BusinessHours {
            start,
            end,
            holidays,
            include_weekends,
            business_hours: hours_json,
        } => {
            let hours = hours_json
                .map(|raw| {
                    serde_json::from_str::<BusinessHours>(&raw)
                        .with_context(|| format!("invalid --business-hours value: {raw}"))
                })
                .transpose()?;
            let options = BusinessHoursOptions {
                business_hours: hours,
                holidays: holidays.holidays,
                custom_holidays: holidays.custom_holidays,
                holiday_calendar: holidays.calendar,
                include_observed: !holidays.no_observed,
                include_weekends,
            };
            let summary = business_hours(&start, &end, &cli.timezone, &options)?;
            print_json(&summary)
        }
        Command::Jurisdictions => print_json(&json!({ "jurisdictions": jurisdictions() })),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
