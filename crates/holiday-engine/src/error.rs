//! Error types for holiday-engine operations.

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid {field} format: '{value}' ({reason})")]
    InvalidDateFormat {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid {field}: {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid holiday date in {source_field}[{index}]: '{value}' ({reason})")]
    HolidayData {
        source_field: String,
        index: usize,
        value: String,
        reason: String,
    },
}

impl CalendarError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CalendarError::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            CalendarError::InvalidTimezone(_) => "INVALID_TIMEZONE",
            CalendarError::InvalidParameter { .. } => "INVALID_PARAMETER",
            CalendarError::HolidayData { .. } => "INVALID_HOLIDAY_DATE",
        }
    }

    /// Structured payload naming the offending field, value and (for holiday
    /// lists) array index.
    pub fn details(&self) -> Value {
        match self {
            CalendarError::InvalidDateFormat {
                field,
                value,
                reason,
            }
            | CalendarError::InvalidParameter {
                field,
                value,
                reason,
            } => json!({ "field": field, "value": value, "error": reason }),
            CalendarError::InvalidTimezone(tz) => json!({ "field": "timezone", "value": tz }),
            CalendarError::HolidayData {
                source_field,
                index,
                value,
                reason,
            } => json!({
                "field": source_field,
                "index": index,
                "holiday": value,
                "error": reason,
            }),
        }
    }

    pub(crate) fn invalid_parameter(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        CalendarError::InvalidParameter {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
