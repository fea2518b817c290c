//! Input validation for prediction requests
//!
//! Numeric fields accept JSON numbers or numeric strings. Planting dates are
//! parsed into an explicit result so callers can choose to ignore bad input.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Planting date shape: 1-2 digit day (optionally space padded), 1-2 digit
/// month, exactly four digit year.
pub const PLANTING_DATE_PATTERN: &str =
    r"^(3[01]|[12][0-9]|0[1-9]|[1-9]| [1-9])-(1[0-2]|0[1-9]|[1-9])-([0-9]{4})$";

/// Rejected request field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a number, got {found}")]
    NotANumber { field: &'static str, found: String },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Planting date that could not be understood
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlantingDateError {
    #[error("planting date {0:?} is not in DD-MM-YYYY format")]
    Format(String),

    #[error("planting date {0:?} is not a calendar date")]
    OutOfRange(String),
}

impl PlantingDateError {
    /// The rejected input
    pub fn input(&self) -> &str {
        match self {
            PlantingDateError::Format(input) | PlantingDateError::OutOfRange(input) => input,
        }
    }
}

fn planting_date_shape() -> Option<&'static Regex> {
    static SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    SHAPE
        .get_or_init(|| Regex::new(PLANTING_DATE_PATTERN).ok())
        .as_ref()
}

/// Parse a `DD-MM-YYYY` planting date
///
/// Day and month may be a single digit, and a single-digit day may carry one
/// leading space. The year must be four digits with no sign. Anything else,
/// including trailing whitespace, is rejected.
pub fn parse_planting_date(input: &str) -> Result<NaiveDate, PlantingDateError> {
    let format_error = || PlantingDateError::Format(input.to_string());

    let captures = planting_date_shape()
        .and_then(|shape| shape.captures(input))
        .ok_or_else(format_error)?;
    let field = |i: usize| captures.get(i).map(|m| m.as_str().trim_start());

    let day = field(1).and_then(|d| d.parse::<u32>().ok());
    let month = field(2).and_then(|m| m.parse::<u32>().ok());
    let year = field(3).and_then(|y| y.parse::<i32>().ok());

    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| PlantingDateError::OutOfRange(input.to_string())),
        _ => Err(format_error()),
    }
}

/// Convert a numeric request field, falling back to `default` when absent
pub fn parse_numeric_field(
    field: &'static str,
    value: Option<&Value>,
    default: f64,
) -> Result<f64, InputError> {
    let parsed = match value {
        None => return Ok(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(InputError::NonFinite { field }),
        None => Err(InputError::NotANumber {
            field,
            found: value.map(describe).unwrap_or_default(),
        }),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
        Value::Number(n) => n.to_string(),
    }
}

/// Deserialize a field so that an explicit `null` is `Some(Value::Null)`
/// rather than being folded into "absent".
pub fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
