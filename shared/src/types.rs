//! Common types used across the platform

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A latitude or longitude exactly as the client sent it.
///
/// Coordinates are not range-checked or coerced here; the weather provider
/// receives them verbatim and decides what is acceptable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinate(pub Value);

impl Coordinate {
    /// Whether the value counts as "provided" (non-zero, non-empty, not false/null)
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    /// Render the coordinate for a query string (strings unquoted)
    pub fn query_value(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self(serde_json::json!(value))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query_value())
    }
}

/// Round to `dp` decimal places, half-to-even on the exact binary value.
///
/// Values outside the `Decimal` range are returned unchanged. The rounded
/// decimal is parsed back from its string form so the result is the f64
/// nearest to it.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(d) => d
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
            .to_string()
            .parse()
            .unwrap_or(value),
        None => value,
    }
}
