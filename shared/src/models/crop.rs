//! Crop profiles and the rule-based yield estimator

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::round_dp;
use crate::validation::{
    parse_numeric_field, parse_planting_date, present_value, InputError, PlantingDateError,
};

/// Temperature used when the request omits one (°C)
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
/// Rainfall used when the request omits one (mm)
pub const DEFAULT_RAINFALL: f64 = 50.0;

/// Yield lost per degree outside the ideal temperature range
pub const TEMPERATURE_PENALTY: f64 = 0.2;
/// Yield lost per millimetre outside the optimal rainfall range
pub const RAINFALL_PENALTY: f64 = 0.1;

/// Crops younger than this are not yet mature
pub const IMMATURE_DAYS: i64 = 60;
/// Crops older than this have passed their harvest window
pub const HARVEST_WINDOW_DAYS: i64 = 180;

const IMMATURE_FACTOR: f64 = 0.8;
const PAST_HARVEST_FACTOR: f64 = 0.9;

const CONFIDENCE_BASE: f64 = 80.0;
const CONFIDENCE_MIN: u8 = 50;
const CONFIDENCE_MAX: u8 = 95;

/// Crops with a dedicated profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropKind {
    Wheat,
    Rice,
    Maize,
    /// Anything else, including an empty crop name
    Other,
}

impl CropKind {
    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "wheat" => CropKind::Wheat,
            "rice" => CropKind::Rice,
            "maize" => CropKind::Maize,
            _ => CropKind::Other,
        }
    }

    pub fn profile(&self) -> CropProfile {
        match self {
            CropKind::Wheat => CropProfile {
                base_yield: 4.0,
                ideal_temperature: ClimateRange::new(18.0, 25.0),
                optimal_rainfall: ClimateRange::new(40.0, 60.0),
            },
            CropKind::Rice => CropProfile {
                base_yield: 5.0,
                ideal_temperature: ClimateRange::new(22.0, 30.0),
                optimal_rainfall: ClimateRange::new(80.0, 120.0),
            },
            CropKind::Maize => CropProfile {
                base_yield: 4.5,
                ideal_temperature: ClimateRange::new(20.0, 28.0),
                optimal_rainfall: ClimateRange::new(50.0, 90.0),
            },
            CropKind::Other => CropProfile {
                base_yield: 3.5,
                ideal_temperature: ClimateRange::new(20.0, 30.0),
                optimal_rainfall: ClimateRange::new(50.0, 100.0),
            },
        }
    }
}

/// Inclusive range a climate variable should stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateRange {
    pub min: f64,
    pub max: f64,
}

impl ClimateRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Distance from the nearest bound, zero when inside the range
    pub fn deviation(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Agronomic profile for a crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Yield under ideal conditions (tonnes/hectare)
    pub base_yield: f64,
    pub ideal_temperature: ClimateRange,
    pub optimal_rainfall: ClimateRange,
}

impl CropProfile {
    pub fn for_crop(name: &str) -> Self {
        CropKind::from_name(name).profile()
    }
}

/// Prediction request as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YieldRequestPayload {
    #[serde(default)]
    pub crop_type: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    pub temperature: Option<Value>,
    #[serde(default, deserialize_with = "present_value")]
    pub rainfall: Option<Value>,
    /// Anything other than a string is ignored, like an unparsable date
    #[serde(default)]
    pub planting_date: Option<Value>,
}

/// Validated prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldRequest {
    pub crop_type: String,
    pub temperature: f64,
    pub rainfall: f64,
    pub planting_date: Option<String>,
}

impl YieldRequest {
    pub fn new(crop_type: impl Into<String>, temperature: f64, rainfall: f64) -> Self {
        Self {
            crop_type: crop_type.into(),
            temperature,
            rainfall,
            planting_date: None,
        }
    }

    pub fn with_planting_date(mut self, planting_date: impl Into<String>) -> Self {
        self.planting_date = Some(planting_date.into());
        self
    }

    /// Parsed planting date, `Ok(None)` when none was given
    pub fn planted_on(&self) -> Result<Option<NaiveDate>, PlantingDateError> {
        self.planting_date
            .as_deref()
            .map(parse_planting_date)
            .transpose()
    }
}

impl TryFrom<YieldRequestPayload> for YieldRequest {
    type Error = InputError;

    fn try_from(payload: YieldRequestPayload) -> Result<Self, Self::Error> {
        let temperature = parse_numeric_field(
            "temperature",
            payload.temperature.as_ref(),
            DEFAULT_TEMPERATURE,
        )?;
        let rainfall =
            parse_numeric_field("rainfall", payload.rainfall.as_ref(), DEFAULT_RAINFALL)?;

        let planting_date = match payload.planting_date {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };

        Ok(Self {
            crop_type: payload.crop_type.unwrap_or_default(),
            temperature,
            rainfall,
            planting_date,
        })
    }
}

/// Yield estimate returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    /// Estimated yield (tonnes/hectare), two decimal places
    pub predicted_yield: f64,
    /// Heuristic confidence, always within 50..=95
    pub confidence: u8,
    pub tips: Vec<String>,
}

/// Whole days between local midnight of `planted` and `now`, floored
pub fn days_since_planting(planted: NaiveDate, now: NaiveDateTime) -> i64 {
    let elapsed = now.signed_duration_since(planted.and_time(NaiveTime::MIN));
    elapsed.num_seconds().div_euclid(86_400)
}

/// Multiplier applied for crop age
pub fn planting_age_factor(days: i64) -> f64 {
    if days < IMMATURE_DAYS {
        IMMATURE_FACTOR
    } else if days > HARVEST_WINDOW_DAYS {
        PAST_HARVEST_FACTOR
    } else {
        1.0
    }
}

/// `floor(80 + (yield mod 5))` with a non-negative remainder, clamped to 50..=95
pub fn confidence_score(yield_estimate: f64) -> u8 {
    if !yield_estimate.is_finite() {
        return CONFIDENCE_MIN;
    }
    let raw = (CONFIDENCE_BASE + yield_estimate.rem_euclid(5.0)).floor();
    raw.clamp(f64::from(CONFIDENCE_MIN), f64::from(CONFIDENCE_MAX)) as u8
}

/// Advisory tips, fixed apart from the crop name
pub fn advisory_tips(crop: &str) -> Vec<String> {
    vec![
        format!("Ideal soil for {} detected 🌱", capitalize(crop)),
        "Weather conditions suggest moderate growth potential".to_string(),
    ]
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Yield before rounding, with the temperature, rainfall and age rules applied
pub fn raw_yield_estimate(request: &YieldRequest, now: NaiveDateTime) -> f64 {
    // An unparsable date means no age adjustment
    raw_yield_for(request, request.planted_on().ok().flatten(), now)
}

fn raw_yield_for(request: &YieldRequest, planted: Option<NaiveDate>, now: NaiveDateTime) -> f64 {
    let profile = CropProfile::for_crop(&request.crop_type);

    let mut estimate = profile.base_yield;
    estimate -= profile.ideal_temperature.deviation(request.temperature) * TEMPERATURE_PENALTY;
    estimate -= profile.optimal_rainfall.deviation(request.rainfall) * RAINFALL_PENALTY;

    if let Some(planted) = planted {
        estimate *= planting_age_factor(days_since_planting(planted, now));
    }

    estimate
}

/// Run the full estimator for a validated request
pub fn estimate_yield(request: &YieldRequest, now: NaiveDateTime) -> YieldResult {
    estimate_yield_for(request, request.planted_on().ok().flatten(), now)
}

/// Run the estimator with an already parsed planting date.
///
/// `request.planting_date` is not consulted; `planted` replaces it.
pub fn estimate_yield_for(
    request: &YieldRequest,
    planted: Option<NaiveDate>,
    now: NaiveDateTime,
) -> YieldResult {
    let estimate = raw_yield_for(request, planted, now);

    YieldResult {
        predicted_yield: round_dp(estimate, 2),
        confidence: confidence_score(estimate),
        tips: advisory_tips(&request.crop_type),
    }
}
