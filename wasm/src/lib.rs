//! WebAssembly module for the crop advisor
//!
//! Provides client-side computation for:
//! - Yield estimation with the same rules as `/predict`
//! - Soil and irrigation insights from a known weather reading
//! - Crop profile lookups for form hints

use chrono::{NaiveDate, NaiveDateTime};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Estimate yield from a JSON request, using the browser's local clock
#[wasm_bindgen]
pub fn estimate_crop_yield(request_json: &str) -> Result<String, JsValue> {
    estimate_with_clock(request_json, browser_now()).map_err(|e| JsValue::from_str(&e))
}

/// Derive soil and irrigation insights as JSON
#[wasm_bindgen]
pub fn derive_field_insights(temp: f64, rainfall: f64, humidity: f64) -> Result<String, JsValue> {
    insights_json(temp, rainfall, humidity).map_err(|e| JsValue::from_str(&e))
}

/// Irrigation status label for a rainfall amount (mm)
#[wasm_bindgen]
pub fn irrigation_status(rainfall: f64) -> String {
    IrrigationInsight::for_rainfall(rainfall).status.to_string()
}

/// Base yield for a crop under ideal conditions
#[wasm_bindgen]
pub fn crop_base_yield(crop: &str) -> f64 {
    CropProfile::for_crop(crop).base_yield
}

/// Whether a planting date string will be taken into account
#[wasm_bindgen]
pub fn is_valid_planting_date(input: &str) -> bool {
    parse_planting_date(input).is_ok()
}

/// Yield estimation without any browser APIs
pub fn estimate_with_clock(request_json: &str, now: NaiveDateTime) -> Result<String, String> {
    // Empty input and `null` both mean "no fields"
    let payload: YieldRequestPayload = if request_json.trim().is_empty() {
        YieldRequestPayload::default()
    } else {
        serde_json::from_str::<Option<YieldRequestPayload>>(request_json)
            .map_err(|e| format!("Invalid request JSON: {}", e))?
            .unwrap_or_default()
    };
    let request = YieldRequest::try_from(payload).map_err(|e| e.to_string())?;

    serde_json::to_string(&estimate_yield(&request, now)).map_err(|e| e.to_string())
}

fn insights_json(temp: f64, rainfall: f64, humidity: f64) -> Result<String, String> {
    let reading = WeatherReading {
        temp,
        humidity,
        rainfall,
    };
    serde_json::to_string(&derive_insights(&reading)).map_err(|e| e.to_string())
}

fn browser_now() -> NaiveDateTime {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .and_then(|date| date.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
        .unwrap_or_default()
}
