//! Yield prediction tests
//!
//! Covers the rule engine directly and the `/predict` endpoint end to end.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use shared::{
    confidence_score, estimate_yield, raw_yield_estimate, CropProfile, YieldRequest,
};

const CROPS: [&str; 3] = ["wheat", "rice", "maize"];

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn planted_days_ago(days: i64) -> String {
    (fixed_now().date() - Duration::days(days))
        .format("%d-%m-%Y")
        .to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Midpoints of both ideal ranges leave the base yield untouched
    #[test]
    fn test_ideal_conditions_return_base_yield() {
        for (crop, base) in [("wheat", 4.0), ("rice", 5.0), ("maize", 4.5)] {
            let profile = CropProfile::for_crop(crop);
            let temp = (profile.ideal_temperature.min + profile.ideal_temperature.max) / 2.0;
            let rain = (profile.optimal_rainfall.min + profile.optimal_rainfall.max) / 2.0;

            let result = estimate_yield(&YieldRequest::new(crop, temp, rain), fixed_now());
            assert_eq!(result.predicted_yield, base, "crop {}", crop);
        }
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let result = estimate_yield(&YieldRequest::new("wheat", 18.0, 60.0), fixed_now());
        assert_eq!(result.predicted_yield, 4.0);

        let result = estimate_yield(&YieldRequest::new("rice", 30.0, 80.0), fixed_now());
        assert_eq!(result.predicted_yield, 5.0);
    }

    #[test]
    fn test_crop_type_is_case_insensitive() {
        let lower = estimate_yield(&YieldRequest::new("rice", 35.0, 70.0), fixed_now());
        let upper = estimate_yield(&YieldRequest::new("RICE", 35.0, 70.0), fixed_now());

        assert_eq!(lower.predicted_yield, upper.predicted_yield);
        assert_eq!(upper.tips[0], "Ideal soil for Rice detected 🌱");
    }

    #[test]
    fn test_both_penalties_combine() {
        // maize: 15°C is 5 below 20, 100mm is 10 above 90
        let result = estimate_yield(&YieldRequest::new("maize", 15.0, 100.0), fixed_now());
        assert_eq!(result.predicted_yield, 2.5);
        assert_eq!(result.confidence, 82);
    }

    #[test]
    fn test_planting_date_boundaries() {
        let base = YieldRequest::new("wheat", 20.0, 50.0);

        for (days, expected) in [(59, 3.2), (60, 4.0), (180, 4.0), (181, 3.6)] {
            let request = base.clone().with_planting_date(planted_days_ago(days));
            let result = estimate_yield(&request, fixed_now());
            assert_eq!(result.predicted_yield, expected, "{} days", days);
        }
    }

    #[test]
    fn test_future_planting_date_counts_as_immature() {
        let request = YieldRequest::new("wheat", 20.0, 50.0).with_planting_date(planted_days_ago(-30));
        assert_eq!(estimate_yield(&request, fixed_now()).predicted_yield, 3.2);
    }

    #[test]
    fn test_unparsable_planting_dates_match_omitted_date() {
        let plain = estimate_yield(&YieldRequest::new("rice", 27.0, 95.0), fixed_now());

        for bad in [
            "not-a-date",
            "2024-01-15",
            "15/01/2024",
            "32-01-2024",
            " ",
            "15-01-24",
            " 15-01-2024",
            "15-01-2024 ",
            "15-01-+2024",
            "15-01-02024",
        ] {
            let request = YieldRequest::new("rice", 27.0, 95.0).with_planting_date(bad);
            assert_eq!(estimate_yield(&request, fixed_now()), plain, "date {:?}", bad);
        }
    }

    #[test]
    fn test_single_digit_day_and_month_still_age_the_crop() {
        // 5 August 2024 is 27 days before the fixed clock
        let request = YieldRequest::new("rice", 27.0, 95.0).with_planting_date("5-8-2024");
        let padded = YieldRequest::new("rice", 27.0, 95.0).with_planting_date("05-08-2024");

        assert_eq!(estimate_yield(&request, fixed_now()), estimate_yield(&padded, fixed_now()));
        assert_ne!(
            estimate_yield(&request, fixed_now()),
            estimate_yield(&YieldRequest::new("rice", 27.0, 95.0), fixed_now())
        );
    }

    #[test]
    fn test_confidence_for_negative_yield() {
        // 3.5 - 20 * 0.2 - 50 * 0.1 = -5.5 and -5.5 mod 5 = 4.5
        let result = estimate_yield(&YieldRequest::new("cassava", 0.0, 0.0), fixed_now());
        assert_eq!(result.predicted_yield, -5.5);
        assert_eq!(result.confidence, 84);
    }

    #[test]
    fn test_tips_are_fixed() {
        let result = estimate_yield(&YieldRequest::new("", 25.0, 50.0), fixed_now());
        assert_eq!(result.tips.len(), 2);
        assert_eq!(result.tips[1], "Weather conditions suggest moderate growth potential");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn crop_strategy() -> impl Strategy<Value = &'static str> {
        prop::sample::select(CROPS.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Confidence always lands in 50..=95
        #[test]
        fn prop_confidence_bounded(
            crop in "[a-z]{0,8}",
            temp in -100.0f64..100.0,
            rain in -500.0f64..2000.0,
            days in -400i64..1000
        ) {
            let request = YieldRequest::new(crop, temp, rain).with_planting_date(planted_days_ago(days));
            let result = estimate_yield(&request, fixed_now());
            prop_assert!((50..=95).contains(&result.confidence));
        }

        #[test]
        fn prop_confidence_score_bounded(estimate in -1.0e12f64..1.0e12) {
            let score = confidence_score(estimate);
            prop_assert!((50..=95).contains(&score));
        }

        /// Inside both ranges the base yield is returned exactly
        #[test]
        fn prop_in_range_returns_base(crop in crop_strategy(), t in 0.0f64..=1.0, r in 0.0f64..=1.0) {
            let profile = CropProfile::for_crop(crop);
            let temp = profile.ideal_temperature.min
                + t * (profile.ideal_temperature.max - profile.ideal_temperature.min);
            let rain = profile.optimal_rainfall.min
                + r * (profile.optimal_rainfall.max - profile.optimal_rainfall.min);
            prop_assume!(profile.ideal_temperature.contains(temp));
            prop_assume!(profile.optimal_rainfall.contains(rain));

            let result = estimate_yield(&YieldRequest::new(crop, temp, rain), fixed_now());
            prop_assert_eq!(result.predicted_yield, profile.base_yield);
        }

        /// Each degree below the minimum costs 0.2
        #[test]
        fn prop_cold_penalty(crop in crop_strategy(), delta in 1u32..40) {
            let profile = CropProfile::for_crop(crop);
            let delta = f64::from(delta);
            let temp = profile.ideal_temperature.min - delta;
            let rain = profile.optimal_rainfall.min;

            let raw = raw_yield_estimate(&YieldRequest::new(crop, temp, rain), fixed_now());
            prop_assert!((raw - (profile.base_yield - 0.2 * delta)).abs() < 1e-9);
        }

        /// Each millimetre above the maximum costs 0.1
        #[test]
        fn prop_wet_penalty(crop in crop_strategy(), delta in 1u32..200) {
            let profile = CropProfile::for_crop(crop);
            let delta = f64::from(delta);
            let temp = profile.ideal_temperature.max;
            let rain = profile.optimal_rainfall.max + delta;

            let raw = raw_yield_estimate(&YieldRequest::new(crop, temp, rain), fixed_now());
            prop_assert!((raw - (profile.base_yield - 0.1 * delta)).abs() < 1e-9);
        }

        /// Crop age scales the adjusted yield by 0.8, 1.0 or 0.9
        #[test]
        fn prop_planting_age_factor(
            crop in crop_strategy(),
            temp in 0.0f64..45.0,
            rain in 0.0f64..200.0,
            days in 0i64..400
        ) {
            let plain = YieldRequest::new(crop, temp, rain);
            let unadjusted = raw_yield_estimate(&plain, fixed_now());
            let adjusted = raw_yield_estimate(
                &plain.with_planting_date(planted_days_ago(days)),
                fixed_now(),
            );

            let factor = if days < 60 { 0.8 } else if days > 180 { 0.9 } else { 1.0 };
            prop_assert!((adjusted - unadjusted * factor).abs() < 1e-9);
        }

        /// Garbage dates never change the outcome
        #[test]
        fn prop_garbage_dates_ignored(crop in crop_strategy(), junk in "[a-z ]{1,12}") {
            let plain = YieldRequest::new(crop, 21.0, 65.0);
            prop_assert_eq!(
                estimate_yield(&plain.clone().with_planting_date(junk), fixed_now()),
                estimate_yield(&plain, fixed_now())
            );
        }
    }
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[cfg(test)]
mod endpoint_tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use crop_advisor_server::{create_app, AppState, Config, WeatherError, WeatherProvider};
    use serde_json::{json, Value};
    use shared::{Coordinate, WeatherReading};
    use tower::ServiceExt;

    struct NoWeather;

    #[async_trait]
    impl WeatherProvider for NoWeather {
        fn name(&self) -> &str {
            "none"
        }

        async fn fetch_current(
            &self,
            _latitude: &Coordinate,
            _longitude: &Coordinate,
        ) -> Result<WeatherReading, WeatherError> {
            Err(WeatherError::Request("not used".into()))
        }
    }

    fn app() -> axum::Router {
        create_app(AppState::new(Config::default(), Arc::new(NoWeather)))
    }

    async fn post(body: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/predict")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_predict_worked_example() {
        let (status, body) =
            post(r#"{"crop_type":"wheat","temperature":30,"rainfall":30}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["predicted_yield"].as_f64(), Some(2.0));
        assert_eq!(body["confidence"], json!(82));
        assert_eq!(
            body["tips"],
            json!([
                "Ideal soil for Wheat detected 🌱",
                "Weather conditions suggest moderate growth potential"
            ])
        );
    }

    #[tokio::test]
    async fn test_predict_empty_body_uses_defaults() {
        // unknown crop at 25°C / 50mm: inside both default ranges
        for body in ["", "{}", "null"] {
            let (status, json) = post(body).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["predicted_yield"].as_f64(), Some(3.5));
            assert_eq!(json["confidence"], json!(83));
        }
    }

    #[tokio::test]
    async fn test_predict_bad_date_matches_no_date() {
        let (_, with_bad) =
            post(r#"{"crop_type":"maize","temperature":22,"rainfall":40,"planting_date":"not-a-date"}"#)
                .await;
        let (_, without) = post(r#"{"crop_type":"maize","temperature":22,"rainfall":40}"#).await;

        assert_eq!(with_bad, without);
        assert_eq!(without["predicted_yield"].as_f64(), Some(3.5));
    }

    #[tokio::test]
    async fn test_predict_two_digit_year_matches_no_date() {
        let (status, with_short_year) =
            post(r#"{"crop_type":"maize","temperature":22,"rainfall":40,"planting_date":"15-03-24"}"#)
                .await;
        let (_, without) = post(r#"{"crop_type":"maize","temperature":22,"rainfall":40}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(with_short_year, without);
    }

    #[tokio::test]
    async fn test_predict_rejects_non_numeric_temperature() {
        let (status, body) = post(r#"{"crop_type":"rice","temperature":"hot"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("temperature"));
    }

    #[tokio::test]
    async fn test_predict_rejects_malformed_json() {
        let (status, body) = post(r#"{"crop_type": "rice""#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_predict_rejects_non_object_body() {
        let (status, _) = post("[1, 2, 3]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
