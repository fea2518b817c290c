//! Crop yield prediction service

use chrono::{Local, NaiveDateTime};
use shared::{estimate_yield_for, YieldRequest, YieldRequestPayload, YieldResult};

use crate::error::AppResult;

/// Yield prediction service wrapping the rule engine
#[derive(Clone, Default)]
pub struct PredictionService;

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new() -> Self {
        Self
    }

    /// Validate the payload and estimate yield against the local wall clock
    pub fn predict(&self, payload: YieldRequestPayload) -> AppResult<YieldResult> {
        self.predict_at(payload, Local::now().naive_local())
    }

    /// Same as [`predict`](Self::predict) with an explicit "now"
    pub fn predict_at(
        &self,
        payload: YieldRequestPayload,
        now: NaiveDateTime,
    ) -> AppResult<YieldResult> {
        let request = YieldRequest::try_from(payload)?;

        let planted = request.planted_on().unwrap_or_else(|err| {
            tracing::debug!("Ignoring planting date: {}", err);
            None
        });

        let result = estimate_yield_for(&request, planted, now);

        tracing::info!(
            crop = %request.crop_type,
            temperature = request.temperature,
            rainfall = request.rainfall,
            predicted_yield = result.predicted_yield,
            confidence = result.confidence,
            "Yield predicted"
        );

        Ok(result)
    }
}
