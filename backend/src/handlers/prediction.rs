//! HTTP handler for rule-based yield prediction

use axum::Json;
use shared::{YieldRequestPayload, YieldResult};

use super::JsonBody;
use crate::error::AppResult;
use crate::services::PredictionService;

/// Estimate crop yield from agronomic parameters
pub async fn predict_yield(
    JsonBody(payload): JsonBody<YieldRequestPayload>,
) -> AppResult<Json<YieldResult>> {
    let service = PredictionService::new();
    let result = service.predict(payload)?;
    Ok(Json(result))
}
