//! HTTP handler for live field insights

use axum::{extract::State, Json};
use shared::{InsightRequest, InsightResult};

use super::JsonBody;
use crate::error::AppResult;
use crate::services::InsightService;
use crate::AppState;

/// Derive soil and irrigation insights from the current weather at a location
pub async fn field_insights(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<InsightRequest>,
) -> AppResult<Json<InsightResult>> {
    let service = InsightService::new(state.weather.clone());
    let insights = service.insights(&request).await?;
    Ok(Json(insights))
}
