//! Analytics API endpoints

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::analytics::TrackRequest,
};

use super::{AdminUser, ApiJson};

/// Headline dashboard numbers
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_visitors: i64,
    pub total_page_views: i64,
    /// Contact requests plus active subscribers
    pub total_conversions: i64,
    /// Percentage with one decimal, e.g. "12.5"
    pub conversion_rate: String,
}

/// One day of the traffic chart
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficPoint {
    pub date: NaiveDate,
    pub visitors: i64,
    pub page_views: i64,
    pub conversions: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageVisits {
    pub name: String,
    pub visits: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrafficSource {
    pub name: String,
    /// Share in percent
    pub value: u32,
    pub color: String,
}

/// Dashboard statistics
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub kpis: Kpis,
    /// Oldest day first
    pub traffic_data: Vec<TrafficPoint>,
    pub page_data: Vec<PageVisits>,
    pub source_data: Vec<TrafficSource>,
}

/// Record a page view
#[utoipa::path(
    post,
    path = "/analytics/track",
    tag = "analytics",
    request_body = TrackRequest,
    responses(
        (status = 204, description = "Page view recorded"),
        (status = 400, description = "Missing path", body = crate::error::ErrorResponse),
        (status = 500, description = "Store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn track(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<TrackRequest>,
) -> AppResult<StatusCode> {
    let path = request
        .path
        .ok_or_else(|| AppError::Validation("path is required".to_string()))?;

    state
        .services
        .analytics
        .record(&path, request.is_new_visitor)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard statistics over the most recent days
#[utoipa::path(
    get,
    path = "/analytics/stats",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = AnalyticsStats),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<AnalyticsStats>> {
    let stats = state.services.analytics.summarize().await?;
    Ok(Json(stats))
}
