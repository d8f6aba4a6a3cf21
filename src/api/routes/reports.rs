use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::models::{FilterRequest, ReportListResponse};
use crate::api::AppState;
use crate::errors::CoastError;
use crate::models::{HazardReport, ReportSubmission};

/// Reports matching the query-string filter. Does not change the map.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(filter): Query<FilterRequest>,
) -> Result<Json<ReportListResponse>, CoastError> {
    let criteria = filter.into_criteria(Utc::now())?;
    let reports: Vec<HazardReport> = state
        .platform
        .reports(&criteria)
        .await?
        .iter()
        .map(|r| r.as_ref().clone())
        .collect();
    Ok(Json(ReportListResponse { total: reports.len(), reports }))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HazardReport>, CoastError> {
    let id = Uuid::parse_str(&id).map_err(|_| CoastError::NotFound(format!("report {}", id)))?;
    let report = state.platform.report(&id).await?;
    Ok(Json(report.as_ref().clone()))
}

pub async fn submit_report(
    State(state): State<AppState>,
    Json(submission): Json<ReportSubmission>,
) -> Result<(StatusCode, Json<HazardReport>), CoastError> {
    let stored = state.platform.submit_report(&submission).await?;
    Ok((StatusCode::CREATED, Json(stored.as_ref().clone())))
}
