use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::api::models::FilterRequest;
use crate::api::AppState;
use crate::errors::CoastError;
use crate::pipeline::RenderSnapshot;
use crate::platform::FilterOutcome;

pub async fn get_view(State(state): State<AppState>) -> Json<RenderSnapshot> {
    Json(state.platform.snapshot().await)
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.platform.snapshot().await;
    Json(json!({
        "generation": snapshot.generation,
        "stats": snapshot.stats,
        "displayed": snapshot.displayed,
    }))
}

pub async fn apply_filters(
    State(state): State<AppState>,
    Json(filter): Json<FilterRequest>,
) -> Result<Json<FilterOutcome>, CoastError> {
    let criteria = filter.into_criteria(Utc::now())?;
    Ok(Json(state.platform.apply_filters(criteria).await?))
}
