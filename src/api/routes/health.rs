use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.platform.snapshot().await;
    Json(json!({
        "status": "healthy",
        "service": "coastsense",
        "version": env!("CARGO_PKG_VERSION"),
        "build": env!("BUILD_TIMESTAMP"),
        "commit": env!("GIT_HASH"),
        "started_at": state.started_at.to_rfc3339(),
        "generation": snapshot.generation,
        "geolocation": state.platform.geolocation_supported(),
    }))
}
