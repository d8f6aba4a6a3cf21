use axum::{extract::State, Json};

use crate::api::AppState;
use crate::geo::LocationOutcome;

/// Never fails; denial and timeouts come back as a `failed` outcome.
pub async fn request_location(State(state): State<AppState>) -> Json<LocationOutcome> {
    Json(state.platform.request_location().await)
}
