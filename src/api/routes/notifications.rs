use axum::{extract::State, Json};

use crate::api::AppState;
use crate::notify::surfaces::BoardEntry;

pub async fn list_notifications(State(state): State<AppState>) -> Json<Vec<BoardEntry>> {
    Json(state.notifications.entries())
}
