use axum::{extract::State, Json};

use crate::api::models::{PreviewRequest, PreviewResponse};
use crate::api::AppState;

pub async fn preview_attachments(
    State(state): State<AppState>,
    Json(req): Json<PreviewRequest>,
) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        items: state.platform.preview_attachments(&req.names),
    })
}
