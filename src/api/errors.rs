use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::{CoastError, ErrorCategory};

impl IntoResponse for CoastError {
    fn into_response(self) -> axum::response::Response {
        let class = self.classify();
        let status = match (&self, class.category) {
            (CoastError::NotFound(_), _) => StatusCode::NOT_FOUND,
            (CoastError::Config(_), _) | (CoastError::Io(_), _) => StatusCode::INTERNAL_SERVER_ERROR,
            (_, ErrorCategory::InputValidation) => StatusCode::BAD_REQUEST,
            (_, ErrorCategory::CapabilityUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
            (_, ErrorCategory::ExternalFailure | ErrorCategory::Internal) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({"error": self.to_string(), "type": class.error_type}))).into_response()
    }
}
