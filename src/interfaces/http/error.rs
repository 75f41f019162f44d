use crate::error::GateError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GateError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            GateError::BadRequest(msg) | GateError::Payout(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            // The cause was logged when the bootstrap failed.
            GateError::Bootstrap(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "System Initialization Failed".to_string(),
            ),
            GateError::Fetch(_) => return StatusCode::BAD_GATEWAY.into_response(),
            other => {
                error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
