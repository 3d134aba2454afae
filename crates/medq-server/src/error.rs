use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use medq_queue::{QueueError, QueueErrorKind};

/// API-boundary error: every queue failure crosses into HTTP as a
/// structured JSON body with the taxonomy kind, so callers can branch
/// without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Queue(#[from] QueueError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Queue(err) => match err.kind() {
                QueueErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
                QueueErrorKind::NoAvailableCounter => {
                    (StatusCode::CONFLICT, "no_available_counter")
                }
                QueueErrorKind::InvalidTransition => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_transition")
                }
                QueueErrorKind::RoutingFailed => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "routing_failed")
                }
                QueueErrorKind::Storage => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!(kind, error = %self, "request failed");
        }
        let body = json!({
            "error": {
                "kind": kind,
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
