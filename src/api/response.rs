use crate::error::{AppError, AppResult};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Failure body returned for every rejected request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Log a failed result under its error kind and pass it through unchanged
pub fn observe<T>(result: AppResult<T>) -> AppResult<T> {
    if let Err(err) = &result {
        if err.is_caller_correctable() {
            warn!(kind = err.kind(), "Request rejected: {}", err);
        } else {
            error!(kind = err.kind(), "Request failed: {}", err);
        }
    }
    result
}
