use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use menage_core::error::CoreError;

/// Error surface of the HTTP API.
///
/// Wraps [`CoreError`] so handlers can use `?`; the response body never
/// exposes driver-level detail.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    Unauthorized,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Core(CoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Unauthorized => "authentication required".to_string(),
            ApiError::Core(CoreError::NotFound(id)) => format!("task not found: {id}"),
            ApiError::Core(CoreError::InvalidInput(msg)) => msg.clone(),
            ApiError::Core(err) => {
                error!(error = %err, "request failed");
                "internal server error".to_string()
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_error_taxonomy() {
        assert_eq!(
            ApiError::Core(CoreError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Core(CoreError::InvalidInput("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        assert_eq!(
            ApiError::Core(CoreError::Io(io)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }
}
