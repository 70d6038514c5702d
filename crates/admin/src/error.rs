//! Unified error handling for the admin binary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::settings::SettingsError;
use crate::services::popup::PopupPublishError;

/// Application-level error type for the admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings store operation failed.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Publishing a popup config failed.
    #[error("Publish error: {0}")]
    Publish(#[from] PopupPublishError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Settings(_) | Self::Internal(_) | Self::Publish(PopupPublishError::Settings(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, message) = match &self {
            Self::Settings(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::Publish(err) => match err {
                PopupPublishError::Invalid(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
                PopupPublishError::Settings(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use fernway_core::popup::PopupConfigError;

    use super::*;

    #[test]
    fn test_invalid_publish_is_unprocessable() {
        let err = AppError::Publish(PopupPublishError::Invalid(PopupConfigError::NoSegments));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_status() {
        let err = AppError::NotFound("setting".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
