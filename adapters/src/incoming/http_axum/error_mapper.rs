use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use domain::error::DomainError;
use lunar_tiles_application::error::AppError;

#[derive(Debug)]
pub struct HttpError(pub AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        match app_error {
            AppError::Domain(_)
            | AppError::ProductNotFound { .. }
            | AppError::InvalidZoom { .. }
            | AppError::ValidationError { .. } => {
                debug!("Client error response generated: {}", app_error);
            }
            _ => {
                error!("Server error response generated: {}", app_error);
            }
        }

        let (status_code, message) = match app_error {
            AppError::Domain(DomainError::InvalidRegion(_)) | AppError::ValidationError { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, app_error.to_string())
            }

            AppError::Domain(_) | AppError::InvalidZoom { .. } => {
                (StatusCode::BAD_REQUEST, app_error.to_string())
            }

            AppError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, app_error.to_string()),

            AppError::ConfigError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),

            AppError::StorageError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Tile storage error".to_string(),
            ),

            AppError::CodecError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Codec error".to_string())
            }

            AppError::ExternalServiceError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "External service error".to_string(),
            ),

            AppError::TaskError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let error_response = json!({
            "ok": false,
            "error": message,
            "status": status_code.as_u16()
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<AppError> for HttpError {
    fn from(app_error: AppError) -> Self {
        HttpError(app_error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = HttpError(error).into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_with_message() {
        let (status, body) = render(AppError::ProductNotFound {
            product: "mars".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Product 'mars' not found");
    }

    #[tokio::test]
    async fn bad_zoom_and_domain_errors_are_bad_requests() {
        let (status, body) = render(AppError::InvalidZoom {
            product: "wac_global".to_string(),
            zoom: 9,
            max_zoom: 8,
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Valid range: 0-8"));

        let (status, _) =
            render(AppError::Domain(DomainError::InvalidProductId("Mars!".to_string()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn region_and_validation_failures_are_unprocessable() {
        let (status, body) =
            render(AppError::Domain(DomainError::InvalidRegion("too large".to_string()))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], 422);

        let (status, body) = render(AppError::ValidationError {
            message: "row must be a non-negative integer, got 'x'".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn storage_details_are_not_leaked() {
        let (status, body) = render(AppError::StorageError {
            message: "write /srv/tiles/x: permission denied".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Tile storage error");
    }
}
