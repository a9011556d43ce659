use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a new validation error
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new conflict error
    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a new not found error
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new upstream service error
    pub fn upstream<T: Into<String>>(msg: T) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new internal error
    pub fn internal<T: Into<String>>(msg: T) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Client-facing bodies are {message, error?}; detail only on 5xx.
        let (status, message, detail) = match self {
            ApiError::Database(ref err) => {
                tracing::error!(error = %err, "database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    Some(err.to_string()),
                )
            }
            ApiError::Migration(ref err) => {
                tracing::error!(error = %err, "database migration failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database migration error".to_string(),
                    Some(err.to_string()),
                )
            }
            ApiError::Validation(msg) => {
                tracing::warn!(error = %msg, "validation error occurred");
                (StatusCode::BAD_REQUEST, msg, None)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(error = %msg, "conflict error occurred");
                (StatusCode::CONFLICT, msg, None)
            }
            ApiError::NotFound(msg) => {
                tracing::info!(error = %msg, "resource not found");
                (StatusCode::NOT_FOUND, msg, None)
            }
            ApiError::MissingToken => {
                tracing::debug!("request without access token");
                (
                    StatusCode::UNAUTHORIZED,
                    "Access token required".to_string(),
                    None,
                )
            }
            ApiError::InvalidToken => {
                tracing::debug!("request with invalid or expired token");
                (
                    StatusCode::FORBIDDEN,
                    "Invalid or expired token".to_string(),
                    None,
                )
            }
            ApiError::InvalidCredentials => {
                tracing::warn!("login with invalid credentials");
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid email or password".to_string(),
                    None,
                )
            }
            ApiError::Upstream(ref msg) => {
                tracing::error!(error = %msg, "upstream service error occurred");
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream service error".to_string(),
                    Some(msg.clone()),
                )
            }
            ApiError::NotImplemented(msg) => {
                tracing::info!(error = %msg, "unimplemented endpoint called");
                (StatusCode::NOT_IMPLEMENTED, msg, None)
            }
            ApiError::Config(ref err) => {
                tracing::error!(error = %err, "configuration error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                    Some(err.to_string()),
                )
            }
            ApiError::Internal(ref msg) => {
                tracing::error!(error = %msg, "internal server error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = match detail {
            Some(detail) => Json(json!({ "message": message, "error": detail })),
            None => Json(json!({ "message": message })),
        };

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn validation_handler() -> Result<&'static str, ApiError> {
        Err(ApiError::validation(
            "Name, email, phone, and password are required",
        ))
    }

    async fn conflict_handler() -> Result<&'static str, ApiError> {
        Err(ApiError::conflict(
            "Company with this email or phone already exists",
        ))
    }

    async fn missing_token_handler() -> Result<&'static str, ApiError> {
        Err(ApiError::MissingToken)
    }

    async fn invalid_token_handler() -> Result<&'static str, ApiError> {
        Err(ApiError::InvalidToken)
    }

    async fn upstream_handler() -> Result<&'static str, ApiError> {
        Err(ApiError::upstream("image store unreachable"))
    }

    fn test_app() -> Router {
        Router::new()
            .route("/validation", get(validation_handler))
            .route("/conflict", get(conflict_handler))
            .route("/missing-token", get(missing_token_handler))
            .route("/invalid-token", get(invalid_token_handler))
            .route("/upstream", get(upstream_handler))
    }

    async fn status_for(path: &str) -> StatusCode {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        test_app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_status_mapping() {
        assert_eq!(status_for("/validation").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/conflict").await, StatusCode::CONFLICT);
        assert_eq!(status_for("/missing-token").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for("/invalid-token").await, StatusCode::FORBIDDEN);
        assert_eq!(status_for("/upstream").await, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let request = Request::builder()
            .uri("/validation")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            body["message"],
            "Name, email, phone, and password are required"
        );
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_upstream_body_carries_detail() {
        let request = Request::builder()
            .uri("/upstream")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Upstream service error");
        assert_eq!(body["error"], "image store unreachable");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(ApiError::validation("x"), ApiError::Validation(_)));
        assert!(matches!(ApiError::conflict("x"), ApiError::Conflict(_)));
        assert!(matches!(ApiError::not_found("x"), ApiError::NotFound(_)));
        assert!(matches!(ApiError::upstream("x"), ApiError::Upstream(_)));
        assert!(matches!(ApiError::internal("x"), ApiError::Internal(_)));
    }
}
