//! Unified error types for the service.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Process-level error type: configuration, startup and probe failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Target URL could not be parsed or joined.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error, including failure to bind the listener.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while handling a single request.
///
/// Always converted into a JSON response at the request boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body was missing or not valid JSON.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Body exceeded the configured size limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// No route matches the request path.
    #[error("route not found: {0}")]
    RouteNotFound(String),
}

/// JSON body returned for every request-level error.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
}

impl ApiError {
    /// HTTP status this error is surfaced as.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedRequest(err.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::MalformedRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self, "request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn malformed_request_maps_to_400_with_error_body() {
        let response = ApiError::MalformedRequest("EOF while parsing".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "malformed request: EOF while parsing");
    }

    #[tokio::test]
    async fn route_not_found_maps_to_404() {
        let response = ApiError::RouteNotFound("/nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "route not found: /nope");
    }

    #[tokio::test]
    async fn payload_too_large_maps_to_413_with_error_body() {
        let response = ApiError::PayloadTooLarge("length limit exceeded".into()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = body_json(response).await;
        assert_eq!(body["error"], "payload too large: length limit exceeded");
    }

    #[test]
    fn serde_errors_become_malformed_requests() {
        let err = serde_json::from_slice::<serde_json::Value>(b"{not json").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::MalformedRequest(_)));
    }
}
