//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::{ApiError, ErrorBody};

/// Immutable identity of the running service, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    /// Service name echoed in every body.
    pub service: String,
    /// Deployment environment label.
    pub environment: String,
    /// Service version string.
    pub version: String,
}

impl ServiceIdentity {
    /// Build the identity from configuration, stamping the crate version.
    pub fn from_config(config: &Config) -> Self {
        Self {
            service: config.service_name.clone(),
            environment: config.environment.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only service identity.
    pub identity: Arc<ServiceIdentity>,
    /// Prometheus render handle, present when a recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(identity: ServiceIdentity) -> Self {
        Self {
            identity: Arc::new(identity),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("identity", &self.identity)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Root endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Greeting.
    pub message: String,
    /// Service name.
    pub service: String,
    /// Deployment environment.
    pub environment: String,
    /// Service version.
    pub version: String,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always "healthy".
    pub status: String,
    /// Service name.
    pub service: String,
}

/// Ping response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PingStatus {
    /// Always "ok".
    pub status: String,
}

/// Echo response wrapping the request payload unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EchoResponse {
    /// The parsed request body.
    #[schema(value_type = Object)]
    pub echo: Value,
    /// Service name.
    pub service: String,
}

/// Service information.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service information", body = ServiceInfo)),
    tag = "Service"
)]
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    let identity = &state.identity;
    Json(ServiceInfo {
        message: format!("Hello from {}!", identity.service),
        service: identity.service.clone(),
        environment: identity.environment.clone(),
        version: identity.version.clone(),
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = HealthStatus)),
    tag = "Service"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        service: state.identity.service.clone(),
    })
}

/// Lightweight probe with no dependency on service identity.
#[utoipa::path(
    get,
    path = "/ping",
    responses((status = 200, description = "Process is accepting requests", body = PingStatus)),
    tag = "Service"
)]
pub async fn ping() -> Json<PingStatus> {
    Json(PingStatus {
        status: "ok".to_string(),
    })
}

/// Echo the JSON request body back to the caller.
///
/// The body is parsed as JSON regardless of `Content-Type`. An empty or
/// unparseable body is a `MalformedRequest`; a body over the size limit is
/// `PayloadTooLarge`.
#[utoipa::path(
    post,
    path = "/echo",
    request_body(content = Object, content_type = "application/json", description = "Any JSON value"),
    responses(
        (status = 200, description = "Payload echoed back", body = EchoResponse),
        (status = 400, description = "Body missing or not valid JSON", body = ErrorBody),
        (status = 413, description = "Body over the configured size limit", body = ErrorBody)
    ),
    tag = "Service"
)]
pub async fn echo(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<EchoResponse>, ApiError> {
    let body = body?;
    if body.is_empty() {
        return Err(ApiError::MalformedRequest("request body is empty".to_string()));
    }

    let echo: Value = serde_json::from_slice(&body)?;
    debug!(bytes = body.len(), "echoing payload");

    Ok(Json(EchoResponse {
        echo,
        service: state.identity.service.clone(),
    }))
}

/// Prometheus exposition, or 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => ApiError::RouteNotFound("/metrics".to_string()).into_response(),
    }
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
