//! Service configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

/// Service configuration loaded from environment variables.
///
/// Read once at process start and treated as immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Identity ===
    /// Deployment environment label reported by `GET /`.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Service name reported in every response body.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    // === Server Configuration ===
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    // === Optional Surfaces ===
    /// Attach permissive CORS headers to every response.
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Serve Swagger UI at `/docs` and the OpenAPI document at `/openapi.json`.
    #[serde(default)]
    pub docs_enabled: bool,

    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_service_name() -> String {
    "Axum API".to_string()
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            service_name: default_service_name(),
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            cors_enabled: true,
            docs_enabled: false,
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.trim().is_empty() {
            return Err("ENVIRONMENT must not be empty".to_string());
        }

        if self.service_name.trim().is_empty() {
            return Err("SERVICE_NAME must not be empty".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.max_body_bytes == 0 {
            return Err("MAX_BODY_BYTES must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
