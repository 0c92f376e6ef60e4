//! OpenAPI document generated from the handler declarations.

use utoipa::OpenApi;

use super::handlers;
use crate::error::ErrorBody;

/// OpenAPI description of the public routes.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::root, handlers::health, handlers::ping, handlers::echo),
    components(schemas(
        handlers::ServiceInfo,
        handlers::HealthStatus,
        handlers::PingStatus,
        handlers::EchoResponse,
        ErrorBody
    )),
    tags((name = "Service", description = "Informational, health and echo endpoints"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/ping", "/echo"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn echo_documents_json_request_body() {
        let doc = ApiDoc::openapi();
        let echo = doc.paths.paths["/echo"].post.as_ref().expect("POST /echo");
        let body = echo.request_body.as_ref().expect("request body");
        assert!(body.content.contains_key("application/json"));
    }
}
