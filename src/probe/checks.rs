//! Probe endpoints and response evaluation.

use serde_json::{json, Value};
use strum::{Display, EnumIter};

/// Endpoint exercised by a probe check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Endpoint {
    /// `GET /`
    #[strum(serialize = "GET /")]
    Root,
    /// `GET /health`
    #[strum(serialize = "GET /health")]
    Health,
    /// `GET /ping`
    #[strum(serialize = "GET /ping")]
    Ping,
    /// `POST /echo`
    #[strum(serialize = "POST /echo")]
    Echo,
}

impl Endpoint {
    /// Request path, relative to the target base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Root => "",
            Endpoint::Health => "health",
            Endpoint::Ping => "ping",
            Endpoint::Echo => "echo",
        }
    }

    /// HTTP method used for the check.
    pub fn method(self) -> reqwest::Method {
        match self {
            Endpoint::Echo => reqwest::Method::POST,
            _ => reqwest::Method::GET,
        }
    }

    /// Whether a service may legitimately lack this route.
    pub fn is_optional(self) -> bool {
        matches!(self, Endpoint::Ping)
    }
}

/// Payload sent to `POST /echo`.
pub fn echo_payload() -> Value {
    json!({"message": "Hello from probe"})
}

/// Judge a response. `Err` carries the failure reason.
pub fn evaluate(endpoint: Endpoint, status: u16, body: &[u8]) -> Result<(), String> {
    if status != 200 {
        return Err(format!("unexpected status {status}"));
    }

    let body: Value =
        serde_json::from_slice(body).map_err(|e| format!("response is not JSON: {e}"))?;

    match endpoint {
        Endpoint::Root => {
            for field in ["message", "service", "environment", "version"] {
                if !body.get(field).is_some_and(Value::is_string) {
                    return Err(format!("missing string field `{field}`"));
                }
            }
            Ok(())
        }
        Endpoint::Health => expect_status(&body, "healthy"),
        Endpoint::Ping => expect_status(&body, "ok"),
        Endpoint::Echo => {
            let sent = echo_payload();
            match body.get("echo") {
                Some(echoed) if *echoed == sent => Ok(()),
                Some(echoed) => Err(format!("echo mismatch: sent {sent}, got {echoed}")),
                None => Err("missing field `echo`".to_string()),
            }
        }
    }
}

fn expect_status(body: &Value, expected: &str) -> Result<(), String> {
    match body.get("status").and_then(Value::as_str) {
        Some(status) if status == expected => Ok(()),
        Some(status) => Err(format!("status is {status:?}, expected {expected:?}")),
        None => Err("missing field `status`".to_string()),
    }
}
