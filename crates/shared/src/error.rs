use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a request issued by a flow failed. Empty results and an empty RUT are
/// not failures and have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The server answered with a non-2xx status.
    ServerRejected,
    /// No usable response could be obtained.
    TransportFailure,
}

/// Error-shaped JSON returned by the portal API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DebugDetails>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

/// Diagnostics attached to a rejected login. Only ever shown to developers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugDetails {
    #[serde(
        rename = "debug_statusCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_code: Option<Value>,
    #[serde(
        rename = "debug_location",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Value>,
    #[serde(
        rename = "debug_bodySnippet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub body_snippet: Option<String>,
}

/// Renders a loosely typed diagnostic field for humans.
pub struct DebugField<'a>(pub Option<&'a Value>);

impl fmt::Display for DebugField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None | Some(Value::Null) => f.write_str("desconocido"),
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{other}"),
        }
    }
}
