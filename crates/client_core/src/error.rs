use shared::error::{DebugDetails, FailureKind};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("server rejected request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
        details: Option<DebugDetails>,
    },
    #[error("could not reach server: {0}")]
    Transport(String),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("base url cannot carry a path: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Rejected { .. } => FailureKind::ServerRejected,
            Self::Transport(_) | Self::Decode(_) | Self::InvalidBaseUrl(_) => {
                FailureKind::TransportFailure
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
