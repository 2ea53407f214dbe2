use serde::{Deserialize, Serialize};

use crate::domain::SessionId;

pub const LOGIN_ROUTE: &[&str] = &["api", "login"];
pub const DASHBOARD_ROUTE: &[&str] = &["api", "dashboard"];
pub const SUBJECTS_ROUTE: &[&str] = &["api", "asignaturas", "parsed"];

/// Body of a successful `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_ignores_extra_fields() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"message":"Login correcto!","sessionId":"abc123"}"#)
                .expect("decode");
        assert_eq!(body.session_id, SessionId::from("abc123"));
        assert_eq!(body.message.as_deref(), Some("Login correcto!"));
    }
}
