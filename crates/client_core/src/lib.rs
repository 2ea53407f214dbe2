use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Credentials, DashboardSnapshot, Program, SessionId, Subject},
    error::ErrorBody,
    protocol::{LoginResponse, DASHBOARD_ROUTE, LOGIN_ROUTE, SUBJECTS_ROUTE},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod login;
pub mod render;

pub use dashboard::{DashboardFlow, DashboardPhase, DashboardView, LoadOutcome};
pub use error::ClientError;
pub use login::{LoginFlow, LoginOutcome, LoginView};

/// The three calls the portal front end makes against the grade API.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<SessionId, ClientError>;
    async fn dashboard(&self, session: &SessionId) -> Result<DashboardSnapshot, ClientError>;
    async fn subjects(
        &self,
        session: &SessionId,
        program: &Program,
    ) -> Result<Vec<Subject>, ClientError>;
}

pub struct PortalClient {
    http: Client,
    base_url: Url,
}

impl PortalClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, route: &[&str], session: Option<&SessionId>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(route);
            if let Some(session) = session {
                segments.push(session.as_str());
            }
        }
        Ok(url)
    }
}

async fn decode_response<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    let body = res.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&body).map_err(ClientError::from);
    }

    let (message, details) = match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(error_body) => (Some(error_body.message), error_body.details),
        Err(err) => {
            debug!(status = status.as_u16(), error = %err, "error response carried no message");
            (None, None)
        }
    };
    warn!(status = status.as_u16(), "portal api rejected request");
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
        details,
    })
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn login(&self, credentials: &Credentials) -> Result<SessionId, ClientError> {
        let res = self
            .http
            .post(self.endpoint(LOGIN_ROUTE, None)?)
            .json(credentials)
            .send()
            .await?;
        let body: LoginResponse = decode_response(res).await?;
        Ok(body.session_id)
    }

    async fn dashboard(&self, session: &SessionId) -> Result<DashboardSnapshot, ClientError> {
        let res = self
            .http
            .get(self.endpoint(DASHBOARD_ROUTE, Some(session))?)
            .send()
            .await?;
        decode_response(res).await
    }

    async fn subjects(
        &self,
        session: &SessionId,
        program: &Program,
    ) -> Result<Vec<Subject>, ClientError> {
        let res = self
            .http
            .post(self.endpoint(SUBJECTS_ROUTE, Some(session))?)
            .json(program)
            .send()
            .await?;
        decode_response(res).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
