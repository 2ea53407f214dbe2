//! Login screen state machine: `Idle -> Submitting -> (Success | Failed) -> Idle`.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{
    domain::Credentials,
    error::{DebugDetails, DebugField, FailureKind},
    rut::format_rut,
};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{ClientError, PortalApi};

pub const BUSY_LABEL: &str = "Ingresando...";
pub const CONNECTIVITY_FAILURE_MESSAGE: &str =
    "No se pudo conectar con el servidor. Asegúrate de que el backend esté corriendo.";

/// Login page surface the flow drives.
pub trait LoginView: Send + Sync {
    fn set_identifier(&self, value: &str);
    fn submit_label(&self) -> String;
    fn set_submit_control(&self, label: &str, enabled: bool);
    /// Blocking, user-visible alert.
    fn alert(&self, message: &str);
    /// Replaces the current page.
    fn navigate(&self, url: &Url);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigated(Url),
    Failed(FailureKind),
    /// A submit arrived while another one was still in flight.
    Ignored,
}

pub struct LoginFlow {
    api: Arc<dyn PortalApi>,
    view: Arc<dyn LoginView>,
    dashboard_url: Url,
    submitting: AtomicBool,
}

/// Puts the submit control back and returns the flow to `Idle` when dropped.
struct SubmitGuard<'a> {
    flow: &'a LoginFlow,
    original_label: String,
    restore_control: bool,
}

impl SubmitGuard<'_> {
    fn page_replaced(&mut self) {
        self.restore_control = false;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.restore_control {
            self.flow
                .view
                .set_submit_control(&self.original_label, true);
        }
        self.flow.submitting.store(false, Ordering::Release);
    }
}

impl LoginFlow {
    pub fn new(api: Arc<dyn PortalApi>, view: Arc<dyn LoginView>, dashboard_url: Url) -> Self {
        Self {
            api,
            view,
            dashboard_url,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Reformats the identifier field after each keystroke.
    pub fn on_rut_input(&self, raw: &str) -> String {
        let formatted = format_rut(raw);
        self.view.set_identifier(&formatted);
        formatted
    }

    pub async fn submit(&self, rut: &str, password: &str) -> LoginOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("login submit ignored while another is in flight");
            return LoginOutcome::Ignored;
        }

        let mut guard = SubmitGuard {
            flow: self,
            original_label: self.view.submit_label(),
            restore_control: true,
        };
        self.view.set_submit_control(BUSY_LABEL, false);

        let credentials = Credentials {
            rut: format_rut(rut),
            password: password.to_string(),
        };

        match self.api.login(&credentials).await {
            Ok(session) => {
                let target = session.attach_to(&self.dashboard_url);
                info!(dashboard = %self.dashboard_url, "login accepted");
                guard.page_replaced();
                self.view.navigate(&target);
                LoginOutcome::Navigated(target)
            }
            Err(err) => {
                let kind = self.report_failure(&err);
                drop(guard);
                LoginOutcome::Failed(kind)
            }
        }
    }

    fn report_failure(&self, err: &ClientError) -> FailureKind {
        match err {
            ClientError::Rejected {
                status,
                message: Some(message),
                details,
            } => {
                warn!(status, "login rejected");
                let alert = match details {
                    Some(details) => {
                        if let Some(snippet) = &details.body_snippet {
                            debug!(body_snippet = %snippet, "login rejection response body");
                        }
                        rejection_alert(message, details)
                    }
                    None => message.clone(),
                };
                self.view.alert(&alert);
                FailureKind::ServerRejected
            }
            other => {
                error!(error = %other, "login request could not complete");
                self.view.alert(CONNECTIVITY_FAILURE_MESSAGE);
                FailureKind::TransportFailure
            }
        }
    }
}

/// Server message followed by the developer diagnostics block.
pub fn rejection_alert(message: &str, details: &DebugDetails) -> String {
    format!(
        "{message}\n\n--- DEBUG INFO ---\nStatus Code Recibido: {}\nRedirigido a: {}\n",
        DebugField(details.status_code.as_ref()),
        DebugField(details.location.as_ref()),
    )
}

#[cfg(test)]
#[path = "tests/login_tests.rs"]
mod tests;
