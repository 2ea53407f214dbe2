//! Scripted portal and recording view shared by the flow tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use shared::domain::{Credentials, DashboardSnapshot, Program, ProgramCode, SessionId, Subject};
use tokio::sync::Notify;
use url::Url;

use crate::{
    dashboard::DashboardView,
    login::LoginView,
    render::{Region, View},
    ClientError, PortalApi,
};

/// Holds a request open until the test releases it.
#[derive(Default)]
pub(crate) struct Gate {
    started: Notify,
    release: Notify,
}

impl Gate {
    pub(crate) async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub(crate) fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.started.notify_one();
        self.release.notified().await;
    }
}

pub(crate) fn transport_error() -> ClientError {
    ClientError::Transport("connection refused".into())
}

pub(crate) fn rejected(status: u16, message: Option<&str>) -> ClientError {
    ClientError::Rejected {
        status,
        message: message.map(str::to_string),
        details: None,
    }
}

pub(crate) fn subject(name: &str, average: f64) -> Subject {
    Subject {
        name: name.to_string(),
        average,
    }
}

pub(crate) fn snapshot(name: &str, programs: Vec<Program>) -> DashboardSnapshot {
    DashboardSnapshot {
        user_display_name: name.to_string(),
        programs,
    }
}

pub(crate) struct FakePortal {
    login_result: Result<SessionId, ClientError>,
    login_gate: Option<Arc<Gate>>,
    dashboard_result: Result<DashboardSnapshot, ClientError>,
    subjects: HashMap<String, Result<Vec<Subject>, ClientError>>,
    subject_gates: HashMap<String, Arc<Gate>>,
    pub(crate) login_calls: Mutex<Vec<Credentials>>,
    pub(crate) dashboard_calls: AtomicUsize,
    pub(crate) subject_calls: Mutex<Vec<(SessionId, ProgramCode)>>,
}

impl FakePortal {
    pub(crate) fn new() -> Self {
        Self {
            login_result: Ok(SessionId::from("abc123")),
            login_gate: None,
            dashboard_result: Err(transport_error()),
            subjects: HashMap::new(),
            subject_gates: HashMap::new(),
            login_calls: Mutex::new(Vec::new()),
            dashboard_calls: AtomicUsize::new(0),
            subject_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_login(mut self, result: Result<SessionId, ClientError>) -> Self {
        self.login_result = result;
        self
    }

    pub(crate) fn with_login_gate(mut self, gate: Arc<Gate>) -> Self {
        self.login_gate = Some(gate);
        self
    }

    pub(crate) fn with_dashboard(mut self, result: Result<DashboardSnapshot, ClientError>) -> Self {
        self.dashboard_result = result;
        self
    }

    pub(crate) fn with_subjects(
        mut self,
        code: &str,
        result: Result<Vec<Subject>, ClientError>,
    ) -> Self {
        self.subjects.insert(code.to_string(), result);
        self
    }

    pub(crate) fn with_subject_gate(mut self, code: &str, gate: Arc<Gate>) -> Self {
        self.subject_gates.insert(code.to_string(), gate);
        self
    }

    pub(crate) fn dashboard_call_count(&self) -> usize {
        self.dashboard_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn subject_codes(&self) -> Vec<String> {
        self.subject_calls
            .lock()
            .expect("subject calls")
            .iter()
            .map(|(_, code)| code.0.clone())
            .collect()
    }
}

#[async_trait]
impl PortalApi for FakePortal {
    async fn login(&self, credentials: &Credentials) -> Result<SessionId, ClientError> {
        self.login_calls
            .lock()
            .expect("login calls")
            .push(credentials.clone());
        if let Some(gate) = &self.login_gate {
            gate.pass().await;
        }
        self.login_result.clone()
    }

    async fn dashboard(&self, _session: &SessionId) -> Result<DashboardSnapshot, ClientError> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        self.dashboard_result.clone()
    }

    async fn subjects(
        &self,
        session: &SessionId,
        program: &Program,
    ) -> Result<Vec<Subject>, ClientError> {
        self.subject_calls
            .lock()
            .expect("subject calls")
            .push((session.clone(), program.code.clone()));
        if let Some(gate) = self.subject_gates.get(program.code.as_str()) {
            gate.pass().await;
        }
        self.subjects
            .get(program.code.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub(crate) struct RecordingView {
    pub(crate) identifier: Mutex<String>,
    pub(crate) label: Mutex<String>,
    pub(crate) enabled: Mutex<bool>,
    pub(crate) control_history: Mutex<Vec<(String, bool)>>,
    pub(crate) alerts: Mutex<Vec<String>>,
    pub(crate) navigations: Mutex<Vec<Url>>,
    pub(crate) renders: Mutex<Vec<(Region, View)>>,
}

impl RecordingView {
    pub(crate) fn with_label(label: &str) -> Arc<Self> {
        Arc::new(Self {
            identifier: Mutex::new(String::new()),
            label: Mutex::new(label.to_string()),
            enabled: Mutex::new(true),
            control_history: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
            renders: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn label(&self) -> String {
        self.label.lock().expect("label").clone()
    }

    pub(crate) fn enabled(&self) -> bool {
        *self.enabled.lock().expect("enabled")
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts").clone()
    }

    pub(crate) fn navigations(&self) -> Vec<Url> {
        self.navigations.lock().expect("navigations").clone()
    }

    pub(crate) fn renders_in(&self, region: Region) -> Vec<View> {
        self.renders
            .lock()
            .expect("renders")
            .iter()
            .filter(|(r, _)| *r == region)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub(crate) fn last_render(&self, region: Region) -> Option<View> {
        self.renders_in(region).pop()
    }
}

impl LoginView for RecordingView {
    fn set_identifier(&self, value: &str) {
        *self.identifier.lock().expect("identifier") = value.to_string();
    }

    fn submit_label(&self) -> String {
        self.label()
    }

    fn set_submit_control(&self, label: &str, enabled: bool) {
        *self.label.lock().expect("label") = label.to_string();
        *self.enabled.lock().expect("enabled") = enabled;
        self.control_history
            .lock()
            .expect("control history")
            .push((label.to_string(), enabled));
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().expect("alerts").push(message.to_string());
    }

    fn navigate(&self, url: &Url) {
        self.navigations.lock().expect("navigations").push(url.clone());
    }
}

impl DashboardView for RecordingView {
    fn render(&self, region: Region, view: View) {
        self.renders.lock().expect("renders").push((region, view));
    }
}
