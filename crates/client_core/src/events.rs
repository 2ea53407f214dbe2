//! UI events and their mapping onto flow transitions.

use crate::{
    dashboard::{DashboardFlow, LoadOutcome},
    login::{LoginFlow, LoginOutcome},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The identifier field changed; carries the raw field contents.
    RutInput(String),
    SubmitLogin { rut: String, password: String },
    ProgramChanged(String),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::RutInput(_) => "rut_input",
            UiEvent::SubmitLogin { .. } => "submit_login",
            UiEvent::ProgramChanged(_) => "program_changed",
        }
    }
}

pub async fn dispatch_login_event(flow: &LoginFlow, event: UiEvent) -> Option<LoginOutcome> {
    tracing::debug!(event = event.name(), "login page event");
    match event {
        UiEvent::RutInput(raw) => {
            flow.on_rut_input(&raw);
            None
        }
        UiEvent::SubmitLogin { rut, password } => Some(flow.submit(&rut, &password).await),
        UiEvent::ProgramChanged(_) => None,
    }
}

pub async fn dispatch_dashboard_event(
    flow: &DashboardFlow,
    event: UiEvent,
) -> Option<LoadOutcome> {
    tracing::debug!(event = event.name(), "dashboard page event");
    match event {
        UiEvent::ProgramChanged(code) => flow.select_program(&code).await,
        UiEvent::RutInput(_) | UiEvent::SubmitLogin { .. } => None,
    }
}
