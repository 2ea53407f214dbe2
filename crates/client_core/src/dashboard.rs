//! Dashboard page state machine.
//!
//! `Initializing -> Ready -> Loading -> Ready -> ...`, with `Failed` reachable
//! from any fetch. Subject loads are ticketed: only the most recently issued
//! load may render.

use std::sync::Arc;

use shared::domain::{DashboardSnapshot, Program, ProgramCode, SessionId};
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use url::Url;

use crate::{
    render::{Region, View},
    PortalApi,
};

pub const LOADING_SUBJECTS: &str = "Cargando asignaturas...";
pub const NO_PROGRAMS: &str = "No se encontraron carreras.";
pub const NO_SUBJECTS: &str =
    "No se encontraron asignaturas para la carrera y período seleccionados.";
pub const DASHBOARD_LOAD_FAILED: &str = "No se pudieron cargar los datos del dashboard.";
pub const SUBJECTS_LOAD_FAILED: &str = "No se pudieron cargar las asignaturas.";

pub fn welcome_text(user_display_name: &str) -> String {
    format!("¡Bienvenido, {user_display_name}!")
}

pub trait DashboardView: Send + Sync {
    fn render(&self, region: Region, view: View);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPhase {
    Initializing,
    Ready,
    Loading,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { subjects: usize },
    Empty,
    Failed,
    /// A newer load was issued before this one resolved; nothing rendered.
    Superseded,
}

struct DashboardState {
    phase: DashboardPhase,
    session: Option<SessionId>,
    snapshot: Option<DashboardSnapshot>,
    selected: Option<ProgramCode>,
    latest_ticket: u64,
}

pub struct DashboardFlow {
    api: Arc<dyn PortalApi>,
    view: Arc<dyn DashboardView>,
    threshold: f64,
    inner: Mutex<DashboardState>,
}

impl DashboardFlow {
    pub fn new(api: Arc<dyn PortalApi>, view: Arc<dyn DashboardView>, threshold: f64) -> Arc<Self> {
        Arc::new(Self {
            api,
            view,
            threshold,
            inner: Mutex::new(DashboardState {
                phase: DashboardPhase::Initializing,
                session: None,
                snapshot: None,
                selected: None,
                latest_ticket: 0,
            }),
        })
    }

    pub async fn phase(&self) -> DashboardPhase {
        self.inner.lock().await.phase
    }

    pub async fn selected_program(&self) -> Option<ProgramCode> {
        self.inner.lock().await.selected.clone()
    }

    /// Page load: fetch the snapshot for the session carried in `page_url`
    /// and, when there is at least one program, load the first one.
    pub async fn start(&self, page_url: &Url) -> DashboardPhase {
        {
            let mut guard = self.inner.lock().await;
            guard.phase = DashboardPhase::Initializing;
            guard.session = None;
            guard.snapshot = None;
            guard.selected = None;
        }

        let Some(session) = SessionId::from_page_url(page_url) else {
            error!(page = %page_url, "dashboard opened without a session identifier");
            return self.fail_snapshot().await;
        };

        let snapshot = match self.api.dashboard(&session).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(error = %err, "dashboard snapshot fetch failed");
                return self.fail_snapshot().await;
            }
        };

        info!(programs = snapshot.programs.len(), "dashboard snapshot loaded");
        let welcome = View::Text(welcome_text(&snapshot.user_display_name));
        let first = snapshot.default_program().cloned();
        let selector = match &first {
            Some(_) => View::program_selector(&snapshot.programs),
            None => View::Text(NO_PROGRAMS.to_string()),
        };

        // Stored before the selector is shown.
        {
            let mut guard = self.inner.lock().await;
            guard.session = Some(session);
            guard.snapshot = Some(snapshot);
            guard.phase = DashboardPhase::Ready;
        }

        self.view.render(Region::Welcome, welcome);
        self.view.render(Region::ProgramSelector, selector);

        if let Some(program) = first {
            self.load_subjects(program).await;
        }
        self.phase().await
    }

    async fn fail_snapshot(&self) -> DashboardPhase {
        self.view
            .render(Region::Welcome, View::error(DASHBOARD_LOAD_FAILED));
        let mut guard = self.inner.lock().await;
        guard.phase = DashboardPhase::Failed;
        guard.phase
    }

    /// Selector change. Codes not in the snapshot are ignored.
    pub async fn select_program(&self, code: &str) -> Option<LoadOutcome> {
        let program = {
            let guard = self.inner.lock().await;
            guard.snapshot.as_ref().and_then(|s| s.program(code)).cloned()
        };
        match program {
            Some(program) => Some(self.load_subjects(program).await),
            None => {
                debug!(code, "ignoring selection of unknown program");
                None
            }
        }
    }

    pub async fn load_subjects(&self, program: Program) -> LoadOutcome {
        let (ticket, session) = {
            let mut guard = self.inner.lock().await;
            let Some(session) = guard.session.clone() else {
                debug!(program = %program.code, "subject load requested before snapshot");
                return LoadOutcome::Failed;
            };
            guard.latest_ticket += 1;
            guard.selected = Some(program.code.clone());
            guard.phase = DashboardPhase::Loading;
            self.view
                .render(Region::MainContent, View::info(LOADING_SUBJECTS));
            (guard.latest_ticket, session)
        };

        let result = self.api.subjects(&session, &program).await;

        let mut guard = self.inner.lock().await;
        if guard.latest_ticket != ticket {
            debug!(
                program = %program.code,
                ticket,
                latest = guard.latest_ticket,
                "dropping superseded subject list"
            );
            return LoadOutcome::Superseded;
        }

        let (view, outcome) = match result {
            Ok(subjects) if subjects.is_empty() => (View::info(NO_SUBJECTS), LoadOutcome::Empty),
            Ok(subjects) => (
                View::subject_grid(&subjects, self.threshold),
                LoadOutcome::Rendered {
                    subjects: subjects.len(),
                },
            ),
            Err(err) => {
                error!(program = %program.code, error = %err, "subject list fetch failed");
                (View::error(SUBJECTS_LOAD_FAILED), LoadOutcome::Failed)
            }
        };
        self.view.render(Region::MainContent, view);
        guard.phase = if outcome == LoadOutcome::Failed {
            DashboardPhase::Failed
        } else {
            DashboardPhase::Ready
        };
        outcome
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
