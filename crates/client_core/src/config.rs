use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::grades::DEFAULT_PASSING_THRESHOLD;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "portal.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Origin serving the grade API.
    pub api_base_url: String,
    /// Origin the login and dashboard documents are served from.
    pub frontend_url: String,
    /// Dashboard document, relative to `frontend_url`.
    pub dashboard_path: String,
    pub grade_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".into(),
            frontend_url: "http://localhost:8080/".into(),
            dashboard_path: "main.html".into(),
            grade_threshold: DEFAULT_PASSING_THRESHOLD,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    frontend_url: Option<String>,
    dashboard_path: Option<String>,
    grade_threshold: Option<f64>,
}

impl Settings {
    pub fn api_base(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api base url '{}'", self.api_base_url))
    }

    /// Address of the dashboard document, without session state.
    pub fn dashboard_url(&self) -> anyhow::Result<Url> {
        let frontend = Url::parse(&self.frontend_url)
            .with_context(|| format!("invalid frontend url '{}'", self.frontend_url))?;
        frontend
            .join(&self.dashboard_path)
            .with_context(|| format!("invalid dashboard path '{}'", self.dashboard_path))
    }

    /// Keeps the current threshold and logs a warning unless `raw` is a
    /// finite positive number. `source` names where the value came from.
    pub fn set_threshold(&mut self, raw: f64, source: &str) {
        if raw.is_finite() && raw > 0.0 {
            self.grade_threshold = raw;
        } else {
            warn!(source, value = raw, "ignoring non-positive grade threshold");
        }
    }
}

/// Defaults, then `portal.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Err(err) = apply_file_overrides(&mut settings, Path::new(SETTINGS_FILE)) {
        warn!(error = %err, "ignoring unreadable settings file");
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn apply_file_overrides(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let file_cfg: FileSettings = toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.frontend_url {
        settings.frontend_url = v;
    }
    if let Some(v) = file_cfg.dashboard_path {
        settings.dashboard_path = v;
    }
    if let Some(v) = file_cfg.grade_threshold {
        settings.set_threshold(v, "file");
    }
    Ok(())
}

/// `APP__*` wins over `PORTAL_*` when both are set.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let pick = |short: &str, long: &str| lookup(long).or_else(|| lookup(short));

    if let Some(v) = pick("PORTAL_API_BASE_URL", "APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = pick("PORTAL_FRONTEND_URL", "APP__FRONTEND_URL") {
        settings.frontend_url = v;
    }
    if let Some(v) = pick("PORTAL_DASHBOARD_PATH", "APP__DASHBOARD_PATH") {
        settings.dashboard_path = v;
    }
    if let Some(v) = pick("PORTAL_GRADE_THRESHOLD", "APP__GRADE_THRESHOLD") {
        match v.parse::<f64>() {
            Ok(parsed) => settings.set_threshold(parsed, "env"),
            Err(_) => warn!(value = %v, "ignoring unparsable grade threshold"),
        }
    }
}
