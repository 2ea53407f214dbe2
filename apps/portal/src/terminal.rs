//! Line-oriented terminal rendering of the login and dashboard pages.

use std::{
    io::{self, Write},
    sync::Mutex,
};

use client_core::{
    render::{Region, View},
    DashboardView, LoginView,
};
use url::Url;

pub const SUBMIT_LABEL: &str = "Ingresar";

pub struct TerminalView {
    identifier: Mutex<String>,
    submit_label: Mutex<String>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            identifier: Mutex::new(String::new()),
            submit_label: Mutex::new(SUBMIT_LABEL.to_string()),
        }
    }

    pub fn identifier(&self) -> String {
        lock(&self.identifier).clone()
    }

    pub fn prompt(&self, label: &str) {
        print!("{label}: ");
        let _ = io::stdout().flush();
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn region_title(region: Region) -> &'static str {
    match region {
        Region::Welcome => "inicio",
        Region::ProgramSelector => "carreras",
        Region::MainContent => "asignaturas",
    }
}

impl LoginView for TerminalView {
    fn set_identifier(&self, value: &str) {
        *lock(&self.identifier) = value.to_string();
        println!("RUT: {value}");
    }

    fn submit_label(&self) -> String {
        lock(&self.submit_label).clone()
    }

    fn set_submit_control(&self, label: &str, enabled: bool) {
        *lock(&self.submit_label) = label.to_string();
        if !enabled {
            println!("{label}");
        }
    }

    fn alert(&self, message: &str) {
        println!();
        println!("!! {message}");
        println!();
    }

    fn navigate(&self, url: &Url) {
        println!("-> {url}");
    }
}

impl DashboardView for TerminalView {
    fn render(&self, region: Region, view: View) {
        println!("== {} ==", region_title(region));
        println!("{view}");
    }
}
