use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    config::load_settings,
    events::{dispatch_dashboard_event, dispatch_login_event, UiEvent},
    DashboardFlow, LoginFlow, LoginOutcome, PortalApi, PortalClient,
};
use shared::domain::SessionId;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

mod terminal;

use terminal::TerminalView;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    frontend_url: Option<String>,
    #[arg(long)]
    grade_threshold: Option<f64>,
    /// Open the dashboard for an existing session instead of logging in.
    #[arg(long)]
    session_id: Option<String>,
}

type InputLines = Lines<BufReader<Stdin>>;

async fn read_field(view: &TerminalView, lines: &mut InputLines, label: &str) -> Result<String> {
    view.prompt(label);
    match lines.next_line().await? {
        Some(line) => Ok(line.trim().to_string()),
        None => bail!("input closed"),
    }
}

async fn login_page(
    api: Arc<dyn PortalApi>,
    view: Arc<TerminalView>,
    dashboard_url: Url,
    lines: &mut InputLines,
) -> Result<Url> {
    let flow = LoginFlow::new(api, view.clone(), dashboard_url);
    loop {
        let raw = read_field(&view, lines, "RUT").await?;
        dispatch_login_event(&flow, UiEvent::RutInput(raw)).await;
        let password = read_field(&view, lines, "Contraseña").await?;

        let submit = UiEvent::SubmitLogin {
            rut: view.identifier(),
            password,
        };
        if let Some(LoginOutcome::Navigated(url)) = dispatch_login_event(&flow, submit).await {
            return Ok(url);
        }
    }
}

async fn dashboard_page(
    api: Arc<dyn PortalApi>,
    view: Arc<TerminalView>,
    threshold: f64,
    page: Url,
    lines: &mut InputLines,
) -> Result<()> {
    let flow = DashboardFlow::new(api, view, threshold);
    flow.start(&page).await;

    println!("(código de carrera para cambiar, Enter para ver la actual, 'q' para salir)");
    while let Some(line) = lines.next_line().await? {
        let code = line.trim().to_string();
        if code.is_empty() {
            match flow.selected_program().await {
                Some(current) => println!("carrera actual: {current}"),
                None => println!("ninguna carrera seleccionada"),
            }
            continue;
        }
        if code == "q" {
            break;
        }
        let flow = flow.clone();
        tokio::spawn(async move {
            dispatch_dashboard_event(&flow, UiEvent::ProgramChanged(code)).await;
        });
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(v) = args.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = args.frontend_url {
        settings.frontend_url = v;
    }
    if let Some(v) = args.grade_threshold {
        settings.set_threshold(v, "cli");
    }
    info!(api = %settings.api_base_url, threshold = settings.grade_threshold, "portal starting");

    let api: Arc<dyn PortalApi> = Arc::new(PortalClient::new(settings.api_base()?));
    let view = Arc::new(TerminalView::new());
    let dashboard_url = settings.dashboard_url()?;
    let mut lines = BufReader::new(stdin()).lines();

    let page = match args.session_id {
        Some(id) => SessionId(id).attach_to(&dashboard_url),
        None => login_page(api.clone(), view.clone(), dashboard_url, &mut lines).await?,
    };

    dashboard_page(api, view, settings.grade_threshold, page, &mut lines).await
}
