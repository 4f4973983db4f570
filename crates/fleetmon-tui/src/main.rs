//! `fleetmon-tui` — terminal dashboard for the fleet-tracking backend.
//!
//! Three screens navigable by number keys: Dashboard (stats + action
//! triggers), Balises, and Reports. The assignment form opens as a modal
//! over any screen; `r` reloads everything, `s` fires the manual CMA-CGM
//! sync.
//!
//! Logs go to a file (default `/tmp/fleetmon-tui.log`) — writing to
//! stdout/stderr would corrupt the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fleetmon_core::Fleet;

use crate::app::App;

/// Terminal dashboard for fleet-tracking balises.
#[derive(Parser, Debug)]
#[command(name = "fleetmon-tui", version, about)]
struct Cli {
    /// Backend server URL (e.g. http://tracker.example.net:6062)
    #[arg(short = 'c', long, env = "FLEET_SERVER")]
    server: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FLEET_TIMEOUT")]
    timeout: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/fleetmon-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Returns a guard that must be held for the
/// lifetime of the application so logs are flushed on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fleetmon_tui={log_level},fleetmon_core={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("fleetmon-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve a [`Fleet`] from CLI flags, environment, and the shared
/// config file — the same chain the CLI uses.
fn build_fleet(cli: &Cli) -> Result<Fleet> {
    let cfg = fleetmon_config::load_config_or_default();
    let fleet_config = fleetmon_config::resolve(&cfg, cli.server.as_deref(), cli.timeout)
        .map_err(|e| match e {
            fleetmon_config::ConfigError::NoServer => eyre!(
                "no backend server configured\n\n\
                 Pass --server, set FLEET_SERVER, or run:\n  \
                 fleetmon config init --server http://tracker.example.net:6062"
            ),
            other => eyre!(other.to_string()),
        })?;
    Ok(Fleet::new(&fleet_config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal.
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit.
    let _log_guard = setup_tracing(&cli);

    let fleet = build_fleet(&cli)?;
    info!(server = %fleet.client().base_url(), "starting fleetmon-tui");

    let mut app = App::new(fleet);
    app.run().await?;

    Ok(())
}
