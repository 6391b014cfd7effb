//! `autoseo-tui`: terminal dashboard for the AutoSEO site service.
//!
//! Type a keyword, press Enter, and the service generates a site for it.
//! The list of generated sites (status badge plus SEO score) refreshes
//! after every accepted submission and on a configurable interval.
//!
//! Logs are written to a file (default `/tmp/autoseo-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use autoseo_config::Config;
use autoseo_core::HttpSiteService;

use crate::app::App;

/// Terminal dashboard for generating and tracking AutoSEO sites.
#[derive(Parser, Debug)]
#[command(name = "autoseo-tui", version, about)]
struct Cli {
    /// Site service base URL (e.g., http://localhost:8000)
    #[arg(short = 'u', long, env = "AUTOSEO_API_URL")]
    api_url: Option<String>,

    /// Poll interval in seconds (0 disables polling)
    #[arg(long)]
    refresh: Option<u64>,

    /// Cloud provider sent with generation requests
    #[arg(long)]
    cloud_provider: Option<String>,

    /// Content tone sent with generation requests
    #[arg(long)]
    tone: Option<String>,

    /// Config file path (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the resolved settings to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Log file path (defaults to /tmp/autoseo-tui.log)
    #[arg(long, default_value = "/tmp/autoseo-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the terminal is in raw mode. Hold the returned guard until exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "autoseo_tui={log_level},autoseo_core={log_level},autoseo_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("autoseo-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file (or defaults) with CLI flags layered on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => autoseo_config::load_config_from(path)?,
        None => autoseo_config::load_config()?,
    };

    if let Some(url) = &cli.api_url {
        cfg.api_url.clone_from(url);
    }
    if let Some(secs) = cli.refresh {
        cfg.refresh_interval_secs = secs;
    }
    if let Some(provider) = &cli.cloud_provider {
        cfg.cloud_provider.clone_from(provider);
    }
    if let Some(tone) = &cli.tone {
        cfg.tone.clone_from(tone);
    }

    Ok(cfg)
}

/// Persist the resolved settings where the next run will read them.
fn save_resolved(cli: &Cli, cfg: &Config) -> Result<PathBuf> {
    let path = cli.config.clone().unwrap_or_else(autoseo_config::config_path);
    autoseo_config::save_config_to(cfg, &path)?;
    info!(path = %path.display(), "saved config");
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let cfg = resolve_config(&cli)?;
    if cli.save_config {
        let path = save_resolved(&cli, &cfg)?;
        eprintln!("Config saved to {}", path.display());
        return Ok(());
    }

    let service_config = cfg.service_config()?;
    let service = HttpSiteService::new(&service_config)?;

    info!(
        api_url = %service.base_url(),
        refresh = ?cfg.refresh_interval(),
        "starting autoseo-tui"
    );

    let mut app = App::new(
        service,
        cfg.generation_options(),
        cfg.refresh_interval(),
        cfg.api_url.clone(),
    );
    app.run().await?;

    Ok(())
}
