//! `cocktail-finder`: search TheCocktailDB by first letter from the terminal.
//!
//! Type one letter, press Enter, and pick a drink from the list to see its
//! name in the detail pane. Built on [ratatui](https://ratatui.rs) with the
//! search flow from `cocktail-core`.
//!
//! Logs are written to a file (default `/tmp/cocktail-finder.log`) so they
//! never corrupt the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cocktail_config::Config;
use cocktail_core::CocktailService;

use crate::app::{App, Pacing};
use crate::screens::SearchScreen;

/// Look up cocktails by the first letter of their name.
#[derive(Parser, Debug)]
#[command(name = "cocktail-finder", version, about)]
struct Cli {
    /// Search prefix the query letter is appended to
    /// (e.g., https://www.thecocktaildb.com/api/json/v1/1/search.php?f=)
    #[arg(short = 'u', long, env = "COCKTAIL_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, env = "COCKTAIL_TIMEOUT")]
    timeout: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log file path (defaults to /tmp/cocktail-finder.log)
    #[arg(long, default_value = "/tmp/cocktail-finder.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing; stdout belongs to the terminal UI. Hold the returned
/// guard until exit so buffered lines are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cocktail_tui={log_level},cocktail_core={log_level},cocktail_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("cocktail-finder.log"));

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

/// File and environment first, then CLI flags on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => cocktail_config::load_config_from(path),
        None => cocktail_config::load_config(),
    }
    .wrap_err("failed to load configuration")?;

    if let Some(url) = &cli.base_url {
        cfg.service.base_url.clone_from(url);
    }
    if let Some(timeout) = cli.timeout {
        cfg.service.timeout = timeout;
    }

    Ok(cfg)
}

fn init_config(cli: &Cli) -> Result<()> {
    let cfg = Config::default();
    let path = match &cli.config {
        Some(path) => {
            cocktail_config::save_config_to(&cfg, path)?;
            path.clone()
        }
        None => cocktail_config::save_config(&cfg)?,
    };
    println!("wrote {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches modes
    tui::install_hooks()?;

    if cli.init_config {
        return init_config(&cli);
    }

    let _log_guard = setup_tracing(&cli);

    let cfg = resolve_config(&cli)?;
    let service_config = cfg
        .to_service_config()
        .wrap_err("invalid service configuration")?;
    let service = CocktailService::new(&service_config)?;

    let label = service
        .base_url()
        .host_str()
        .unwrap_or("(no host)")
        .to_owned();
    info!(base_url = %service.base_url(), "starting cocktail-finder");

    let pacing = Pacing {
        tick_rate: Duration::from_millis(cfg.ui.tick_rate_ms.max(1)),
        render_rate: Duration::from_millis(cfg.ui.render_rate_ms.max(1)),
    };
    let screen = SearchScreen::new(Some(service));
    let mut app = App::new(Box::new(screen), label, pacing);
    app.run().await?;

    Ok(())
}
