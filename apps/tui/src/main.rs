//! Signpost TUI — interactive terminal questionnaire.
//!
//! Provides a wizard screen for answering questions and an outcomes
//! browser, built with `ratatui` + `crossterm`.

mod app;
mod screens;
mod widgets;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use signpost_core::Session;
use signpost_shared::{load_catalogue, load_config};

/// Terminal wizard for Signpost catalogues.
#[derive(Parser)]
#[command(
    name = "signpost-tui",
    version,
    about = "Answer a decision-tree questionnaire in the terminal.",
    long_about = None,
)]
struct Args {
    /// Catalogue to use: `builtin`, a registered name, or a .toml/.json path.
    #[arg(long, env = "SIGNPOST_CATALOGUE")]
    catalogue: Option<String>,

    /// Append logs to this file (the terminal is in raw mode).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_file_tracing(path)?;
    }

    let config = load_config()?;
    let source = config.catalogue_source(args.catalogue.as_deref());
    let catalogue =
        load_catalogue(&source).wrap_err_with(|| format!("cannot load catalogue '{source}'"))?;

    app::run(Session::new(Arc::new(catalogue)))
}

fn init_file_tracing(path: &Path) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signpost=debug"));

    fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
