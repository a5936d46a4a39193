//! Signpost CLI — answer a questionnaire from the terminal.
//!
//! Walks a decision-tree catalogue one question at a time, either
//! interactively or from answers given on the command line.

mod commands;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
