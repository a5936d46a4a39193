//! CLI command definitions, routing, and tracing setup.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use signpost_core::Session;
use signpost_shared::{
    AppConfig, Catalogue, SignpostError, init_config, load_catalogue, load_config,
};
use tracing::{info, warn};

use crate::render;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Signpost — find your way through a decision-tree questionnaire.
#[derive(Parser)]
#[command(
    name = "signpost",
    version,
    about = "Answer a decision-tree questionnaire and find out where it leads.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Catalogue to use: `builtin`, a registered name, or a .toml/.json path.
    #[arg(long, env = "SIGNPOST_CATALOGUE", global = true)]
    pub catalogue: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Result output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Answer the questionnaire interactively.
    Ask,

    /// Resolve a list of answers given in order.
    Resolve {
        /// Answer as `question=index`, repeated in the order asked (e.g. `--answer git=1`).
        #[arg(short, long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, usize)>,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// List the outcomes still compatible with the answers.
        #[arg(long)]
        show_candidates: bool,
    },

    /// Inspect the catalogue.
    Catalogue {
        /// Catalogue subcommand.
        #[command(subcommand)]
        action: CatalogueAction,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Catalogue subcommands.
#[derive(Subcommand)]
pub(crate) enum CatalogueAction {
    /// List questions and outcome paths.
    Show,
    /// Print the catalogue as TOML.
    Export,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

/// Parse `question=index`.
fn parse_answer(s: &str) -> std::result::Result<(String, usize), String> {
    let (question, index) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `question=index`, got `{s}`"))?;

    let question = question.trim();
    if question.is_empty() {
        return Err(format!("missing question id in `{s}`"));
    }

    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("answer index in `{s}` must be a non-negative number"))?;

    Ok((question.to_string(), index))
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "signpost=warn",
        1 => "signpost=info",
        2 => "signpost=debug",
        _ => "signpost=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let requested = cli.catalogue.as_deref();

    match cli.command {
        Command::Ask => cmd_ask(&config, requested),
        Command::Resolve {
            answers,
            format,
            show_candidates,
        } => cmd_resolve(
            &config,
            requested,
            &answers,
            format,
            show_candidates || config.defaults.show_candidates,
        ),
        Command::Catalogue { action } => match action {
            CatalogueAction::Show => cmd_catalogue_show(&config, requested),
            CatalogueAction::Export => cmd_catalogue_export(&config, requested),
        },
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn open_catalogue(config: &AppConfig, requested: Option<&str>) -> Result<Arc<Catalogue>> {
    let source = config.catalogue_source(requested);
    let catalogue =
        load_catalogue(&source).wrap_err_with(|| format!("cannot load catalogue '{source}'"))?;
    Ok(Arc::new(catalogue))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// What the user typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// Answer the pending question.
    Answer(usize),
    /// Re-answer an already displayed question.
    Revise(String, usize),
    Restart,
    Quit,
}

fn parse_input(line: &str) -> std::result::Result<Input, String> {
    match line.trim() {
        "q" | "quit" => Ok(Input::Quit),
        "r" | "restart" => Ok(Input::Restart),
        s if s.contains('=') => parse_answer(s).map(|(q, i)| Input::Revise(q, i)),
        s => s
            .parse::<usize>()
            .map(Input::Answer)
            .map_err(|_| format!("unrecognized input `{s}`")),
    }
}

fn cmd_ask(config: &AppConfig, requested: Option<&str>) -> Result<()> {
    let catalogue = open_catalogue(config, requested)?;
    let mut session = Session::new(catalogue);
    let show_candidates = config.defaults.show_candidates;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        let transcript = session.transcript()?;
        println!();
        println!("{}", render::transcript_text(&transcript, show_candidates));

        if transcript.outcome.is_some() {
            print!("\nRevise with `question=index`, `r` to restart, `q` to quit: ");
        } else {
            print!("\nAnswer index, `question=index` to revise, `r` to restart, `q` to quit: ");
        }
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };

        let input = match parse_input(&line?) {
            Ok(input) => input,
            Err(msg) => {
                eprintln!("  {msg}");
                continue;
            }
        };

        let recorded = match input {
            Input::Quit => break,
            Input::Restart => {
                session.reset();
                continue;
            }
            Input::Answer(index) => {
                let position = session.resolver().trail().len();
                let pending = transcript.steps.get(position).map(|s| s.question.clone());
                match pending {
                    Some(question) => session.record_answer(position, question.as_str(), index),
                    None => Err(SignpostError::out_of_sequence(
                        position,
                        "the questionnaire is complete; revise with `question=index`",
                    )),
                }
            }
            Input::Revise(question, index) => {
                match transcript.steps.iter().position(|s| s.question == *question) {
                    Some(position) => session.record_answer(position, &question, index),
                    None => Err(SignpostError::out_of_sequence(
                        transcript.steps.len(),
                        format!("question `{question}` is not displayed"),
                    )),
                }
            }
        };

        match recorded {
            Ok(()) => {}
            Err(err) if err.is_configuration_defect() => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "answer rejected");
                eprintln!("  {err}");
            }
        }
    }

    info!(id = %session.id(), "questionnaire session ended");
    Ok(())
}

fn cmd_resolve(
    config: &AppConfig,
    requested: Option<&str>,
    answers: &[(String, usize)],
    format: OutputFormat,
    show_candidates: bool,
) -> Result<()> {
    let catalogue = open_catalogue(config, requested)?;
    let mut session = Session::new(catalogue);

    for (position, (question, index)) in answers.iter().enumerate() {
        session
            .record_answer(position, question, *index)
            .wrap_err_with(|| {
                format!("answer #{} (`{question}={index}`) was rejected", position + 1)
            })?;
    }

    let transcript = session.transcript()?;
    match format {
        OutputFormat::Text => println!("{}", render::transcript_text(&transcript, show_candidates)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&transcript)?),
    }

    Ok(())
}

fn cmd_catalogue_show(config: &AppConfig, requested: Option<&str>) -> Result<()> {
    let catalogue = open_catalogue(config, requested)?;
    println!("{}", render::catalogue_text(&catalogue));
    Ok(())
}

fn cmd_catalogue_export(config: &AppConfig, requested: Option<&str>) -> Result<()> {
    let catalogue = open_catalogue(config, requested)?;
    let toml_str = toml::to_string_pretty(catalogue.as_ref())
        .map_err(|e| eyre!("cannot serialize catalogue: {e}"))?;
    println!("{toml_str}");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
