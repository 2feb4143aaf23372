//! Emotional Diary
//!
//! Log emotional events, weigh three interpretations of each with Bayes'
//! rule, and view the running diary as a table and a two-tier graph.
//!
//! Examples:
//!   emotional_diary --name Hans
//!   emotional_diary show --import output/diario_emocional_2024-03-01.json
//!   emotional_diary render --import output/diario_emocional_2024-03-01.json

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use diary_core::{
    default_config_toml, render_table, to_graph, to_rows, today, DiaryConfig, DiaryError,
    EditorInput, ExportWriter, LineSource, ScriptInput, Session, Shell, SvgRenderer,
};
use diary_events::EventLog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line arguments for the diary
#[derive(Parser, Debug)]
#[command(name = "emotional_diary")]
#[command(about = "A Bayesian emotional diary")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Diary owner name (overrides the config)
    #[arg(long, global = true)]
    name: Option<String>,

    /// Output directory for exports (overrides the config)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an interactive session (default)
    Shell {
        /// Seed the session with a previously exported diary
        #[arg(long)]
        import: Option<PathBuf>,
    },
    /// Print the table of an exported diary
    Show {
        /// Exported diary document
        #[arg(long)]
        import: PathBuf,
    },
    /// Render the graph of an exported diary as SVG
    Render {
        /// Exported diary document
        #[arg(long)]
        import: PathBuf,

        /// Output file (defaults to grafo_emocional_<today>.svg in the output directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print or write the default configuration
    InitConfig {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "diary_core=info,emotional_diary=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(args: &Args) -> Result<DiaryConfig, DiaryError> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            DiaryConfig::from_file(path)?
        }
        None => DiaryConfig::default(),
    };

    if let Some(name) = &args.name {
        config.session.owner_name = name.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.export.output_dir = dir.clone();
    }
    Ok(config)
}

fn import_log(path: &Path) -> Result<EventLog, DiaryError> {
    let log = EventLog::read_from(path)?;
    tracing::info!("Imported {} events from {:?}", log.len(), path);
    Ok(log)
}

/// Uses the line editor on a terminal and plain line reads otherwise.
fn run_shell(session: Session, config: DiaryConfig) -> Result<(), DiaryError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        run_with_input(session, config, EditorInput::new()?)
    } else {
        run_with_input(session, config, ScriptInput::new(stdin.lock()))
    }
}

fn run_with_input<I: LineSource>(
    session: Session,
    config: DiaryConfig,
    input: I,
) -> Result<(), DiaryError> {
    let mut shell = Shell::new(session, config, input, io::stdout());
    shell.run()
}

fn run(args: Args) -> Result<(), DiaryError> {
    let config = load_config(&args)?;

    match args.command.unwrap_or(Command::Shell { import: None }) {
        Command::Shell { import } => {
            let log = match import {
                Some(path) => import_log(&path)?,
                None => EventLog::new(),
            };
            let session = Session::with_log(config.session.owner_name.clone(), log);
            run_shell(session, config)?;
        }
        Command::Show { import } => {
            let log = import_log(&import)?;
            print!("{}", render_table(&to_rows(&log)));
        }
        Command::Render { import, out } => {
            let log = import_log(&import)?;
            let graph = to_graph(&log, config.graph.keying);
            let renderer = SvgRenderer::new(config.render.clone());
            let path = match out {
                Some(path) => {
                    std::fs::write(&path, renderer.render(&graph))?;
                    path
                }
                None => ExportWriter::new(config.export.output_dir.clone())
                    .write_graph(&graph, &renderer, &today())?,
            };
            println!("Wrote {}", path.display());
        }
        Command::InitConfig { out } => match out {
            Some(path) => {
                std::fs::write(&path, default_config_toml())?;
                println!("Wrote {}", path.display());
            }
            None => print!("{}", default_config_toml()),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
