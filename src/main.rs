mod script;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use canvas::config::EngineConfig;
use canvas::engine::EngineCore;
use canvas::export::{self, Snapshot, SnapshotError};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("invalid config: {0}")]
    Config(serde_json::Error),
    #[error("invalid script: {0}")]
    Script(serde_json::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

#[derive(Parser, Debug)]
#[command(name = "sketchpad", about = "Replay canvas editing sessions and export snapshots")]
struct Cli {
    /// Engine tuning as a JSON file; missing fields keep their defaults.
    #[arg(long, global = true, env = "SKETCHPAD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON step script against a fresh engine and print the result.
    Replay {
        #[arg(help = "Script path, or - for stdin")]
        script: String,
        #[arg(long, help = "Seed the engine from a snapshot before replaying")]
        snapshot: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Re-emit a snapshot, normalized through the engine.
    Render {
        #[arg(help = "Snapshot path, or - for stdin")]
        snapshot: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    #[arg(long, help = "Output path; stdout when omitted")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Html,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let mut core = EngineCore::with_config(config);

    match cli.command {
        Command::Replay { script, snapshot, output } => {
            if let Some(path) = snapshot {
                core.load_snapshot(export::from_json(&read_input(&path)?)?);
            }
            let steps = script::parse(&read_input(&script)?).map_err(CliError::Script)?;
            let report = script::replay(&mut core, steps);
            info!(
                steps = report.steps,
                actions = report.actions,
                notices = report.notices.len(),
                elements = core.doc.len(),
                "replay finished"
            );
            write_output(&core.snapshot(), &output)
        }
        Command::Render { snapshot, output } => {
            core.load_snapshot(export::from_json(&read_input(&snapshot)?)?);
            write_output(&core.snapshot(), &output)
        }
    }
}

fn load_config(path: &Path) -> Result<EngineConfig, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_json::from_str(&raw).map_err(CliError::Config)?;
    debug!(?config, "config loaded");
    Ok(config)
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: "stdin".to_owned(), source })?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn render(snapshot: &Snapshot, format: Format) -> Result<String, CliError> {
    match format {
        Format::Json => Ok(export::to_json(snapshot)?),
        Format::Html => Ok(export::render_html(&snapshot.elements)),
    }
}

fn write_output(snapshot: &Snapshot, output: &OutputArgs) -> Result<(), CliError> {
    let rendered = render(snapshot, output.format)?;
    match &output.out {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            info!(path = %path.display(), "written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
