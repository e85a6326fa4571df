//! DocGen CLI entry point.
//!
//! This binary is the composition root for the entire system:
//!
//! 1. **Parse configuration**: `docgen.toml` (or `--config`), environment
//!    overrides, then flags.
//! 2. **Wire observability**: `tracing-subscriber` to stderr, plus an
//!    OpenTelemetry OTLP exporter when one is configured.
//! 3. **Construct infrastructure**: the askama renderer and the filesystem
//!    writer, injected into `PipelineExecutor`.
//! 4. **Run the command**: one-shot generation, a stdio tool server, or one of
//!    the informational commands.

mod config;
mod telemetry;

use std::backtrace::{Backtrace, BacktraceStatus};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nodes::{AskamaRenderer, GenerationRequest, PipelineExecutor};
use pipeline::{DocSelection, Idea, PROFILES};
use tools::{docs_registry, orchestrator_registry, SurfaceContext, ToolServer};
use tracing::info;

use crate::config::{Config, LogFormat};
use crate::telemetry::Telemetry;

#[derive(Debug, Parser)]
#[command(name = "docgen", version)]
#[command(about = "Generate project documentation from a structured idea description")]
struct Cli {
    /// Configuration file (default: ./docgen.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate documents for an idea and print the result as JSON
    Generate(GenerateArgs),
    /// Serve a tool surface as line-delimited JSON-RPC over stdio
    Serve {
        #[arg(long, value_enum, default_value_t = Surface::Docs)]
        surface: Surface,
        /// Output directory (default: first writable discovery candidate)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// List the profiles and their document types
    Profiles,
    /// Print the sample idea as JSON
    SampleIdea,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Idea description (JSON)
    #[arg(long, value_name = "FILE")]
    idea: PathBuf,

    #[command(flatten)]
    selection: Selection,

    /// Replace existing files instead of writing `.new` siblings
    #[arg(long)]
    overwrite: bool,

    /// Append review notes to the generated documents
    #[arg(long)]
    correct: bool,

    /// Output directory (default: the idea's own `output_dir`)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct Selection {
    /// Comma-separated document types, e.g. brd_prd,srd,erd
    #[arg(long, value_name = "LIST")]
    docs: Option<String>,

    /// Every document type
    #[arg(long)]
    all: bool,

    /// A named profile (full, lean, tech_only, pm_only)
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Surface {
    Docs,
    Orchestrator,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Prints the error, its cause chain, and a backtrace.
fn report(error: &anyhow::Error) {
    eprint!("{}", failure_report(error));
}

/// The backtrace captured with the error when `RUST_BACKTRACE` is set,
/// otherwise one taken here.
fn failure_report(error: &anyhow::Error) -> String {
    let mut out = format!("error: {error}\n");
    for cause in error.chain().skip(1) {
        out.push_str(&format!("  caused by: {cause}\n"));
    }
    let backtrace = error.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        out.push_str(&format!("\nbacktrace:\n{backtrace}\n"));
    } else {
        out.push_str(&format!("\nbacktrace:\n{}\n", Backtrace::force_capture()));
    }
    out
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let telemetry = Telemetry::init(&config.logging)?;

    let outcome = match cli.command {
        Command::Generate(args) => generate(&config, args),
        Command::Serve {
            surface,
            output_dir,
        } => serve(&config, surface, output_dir).await,
        Command::Profiles => print_profiles(),
        Command::SampleIdea => print_json(&Idea::sample()),
    };

    telemetry.shutdown();
    outcome
}

fn executor() -> PipelineExecutor {
    PipelineExecutor::new(
        Arc::new(AskamaRenderer::new()),
        Arc::new(artifacts::FsArtifactWriter::new()),
    )
}

fn generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let idea = load_idea(&args.idea)?;

    let mut request = GenerationRequest::default()
        .overwrite(args.overwrite || config.generation.overwrite)
        .correct(args.correct || config.generation.corrections);
    if let Some(dir) = args.output_dir.or_else(|| config.output.dir.clone()) {
        request = request.output_dir(dir);
    }

    let executor = executor();
    let Selection { docs, all, profile } = args.selection;
    if let Some(profile) = profile {
        let run = executor.orchestrate(idea, &profile, request)?;
        return print_json(&run);
    }
    request.docs = if all {
        DocSelection::all()
    } else {
        DocSelection::from_comma_list(docs.as_deref().unwrap_or_default())
    };
    let result = executor.run(idea, &request)?;
    info!(
        run_id = %result.run_id,
        artifacts = result.artifacts().count(),
        "Documents generated"
    );
    print_json(&result)
}

async fn serve(config: &Config, surface: Surface, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = match output_dir.or_else(|| config.output.dir.clone()) {
        Some(dir) => dir,
        None => {
            let candidates = if config.output.candidates.is_empty() {
                artifacts::default_candidates()
            } else {
                config.output.candidates.clone()
            };
            artifacts::discover_output_dir(&candidates)?
        }
    };
    info!(output_dir = %output_dir.display(), surface = ?surface, "Output directory selected");

    let ctx = SurfaceContext::new(Arc::new(executor()), output_dir)
        .with_archive(config.output.archive.clone());
    let server = match surface {
        Surface::Docs => ToolServer::new("docs", docs_registry(ctx)?),
        Surface::Orchestrator => ToolServer::new("orchestrator", orchestrator_registry(ctx)?),
    };
    Arc::new(server)
        .serve_stdio()
        .await
        .context("tool server I/O failed")
}

fn load_idea(path: &Path) -> Result<Idea> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read idea file {}", path.display()))?;
    Idea::from_json(&text).with_context(|| format!("invalid idea file {}", path.display()))
}

fn print_profiles() -> Result<()> {
    for profile in PROFILES {
        println!("{:<10} {}", profile.name, profile.docs.join(", "));
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
