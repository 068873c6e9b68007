//! `raven`: transpile Raven sources to JavaScript files.

mod config;
mod emit;

use anyhow::{Context, Result};
use clap::Parser;
use config::RavenConfig;
use nu_ansi_term::Color;
use raven_transpile::{FsLoader, SOURCE_EXTENSION, TranspileError, TranspileOptions, Transpiler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: raven [--dist] [--api] [--loud] [FILES...]";

#[derive(Parser, Debug)]
#[command(name = "raven", version, about = "Transpile Raven sources to JavaScript")]
struct Args {
    /// Write output into a dist directory next to each source
    #[arg(short, long)]
    dist: bool,

    /// Plain-text error reports that quote the offending generated line
    #[arg(short, long)]
    api: bool,

    /// Report every emitted file
    #[arg(short, long)]
    loud: bool,

    /// Files to transpile (default: every .rn file under the working directory)
    files: Vec<PathBuf>,
}

/// Effective settings after config and flags are combined.
struct Settings {
    api: bool,
    dist_dir: Option<String>,
    options: TranspileOptions,
}

impl Settings {
    fn resolve(args: &Args, config: &RavenConfig) -> Self {
        let api = args.api || config.validate.api();
        let dist_dir = (args.dist || config.output.dist())
            .then(|| config.output.dist_dir().to_string());
        let options = TranspileOptions::new()
            .api_mode(api)
            .reveal_artifact(config.validate.reveal_artifact());
        Self {
            api,
            dist_dir,
            options,
        }
    }
}

fn init_logging(loud: bool) {
    let default = if loud { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("RAVEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(args: &Args, settings: &Settings) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;

    let sources = if args.files.is_empty() {
        let found = emit::discover_sources(&cwd);
        if found.is_empty() {
            println!("No .{SOURCE_EXTENSION} files found in {}", cwd.display());
            println!("{USAGE}");
            return Ok(());
        }
        found
    } else {
        emit::select_sources(&args.files)
    };

    let transpiler = Transpiler::new(&FsLoader, settings.options.clone());
    for source in &sources {
        let output = emit::process_file(&transpiler, source, settings.dist_dir.as_deref())?;
        tracing::info!(source = %source.display(), output = %output.display(), "emitted");
    }
    Ok(())
}

/// Print a fatal error. Validation reports already carry their own styling.
fn report(err: &anyhow::Error, api: bool) {
    let styled = matches!(
        err.downcast_ref::<TranspileError>(),
        Some(TranspileError::GeneratedSyntax(_))
    );
    let message = format!("{err:#}");
    if api || styled {
        eprintln!("{message}");
    } else {
        eprintln!("{}", Color::Red.paint(message));
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.loud);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = RavenConfig::load(&cwd);
    let settings = Settings::resolve(&args, &config);

    if let Err(e) = run(&args, &settings) {
        report(&e, settings.api);
        std::process::exit(1);
    }
}
