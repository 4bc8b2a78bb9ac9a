//! qstart - Sming project quickstart
//!
//! Scaffolds a new Sming project from the sming-skel template archive and
//! optionally sets up a local git repository with a first commit.

mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use qstart_projects::{ConsolePrompt, Outcome, Quickstart, SettingsLoader};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

use cli::Cli;

#[tokio::main]
async fn main() {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    if cli.show_banner() {
        output::banner();
    }

    if let Err(e) = run(cli).await {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.run_config().context("Invalid project location")?;

    let loader = match &cli.config {
        Some(path) => SettingsLoader::with_file(path.clone()),
        None => SettingsLoader::new(),
    };
    let settings = loader.load().context("Failed to load settings")?;

    let name = config.name.clone();
    let project_dir = config.project_dir.clone();
    let silent = config.silent;

    let mut quickstart = Quickstart::new(config, settings)?;
    let outcome = quickstart
        .run(&mut ConsolePrompt)
        .await
        .with_context(|| format!("Failed to create project {}", name))?;

    match outcome {
        Outcome::Completed if !silent => {
            output::success(&format!("Project '{}' created", name));
            output::kv("Location", project_dir.as_str());
            if quickstart.repository_created() {
                output::kv("Repository", "initialized");
            }
        }
        Outcome::Aborted if !silent => output::info("Project creation cancelled"),
        _ => {}
    }

    Ok(())
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: bool) {
    // Warnings carry the user-facing notices, so they stay on even in silent mode
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(log_layer(std::io::stderr, Term::stderr().is_term()))
        .with(filter)
        .init();
}

/// Log line formatting; colors only when writing to a terminal
fn log_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(ansi)
        .with_writer(writer)
}
