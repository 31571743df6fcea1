//! Luma CLI - documentation site tooling.
//!
//! Provides commands for:
//! - `check`: Validate the configuration and show the landing page
//! - `index`: Build the search corpus
//! - `search`: Query a search corpus
//! - `render`: Render one page as a complete HTML document
//! - `serve`: Start the preview server

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{IndexArgs, RenderArgs, SearchArgs, ServeArgs};
use output::Output;

/// Luma - documentation site tooling.
#[derive(Parser)]
#[command(name = "luma", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover luma.yaml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print the landing page.
    Check,
    /// Build the search corpus.
    Index(IndexArgs),
    /// Query the search corpus.
    Search(SearchArgs),
    /// Render a page as a complete HTML document.
    Render(RenderArgs),
    /// Start the preview server.
    Serve(ServeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check => commands::check::execute(config),
        Commands::Index(args) => args.execute(config),
        Commands::Search(args) => args.execute(config),
        Commands::Render(args) => args.execute(config),
        Commands::Serve(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
