//! webdoc CLI - remote document renderer.
//!
//! Provides commands for:
//! - `render`: Convert a document (remote or local) to an HTML fragment
//! - `sheet`: Fetch a spreadsheet tab as JSON rows or records

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SheetArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// webdoc - remote document renderer.
#[derive(Parser)]
#[command(name = "webdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to an HTML fragment.
    Render(RenderArgs),
    /// Fetch a spreadsheet tab as JSON.
    Sheet(SheetArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Sheet(args) => args.verbose,
    };
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(VERSION),
        Commands::Sheet(args) => args.execute(VERSION),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
