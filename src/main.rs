//! Strand interpreter CLI
//!
//! Main entry point for the `strand` command.

use clap::{Parser, Subcommand};
use miette::{NamedSource, Result};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "strand")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "The Strand scripting language interpreter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Strand program
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Parse a Strand program without running it
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the parsed AST as JSON
        #[arg(long)]
        show_ast: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { input } => run(&input),
        Commands::Check { input, show_ast } => check(&input, show_ast),
    }
}

fn read_source(input: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read {}: {}", input.display(), e))
}

fn run(input: &std::path::Path) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = read_source(input)?;

    match strand::run(&source) {
        Ok(_) => Ok(()),
        // Attach the source here so the report renders the offending line.
        Err(report) => Err(report
            .with_source_code(NamedSource::new(input.to_string_lossy(), source))),
    }
}

fn check(input: &std::path::Path, show_ast: bool) -> Result<()> {
    tracing::info!("Checking {:?}", input);

    let source = read_source(input)?;

    let program = strand::parse(&source).map_err(|report| {
        report.with_source_code(NamedSource::new(input.to_string_lossy(), source.clone()))
    })?;
    tracing::debug!("Parsed {} statements", program.stmts.len());

    if show_ast {
        let json = serde_json::to_string_pretty(&program)
            .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "Parsed {} ({} statements)",
        input.display(),
        program.stmts.len()
    );
    Ok(())
}
