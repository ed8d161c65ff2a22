//! eigenscape - constrained random matrices, spectra and t-SNE coordinates
//!
//! Usage:
//!   eigenscape generate request.json              # JSON response on stdout
//!   eigenscape generate request.json --summary    # Human-readable summary
//!   eigenscape generate - --seed 7 < request.json # Read request from stdin
//!   eigenscape capacity request.json              # {"max_possible": N}
//!
//! Failures print `{"error": "..."}` on stdout and exit non-zero.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;
mod output;

use commands::{capacity, generate};

/// eigenscape - Constrained matrix generation and spectral projection
#[derive(Parser)]
#[command(name = "eigenscape")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long, global = true)]
    summary: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate matrices, eigen-decompose them and embed the spectra
    Generate {
        /// Request JSON file ("-" for stdin)
        #[arg(value_name = "FILE", default_value = "-")]
        request: PathBuf,

        /// Pipeline config JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Seed for matrix sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Upper bound on distinct matrices for the given ranges
    Capacity {
        /// Request JSON file ("-" for stdin)
        #[arg(value_name = "FILE", default_value = "-")]
        request: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(cli: &Cli) -> error::Result<()> {
    match &cli.command {
        Commands::Generate {
            request,
            config,
            seed,
        } => generate::run(&generate::GenerateOptions {
            request,
            config: config.as_deref(),
            seed: *seed,
            summary: cli.summary,
            pretty: cli.pretty,
        }),
        Commands::Capacity { request } => capacity::run(request, cli.summary, cli.pretty),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.summary {
                output::fail(&e.to_string());
            } else if output::json(&e.payload(), cli.pretty).is_err() {
                output::fail(&e.to_string());
            }
            e.exit_code()
        }
    }
}
