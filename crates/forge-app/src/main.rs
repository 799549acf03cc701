//! forge - chart geometry from the command line
//!
//! `forge render request.json` prints the primitives of a chart request;
//! `forge demo --kind pie` generates a random request and renders it.

mod demo;
mod error;
mod request;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use crate::demo::{DemoGenerator, DemoKind};
use crate::error::{AppError, Result};
use crate::request::{ChartRequest, RenderOutput};

/// Chart geometry engine CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log verbosity (logs go to stderr)
    #[arg(long, global = true, default_value_t = Level::INFO)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON chart request and print its primitives
    Render {
        /// Path to the request file
        request: PathBuf,

        /// Write the primitives here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Fail when any data point had to be left out
        #[arg(long)]
        strict: bool,
    },

    /// Generate a random chart request and render it
    Demo {
        #[arg(short, long, value_enum, default_value_t = DemoKind::Bar)]
        kind: DemoKind,

        /// Number of data points
        #[arg(short, long, default_value_t = 8)]
        points: usize,

        /// Seed for repeatable output
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Serialize)]
struct DemoOutput<'a> {
    request: &'a ChartRequest,
    output: &'a RenderOutput,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Render {
            request,
            output,
            pretty,
            strict,
        } => {
            tracing::info!("Rendering {}", request.display());
            let json = fs::read_to_string(&request).map_err(|source| AppError::Read {
                path: request.clone(),
                source,
            })?;

            let rendered = ChartRequest::from_json(&json)?.render()?;
            let rendered = if strict { rendered.into_strict()? } else { rendered };
            write_json(&rendered, output.as_deref(), pretty)
        }
        Commands::Demo {
            kind,
            points,
            seed,
            pretty,
        } => {
            let request = DemoGenerator::new(seed).request(kind, points);
            let output = request.render()?;
            write_json(
                &DemoOutput {
                    request: &request,
                    output: &output,
                },
                None,
                pretty,
            )
        }
    }
}

fn write_json<T: Serialize>(value: &T, path: Option<&Path>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match path {
        Some(path) => {
            fs::write(path, json).map_err(|source| AppError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
