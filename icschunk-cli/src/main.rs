mod commands;
mod render;
mod session;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Settings;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "icschunk")]
#[command(about = "Validate .ics calendar files and download them in fixed-size chunks")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a file and list its chunks
    Inspect {
        file: PathBuf,

        /// Bytes per chunk (defaults to chunk_size from config, 1 MiB)
        #[arg(short = 's', long)]
        chunk_size: Option<u64>,
    },
    /// Save a single chunk as <name>-part<N>.ics
    Download {
        file: PathBuf,

        /// Chunk to save, starting at 1
        #[arg(short, long)]
        part: usize,

        /// Bytes per chunk (defaults to chunk_size from config, 1 MiB)
        #[arg(short = 's', long)]
        chunk_size: Option<u64>,

        /// Directory to write into (defaults to output_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Save every chunk
    Split {
        file: PathBuf,

        /// Bytes per chunk (defaults to chunk_size from config, 1 MiB)
        #[arg(short = 's', long)]
        chunk_size: Option<u64>,

        /// Directory to write into (defaults to output_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show config path and effective settings
    Config,
}

/// `RUST_LOG` (default `warn`) with a `debug` directive layered on top for `--verbose`.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

/// Log to stderr so stdout stays clean.
fn setup_logging(verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to setup logging: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect { file, chunk_size } => {
            let settings = Settings::resolve(chunk_size, None)?;
            commands::inspect::run(&file, settings.chunk_size).await
        }
        Commands::Download {
            file,
            part,
            chunk_size,
            out,
        } => {
            let settings = Settings::resolve(chunk_size, out)?;
            commands::download::run(&file, part, settings.chunk_size, &settings.output_dir).await
        }
        Commands::Split {
            file,
            chunk_size,
            out,
        } => {
            let settings = Settings::resolve(chunk_size, out)?;
            commands::split::run(&file, settings.chunk_size, &settings.output_dir).await
        }
        Commands::Config => commands::config::run(),
    }
}
