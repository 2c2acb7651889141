//! Command-line runner.
//!
//! Usage: `befunge <file> [--steps] [--ops N] [--seed N] [--no-color]`

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use befunge::{Engine, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "befunge")]
#[command(about = "Run a two-dimensional stack program")]
struct Args {
    /// Program file
    file: PathBuf,

    /// Print the grid, every stack and the output so far before each tick
    #[arg(short, long)]
    steps: bool,

    /// Maximum ticks per second (0 runs as fast as possible)
    #[arg(short, long, default_value_t = 0)]
    ops: u32,

    /// Seed for the random direction instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Disable colours in step traces
    #[arg(long)]
    no_color: bool,
}

/// Diagnostics go to stderr so they never interleave with program output.
/// `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = RunConfig {
        ops_per_second: args.ops,
        show_steps: args.steps,
        seed: args.seed,
        color: !args.no_color,
    };

    let mut engine = Engine::from_file(&args.file, config)
        .with_context(|| format!("could not start {}", args.file.display()))?;
    engine.run().context("program aborted")?;
    Ok(())
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{:#}", err);
        process::exit(1);
    }
}
