//! rebar CLI - Resample OHLCV bars from JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "rebar")]
#[command(about = "Resample OHLCV bars by time, volume, range, Renko or Heikin-Ashi", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Input file with a JSON array of bars. Reads stdin when omitted.
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output file. Writes stdout when omitted.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Name of the output series. Defaults to the input file stem.
    #[arg(short, long, global = true)]
    name: Option<String>,

    /// Write newline-delimited JSON instead of an array
    #[arg(long, global = true)]
    ndjson: bool,

    /// Pretty-print array output
    #[arg(long, global = true)]
    pretty: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed time buckets
    Duration {
        /// Target timeframe (m1, m5, m15, m30, h1, h4, d1, w1)
        #[arg(short, long, conflicts_with = "period_ms")]
        timeframe: Option<String>,

        /// Target period in milliseconds
        #[arg(long)]
        period_ms: Option<i64>,

        /// Also emit the trailing, incomplete bucket
        #[arg(long)]
        emit_partial: bool,
    },

    /// Buckets closed by cumulative volume
    Volume {
        /// Volume at which a bucket closes
        #[arg(short, long)]
        threshold: f64,

        /// Also emit the trailing, incomplete bucket
        #[arg(long)]
        emit_partial: bool,
    },

    /// Buckets closed by cumulative high-low range
    Range {
        /// Range at which a bucket closes
        #[arg(short, long)]
        threshold: f64,

        /// Also emit the trailing, incomplete bucket
        #[arg(long)]
        emit_partial: bool,
    },

    /// Fixed-size Renko bricks
    Renko {
        /// Price height of one brick
        #[arg(short, long)]
        brick_size: f64,

        /// Bricks a reversal must span
        #[arg(short, long, default_value = "1")]
        reversal_bricks: u32,
    },

    /// Heikin-Ashi smoothing
    HeikinAshi,

    /// Strategy read from a JSON config file
    Config {
        /// Path to the strategy config
        path: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.command {
        Commands::Duration {
            timeframe,
            period_ms,
            emit_partial,
        } => commands::duration_config(timeframe.as_deref(), period_ms, emit_partial)?,
        Commands::Volume {
            threshold,
            emit_partial,
        } => commands::volume_config(threshold, emit_partial),
        Commands::Range {
            threshold,
            emit_partial,
        } => commands::range_config(threshold, emit_partial),
        Commands::Renko {
            brick_size,
            reversal_bricks,
        } => commands::renko_config(brick_size, reversal_bricks),
        Commands::HeikinAshi => commands::heikin_ashi_config(),
        Commands::Config { path } => commands::load_config(&path)?,
    };

    let style = display::OutputStyle {
        ndjson: cli.ndjson,
        pretty: cli.pretty,
    };
    commands::resample(
        config,
        cli.input.as_deref(),
        cli.output.as_deref(),
        cli.name.as_deref(),
        style,
    )
}
