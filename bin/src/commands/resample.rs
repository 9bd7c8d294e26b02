//! Resample command implementation.
//!
//! Every subcommand is turned into an [`AggregatorConfig`] first, so flags and
//! config files go through the same validation.

use anyhow::{Context, Result};
use rebar_lib::prelude::*;
use std::fs;
use std::path::Path;

use crate::display::{self, OutputStyle};

/// Builds a duration config from CLI flags.
pub(crate) fn duration_config(
    timeframe: Option<&str>,
    period_ms: Option<i64>,
    emit_partial: bool,
) -> Result<AggregatorConfig<f64>> {
    let timeframe = timeframe
        .map(str::parse::<Timeframe>)
        .transpose()
        .context("Invalid --timeframe")?;
    Ok(AggregatorConfig::Duration {
        timeframe,
        period_ms,
        only_final_bars: !emit_partial,
    })
}

/// Builds a volume config from CLI flags.
pub(crate) const fn volume_config(threshold: f64, emit_partial: bool) -> AggregatorConfig<f64> {
    AggregatorConfig::Volume {
        threshold: Some(threshold),
        only_final_bars: !emit_partial,
    }
}

/// Builds a range config from CLI flags.
pub(crate) const fn range_config(threshold: f64, emit_partial: bool) -> AggregatorConfig<f64> {
    AggregatorConfig::Range {
        threshold: Some(threshold),
        only_final_bars: !emit_partial,
    }
}

/// Builds a Renko config from CLI flags.
pub(crate) const fn renko_config(brick_size: f64, reversal_bricks: u32) -> AggregatorConfig<f64> {
    AggregatorConfig::Renko {
        brick_size: Some(brick_size),
        reversal_bricks,
    }
}

/// Builds a Heikin-Ashi config.
pub(crate) const fn heikin_ashi_config() -> AggregatorConfig<f64> {
    AggregatorConfig::HeikinAshi
}

/// Reads a strategy config from a JSON file.
pub(crate) fn load_config(path: &Path) -> Result<AggregatorConfig<f64>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid strategy config in {}", path.display()))
}

/// Reads bars, resamples them and writes the result.
pub(crate) fn resample(
    config: AggregatorConfig<f64>,
    input: Option<&Path>,
    output: Option<&Path>,
    name: Option<&str>,
    style: OutputStyle,
) -> Result<()> {
    let aggregator = BarAggregator::try_from(config).context("Invalid strategy parameters")?;

    let bars = display::read_bars(input)?;
    let source_name = input
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .unwrap_or("series");
    let series = BarSeries::new(source_name, bars);
    tracing::info!(bars = series.len(), series = series.name(), "loaded bars");

    let orchestrator = SeriesAggregator::new(aggregator);
    let resampled = match name {
        Some(name) => orchestrator.aggregate_as(&series, name),
        None => orchestrator.aggregate(&series),
    }
    .with_context(|| format!("Failed to resample {}", series.name()))?;
    tracing::info!(
        bars = resampled.len(),
        series = resampled.name(),
        strategy = orchestrator.aggregator().name(),
        "resampled"
    );

    display::write_bars(resampled.bars(), output, style)
}
